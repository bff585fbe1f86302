//! Repository access for the commit pipeline.
//!
//! Reads (diff, branch) go through git2. Commits shell out to the system
//! `git` binary so the user's hooks, signing config and message cleanup apply.

use std::path::Path;
use std::process::{Command, Stdio};

use git2::{DiffFindOptions, DiffFormat, DiffOptions, ErrorCode, Repository, Tree};
use tracing::{debug, warn};

use crate::error::GitError;

use super::hook::write_hook;

/// Git operations the pipeline depends on.
///
/// This abstraction allows substituting the repository in tests.
#[cfg_attr(test, mockall::automock)]
pub trait GitRepository {
    /// Unified diff of the staged changes with no context lines.
    fn staged_diff(&self) -> Result<String, GitError>;

    /// Current branch name, or a short commit hash when HEAD is detached.
    fn current_branch(&self) -> Result<String, GitError>;

    /// Commit the index with `headline` as subject and optional `body`.
    ///
    /// Runs `git commit`, so hooks and signing configured for the repository apply.
    fn commit(&self, headline: &str, body: &str) -> Result<(), GitError>;

    fn write_hook(&self, path: &Path, message: &str) -> Result<(), GitError>;
}

/// A repository on the local filesystem.
pub struct LocalRepository {
    repo: Repository,
}

impl LocalRepository {
    /// Open the repository containing `path`, searching parent directories.
    pub fn discover(path: &Path) -> Result<Self, GitError> {
        let repo = Repository::discover(path).map_err(GitError::OpenRepository)?;
        Ok(Self { repo })
    }

    pub fn from_repository(repo: Repository) -> Self {
        Self { repo }
    }
}

/// Resolve the HEAD tree, treating an unborn branch as "no tree yet".
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, GitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(GitError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(GitError::DiffFailed)?;
    Ok(Some(tree))
}

/// Run `git <args>` in `workdir`, returning stderr on failure.
fn run_git(workdir: &Path, args: &[&str], operation: &str) -> Result<(), GitError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| GitError::Spawn {
            operation: operation.to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        // Hooks often report on stdout; fall back to it when stderr is empty
        let detail = if stderr.trim().is_empty() { stdout } else { stderr };
        return Err(GitError::CommitFailed(detail.trim().to_string()));
    }

    Ok(())
}

impl GitRepository for LocalRepository {
    fn staged_diff(&self) -> Result<String, GitError> {
        let head_tree = resolve_head_tree(&self.repo)?;

        let mut opts = DiffOptions::new();
        opts.context_lines(0);
        let mut diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), None, Some(&mut opts))
            .map_err(GitError::DiffFailed)?;

        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))
            .map_err(GitError::DiffFailed)?;

        let mut text = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            let origin = line.origin();
            if matches!(origin, '+' | '-' | ' ') {
                text.push(origin);
            }
            text.push_str(&String::from_utf8_lossy(line.content()));
            true
        })
        .map_err(GitError::DiffFailed)?;

        debug!("Staged diff: {} deltas, {} bytes", diff.deltas().len(), text.len());
        Ok(text)
    }

    fn current_branch(&self) -> Result<String, GitError> {
        match self.repo.head() {
            Ok(head) => {
                if self.repo.head_detached().map_err(GitError::BranchFailed)? {
                    let commit = head.peel_to_commit().map_err(GitError::BranchFailed)?;
                    let short = commit
                        .as_object()
                        .short_id()
                        .map_err(GitError::BranchFailed)?;
                    return Ok(short.as_str().unwrap_or_default().to_string());
                }
                Ok(head.shorthand().unwrap_or_default().to_string())
            }
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                // No commits yet: HEAD still names the branch symbolically.
                let head = self
                    .repo
                    .find_reference("HEAD")
                    .map_err(GitError::BranchFailed)?;
                let target = head.symbolic_target().unwrap_or_default();
                Ok(target.strip_prefix("refs/heads/").unwrap_or(target).to_string())
            }
            Err(e) => Err(GitError::BranchFailed(e)),
        }
    }

    fn commit(&self, headline: &str, body: &str) -> Result<(), GitError> {
        if headline.trim().is_empty() {
            return Err(GitError::EmptyHeadline);
        }

        let workdir = self.repo.workdir().ok_or(GitError::BareRepository)?;

        let mut args = vec!["commit", "-m", headline];
        if !body.trim().is_empty() {
            args.extend(["-m", body]);
        }

        run_git(workdir, &args, "commit")?;
        debug!("Committed '{}'", headline);
        Ok(())
    }

    fn write_hook(&self, path: &Path, message: &str) -> Result<(), GitError> {
        if message.trim().is_empty() {
            warn!("Writing an empty message to {}", path.display());
        }
        write_hook(path, message)
    }
}
