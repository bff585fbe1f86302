//! Writing the generated message into a commit-msg hook file.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::GitError;

/// Atomically replace `path` with `message` followed by a newline.
///
/// The content is written to a temporary file in the same directory and then
/// renamed over the target, so a concurrent reader never sees a partial file.
pub fn write_hook(path: &Path, message: &str) -> Result<(), GitError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(GitError::HookWriteFailed)?;
    file.write_all(message.as_bytes())
        .and_then(|()| file.write_all(b"\n"))
        .and_then(|()| file.flush())
        .map_err(GitError::HookWriteFailed)?;

    // Temp files are created 0600; the message file should be world-readable
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(GitError::HookWriteFailed)?;
    }

    file.persist(path)
        .map_err(|e| GitError::HookWriteFailed(e.error))?;

    debug!("Wrote {} bytes to {}", message.len() + 1, path.display());
    Ok(())
}
