//! Git operations using git2-rs.

pub mod hook;
pub mod repository;

pub use hook::write_hook;
pub use repository::{GitRepository, LocalRepository};

#[cfg(test)]
pub use repository::MockGitRepository;
