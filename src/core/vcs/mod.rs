pub mod system_git;

pub use system_git::SystemGit;

use crate::core::error::ReleaseResult;

/// Source of the short revision hash stamped into the version record
///
/// Callers treat every error as "no revision"; implementations just report
/// what went wrong.
pub trait RevisionSource {
  fn short_revision(&self) -> ReleaseResult<String>;
}

impl RevisionSource for SystemGit {
  fn short_revision(&self) -> ReleaseResult<String> {
    self.head_short()
  }
}
