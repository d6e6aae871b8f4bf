//! System git backend
//!
//! Only the read-only queries the release flow needs go through here; tag
//! creation and pushing run through the command runner so they stream their
//! output to the operator.

use crate::core::error::{CommandError, ReleaseError, ReleaseResult};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git queries via the `git` binary on PATH
pub struct SystemGit {
  /// Directory the queries run in
  pub(crate) repo_path: PathBuf,
}

impl SystemGit {
  /// Point at a checkout. Nothing is executed until a query runs, so this
  /// succeeds for directories that are not repositories.
  pub fn at(path: &Path) -> Self {
    Self {
      repo_path: path.to_path_buf(),
    }
  }

  /// Abbreviated HEAD commit SHA
  pub fn head_short(&self) -> ReleaseResult<String> {
    let output = self.git_cmd().args(["rev-parse", "--short", "HEAD"]).output().map_err(|e| {
      ReleaseError::Command(CommandError::Spawn {
        command: "git rev-parse --short HEAD".to_string(),
        reason: e.to_string(),
      })
    })?;

    if !output.status.success() {
      return Err(ReleaseError::Command(CommandError::Failed {
        command: "git rev-parse --short HEAD".to_string(),
        code: output.status.code().unwrap_or(-1),
      }));
    }

    let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if sha.is_empty() {
      return Err(ReleaseError::message("git rev-parse printed no revision"));
    }
    Ok(sha)
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("core.quotePath=false");

    cmd
  }
}
