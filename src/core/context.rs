//! Release context - build once, pass everywhere
//!
//! Holds everything that is decided exactly once per invocation: the
//! orchestrator root, the loaded configuration and the detected platform.
//! Building it enforces the working-directory precondition, so nothing
//! downstream runs unless the operator is in the right place.

use crate::core::config::ReleaseConfig;
use crate::core::error::{ConfigError, ReleaseError, ReleaseResult};
use crate::core::platform::Platform;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ReleaseContext {
  /// Orchestrator root (absolute, canonical)
  pub root: PathBuf,

  /// release.toml, or defaults
  pub config: ReleaseConfig,

  /// Detected once at startup
  pub platform: Platform,
}

impl ReleaseContext {
  /// Check the precondition and load configuration.
  ///
  /// Fails with [`ConfigError::WrongDirectory`] before reading anything when
  /// `cwd` is not `root`.
  pub fn build(cwd: &Path, root: &Path, platform: Platform) -> ReleaseResult<Self> {
    let root = require_working_directory(cwd, root)?;
    let config = ReleaseConfig::load(&root)?;
    Ok(Self { root, config, platform })
  }

  /// Absolute path of something configured relative to the root
  pub fn path(&self, relative: &Path) -> PathBuf {
    self.root.join(relative)
  }

  pub fn package_root(&self) -> PathBuf {
    self.path(&self.config.package.package_dir)
  }
}

/// Both paths are canonicalized; a root that does not exist can never match.
pub fn require_working_directory(cwd: &Path, root: &Path) -> ReleaseResult<PathBuf> {
  let wrong = || {
    ReleaseError::Config(ConfigError::WrongDirectory {
      required: root.to_path_buf(),
      actual: cwd.to_path_buf(),
    })
  };

  let root = root.canonicalize().map_err(|_| wrong())?;
  let cwd = cwd.canonicalize().map_err(|_| wrong())?;
  if cwd != root {
    return Err(wrong());
  }
  Ok(root)
}
