//! Provisioner that drives a tool's own build system
//!
//! By default every bundle directory under the package root is built with
//! `make -C <dir>` and cleaned with `make -C <dir> clean`. A `[[tools]]`
//! entry in release.toml replaces either command and adds paths to delete.

use super::{Provisioner, Teardown, ToolKind};
use crate::core::config::ReleaseConfig;
use crate::core::error::{ProvisionError, ReleaseResult};
use crate::core::platform::Platform;
use crate::core::runner::{CommandRunner, display_command};
use crate::ui::Logger;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct CommandProvisioner {
  kind: ToolKind,
  root: PathBuf,
  /// Bundle directories, relative to the root
  bundle_dirs: Vec<PathBuf>,
  provision: Option<Vec<String>>,
  teardown: Option<Vec<String>>,
  clean_paths: Vec<PathBuf>,
  runner: Arc<dyn CommandRunner>,
}

/// Bundle directories a tool builds into, relative to the package directory
pub fn bundle_dirs(kind: ToolKind, platform: Platform) -> &'static [&'static str] {
  match (kind, platform) {
    (ToolKind::Aligner, Platform::MacOsX) => &["E-MEM-osx"],
    (ToolKind::Aligner, Platform::Linux) => &["MUMmer3.23-linux", "E-MEM-linux"],
    (ToolKind::ReadsAnalyzer, _) => &["bwa", "bedtools"],
    (ToolKind::Blast, _) => &["blast"],
    (ToolKind::Glimmer, _) => &["glimmer"],
    (ToolKind::Gage, _) => &["gage"],
  }
}

impl CommandProvisioner {
  pub fn new(
    kind: ToolKind,
    root: &Path,
    config: &ReleaseConfig,
    platform: Platform,
    runner: Arc<dyn CommandRunner>,
  ) -> Self {
    let package_dir = &config.package.package_dir;
    let overrides = config.tool(kind);

    Self {
      kind,
      root: root.to_path_buf(),
      bundle_dirs: bundle_dirs(kind, platform)
        .iter()
        .map(|d| package_dir.join(d))
        .collect(),
      provision: overrides.and_then(|t| t.provision.clone()),
      teardown: overrides.and_then(|t| t.teardown.clone()),
      clean_paths: overrides.map(|t| t.clean_paths.clone()).unwrap_or_default(),
      runner,
    }
  }

  /// All five provisioners for this root and platform
  pub fn all(
    root: &Path,
    config: &ReleaseConfig,
    platform: Platform,
    runner: Arc<dyn CommandRunner>,
  ) -> Vec<Box<dyn Provisioner>> {
    ToolKind::ALL
      .into_iter()
      .map(|kind| Box::new(Self::new(kind, root, config, platform, runner.clone())) as Box<dyn Provisioner>)
      .collect()
  }

  fn fail(&self, reason: impl Into<String>) -> ProvisionError {
    ProvisionError::new(self.kind.name(), reason)
  }

  fn make(&self, dir: &Path, target: Option<&str>) -> Vec<String> {
    let mut argv = vec!["-C".to_string(), dir.to_string_lossy().to_string()];
    if let Some(target) = target {
      argv.push(target.to_string());
    }
    argv
  }

  fn existing_bundles(&self) -> Vec<&PathBuf> {
    self.bundle_dirs.iter().filter(|d| self.root.join(d).is_dir()).collect()
  }
}

impl Provisioner for CommandProvisioner {
  fn kind(&self) -> ToolKind {
    self.kind
  }

  fn provision(&self, logger: &Logger) -> ReleaseResult<()> {
    if let Some(argv) = &self.provision {
      let (program, args) = argv.split_first().ok_or_else(|| self.fail("empty provision command"))?;
      logger.debug(format!("Running {}", display_command(program, args)));
      return self
        .runner
        .run_checked(program, args, &self.root)
        .map_err(|e| self.fail(e.to_string()).into());
    }

    for dir in &self.bundle_dirs {
      if !self.root.join(dir).is_dir() {
        return Err(self.fail(format!("bundle directory {} does not exist", dir.display())).into());
      }
      let args = self.make(dir, None);
      logger.debug(format!("Running {}", display_command("make", &args)));
      self
        .runner
        .run_checked("make", &args, &self.root)
        .map_err(|e| self.fail(e.to_string()))?;
    }
    Ok(())
  }

  fn teardown(&self, logger: &Logger) -> ReleaseResult<Teardown> {
    let mut cleaned = false;

    match &self.teardown {
      Some(argv) => {
        if let Some((program, args)) = argv.split_first() {
          self.runner.run_checked(program, args, &self.root)?;
          cleaned = true;
        }
      }
      None => {
        for dir in self.existing_bundles() {
          let args = self.make(dir, Some("clean"));
          logger.debug(format!("Running {}", display_command("make", &args)));
          self.runner.run_checked("make", &args, &self.root)?;
          cleaned = true;
        }
      }
    }

    for path in &self.clean_paths {
      let target = self.root.join(path);
      if target.is_dir() {
        fs::remove_dir_all(&target)?;
      } else if target.exists() {
        fs::remove_file(&target)?;
      } else {
        continue;
      }
      logger.debug(format!("Removed {}", path.display()));
      cleaned = true;
    }

    Ok(if cleaned { Teardown::Cleaned } else { Teardown::NothingToClean })
  }
}
