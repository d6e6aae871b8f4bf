//! Packaging collaborator
//!
//! Once provisioning has succeeded, the dispatcher hands a [`PackageSpec`]
//! to a [`Packager`]. The packaging format is the packager's business; the
//! built-in [`DescriptorPackager`] writes a JSON descriptor that downstream
//! tooling turns into an installable archive.

use crate::core::error::{ReleaseResult, ResultExt};
use crate::core::version::Version;
use crate::manifest::ArtifactManifest;
use crate::ui::Logger;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything a packager needs to produce a distributable
#[derive(Debug, Clone, Serialize)]
pub struct PackageSpec {
  pub name: String,
  pub version: String,
  pub revision: String,
  pub manifest: ArtifactManifest,
  pub manifest_fingerprint: String,
  pub scripts: Vec<String>,
  /// Install directory -> files
  pub data_files: BTreeMap<String, Vec<String>>,
  pub dependencies: Vec<String>,
}

impl PackageSpec {
  pub fn new(
    name: &str,
    version: &Version,
    manifest: ArtifactManifest,
    scripts: Vec<String>,
    data_files: BTreeMap<String, Vec<String>>,
    dependencies: Vec<String>,
  ) -> Self {
    Self {
      name: name.to_string(),
      version: version.release_tag.clone(),
      revision: version.vcs_revision.clone(),
      manifest_fingerprint: manifest.fingerprint(),
      manifest,
      scripts,
      data_files,
      dependencies,
    }
  }
}

pub trait Packager {
  /// Produce the package for lifecycle token `command` (install, build, ...)
  fn package(&self, spec: &PackageSpec, command: &str) -> ReleaseResult<()>;

  /// Handle a token the orchestrator does not recognize
  fn passthrough(&self, token: Option<&str>) -> ReleaseResult<()>;
}

/// Writes `<dist>/<name>-<version>.json`
pub struct DescriptorPackager {
  logger: Logger,
  dist_dir: PathBuf,
}

impl DescriptorPackager {
  pub fn new(logger: Logger, dist_dir: &Path) -> Self {
    Self {
      logger,
      dist_dir: dist_dir.to_path_buf(),
    }
  }

  pub fn descriptor_path(&self, spec: &PackageSpec) -> PathBuf {
    self.dist_dir.join(format!("{}-{}.json", spec.name, spec.version))
  }
}

impl Packager for DescriptorPackager {
  fn package(&self, spec: &PackageSpec, command: &str) -> ReleaseResult<()> {
    fs::create_dir_all(&self.dist_dir)
      .with_context(|| format!("Failed to create {}", self.dist_dir.display()))?;

    let path = self.descriptor_path(spec);
    let mut json = serde_json::to_string_pretty(spec)?;
    json.push('\n');
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    self.logger.info(format!(
      "{}: packaged {} file(s) into {}",
      command,
      spec.manifest.len(),
      path.display()
    ));
    Ok(())
  }

  fn passthrough(&self, token: Option<&str>) -> ReleaseResult<()> {
    match token {
      Some(token) => self.logger.info(format!("Nothing to orchestrate for '{}'", token)),
      None => self.logger.info("No command given; nothing to orchestrate"),
    }
    Ok(())
  }
}
