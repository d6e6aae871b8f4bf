use super::ArtifactManifest;
use super::layout::{BundleRoot, bundle_roots};
use crate::core::config::PackageConfig;
use crate::core::error::ReleaseResult;
use crate::core::platform::Platform;
use crate::ui::Logger;
use crate::utils::to_manifest_path;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Walks the package directory and collects the artifact manifest
///
/// The builder never provisions anything: a bundle whose directory is absent
/// simply contributes no files.
pub struct ManifestBuilder {
  logger: Logger,
  package_root: PathBuf,
}

impl ManifestBuilder {
  pub fn new(logger: Logger, package_root: &Path) -> Self {
    Self {
      logger,
      package_root: package_root.to_path_buf(),
    }
  }

  pub fn build(&self, platform: Platform) -> ReleaseResult<ArtifactManifest> {
    let mut manifest = ArtifactManifest::new();

    for root in bundle_roots(platform) {
      let before = manifest.len();
      match &root {
        BundleRoot::Tree(dir) => manifest.extend(walk_files(&self.package_root, &self.package_root.join(dir))),
        BundleRoot::Prefixed { dir, prefix } => {
          manifest.extend(prefixed_files(&self.package_root, dir, prefix));
        }
        BundleRoot::Pattern(pattern) => manifest.extend(self.glob_files(pattern)?),
        BundleRoot::File(path) => {
          manifest.insert(path.clone());
        }
      }
      self
        .logger
        .debug(format!("{:?}: {} file(s)", root, manifest.len() - before));
    }

    self.logger.info(format!(
      "Collected {} package file(s) for {} ({})",
      manifest.len(),
      platform,
      &manifest.fingerprint()[..12]
    ));
    Ok(manifest)
  }

  fn glob_files(&self, pattern: &str) -> ReleaseResult<Vec<String>> {
    // Only `pattern` is a glob; the checkout path is matched literally
    let full = format!("{}/{}", glob::Pattern::escape(&self.package_root.to_string_lossy()), pattern);
    let mut files = Vec::new();
    for entry in glob::glob(&full)?.filter_map(|e| e.ok()) {
      if entry.is_file()
        && let Ok(rel) = entry.strip_prefix(&self.package_root)
      {
        files.push(to_manifest_path(rel));
      }
    }
    Ok(files)
  }
}

/// Every file under `dir`, relative to `base`. Unreadable or absent entries are skipped.
///
/// Symlinked directories are listed as neither files nor walked into. Links to
/// files are kept, dangling ones included.
fn walk_files(base: &Path, dir: &Path) -> Vec<String> {
  WalkDir::new(dir)
    .follow_links(false)
    .into_iter()
    .filter_map(|e| e.ok())
    .filter(|e| e.file_type().is_file() || (e.path_is_symlink() && !e.path().is_dir()))
    .filter_map(|e| e.path().strip_prefix(base).ok().map(to_manifest_path))
    .collect()
}

fn prefixed_files(base: &Path, dir: &str, prefix: &str) -> Vec<String> {
  let Ok(entries) = fs::read_dir(base.join(dir)) else {
    return Vec::new();
  };

  entries
    .filter_map(|e| e.ok())
    .filter(|e| e.path().is_file() && e.file_name().to_string_lossy().starts_with(prefix))
    .filter_map(|e| e.path().strip_prefix(base).ok().map(to_manifest_path))
    .collect()
}

/// Files shipped outside the package directory, grouped by install directory
///
/// - `""`: the configured top-level data files
/// - `test_data`: every file under the configured test data directory
/// - `external_tools`: the platform's BLAST binaries
pub fn data_files(root: &Path, package: &PackageConfig, platform: Platform) -> BTreeMap<String, Vec<String>> {
  let mut groups = BTreeMap::new();

  groups.insert(String::new(), package.data_files.clone());

  let mut test_data = walk_files(root, &root.join(&package.test_data_dir));
  test_data.sort();
  groups.insert(to_manifest_path(&package.test_data_dir), test_data);

  groups.insert(
    "external_tools".to_string(),
    ["blastn", "makeblastdb"]
      .iter()
      .map(|bin| format!("external_tools/blast/{}/{}", platform.name(), bin))
      .collect(),
  );

  groups
}
