//! Artifact manifest: the files a package must contain
//!
//! The manifest is rebuilt from the filesystem on every packaging run and
//! never persisted. Paths are relative to the package directory and always
//! use `/` separators, so the same tree yields the same manifest on every
//! host.

mod builder;
mod layout;

pub use builder::{ManifestBuilder, data_files};

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

/// Ordered, duplicate-free set of package-relative paths
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArtifactManifest {
  paths: BTreeSet<String>,
}

impl ArtifactManifest {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, path: impl Into<String>) -> bool {
    self.paths.insert(path.into())
  }

  pub fn extend<I, S>(&mut self, paths: I)
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.paths.extend(paths.into_iter().map(Into::into));
  }

  #[cfg(test)]
  pub fn contains(&self, path: &str) -> bool {
    self.paths.contains(path)
  }

  /// True if any entry lives under `dir`
  #[cfg(test)]
  pub fn contains_under(&self, dir: &str) -> bool {
    let prefix = format!("{}/", dir.trim_end_matches('/'));
    self.paths.iter().any(|p| p.starts_with(&prefix))
  }

  #[cfg(test)]
  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.paths.iter().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.paths.len()
  }

  /// Hex SHA-256 over the sorted paths, one per line
  pub fn fingerprint(&self) -> String {
    let mut hasher = Sha256::new();
    for path in &self.paths {
      hasher.update(path.as_bytes());
      hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
  }
}
