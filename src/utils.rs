//! Utility functions for cross-platform path handling

use std::path::Path;

/// Convert a relative path to manifest format (always forward slashes)
///
/// Manifests and package descriptors must be identical across hosts, so
/// backslashes from Windows paths are normalized away.
pub fn to_manifest_path(path: &Path) -> String {
  #[cfg(target_os = "windows")]
  {
    path.to_string_lossy().replace('\\', "/")
  }
  #[cfg(not(target_os = "windows"))]
  {
    path.to_string_lossy().to_string()
  }
}
