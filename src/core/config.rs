use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use crate::provision::ToolKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for quast-release
/// Searched in order: release.toml, .release.toml, .config/release.toml
///
/// Every field has a default, so a missing file is equivalent to an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleaseConfig {
  #[serde(default)]
  pub package: PackageConfig,
  #[serde(default)]
  pub publish: PublishConfig,
  #[serde(default)]
  pub tools: Vec<ToolConfig>,
}

/// What the packaged toolkit is called and where its pieces live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
  /// Distribution name (also names the egg-info directory removed by `clean`)
  #[serde(default = "default_name")]
  pub name: String,

  /// Plain-text file whose first line is the release tag
  #[serde(default = "default_version_file")]
  pub version_file: PathBuf,

  /// Directory the artifact manifest is relative to
  #[serde(default = "default_package_dir")]
  pub package_dir: PathBuf,

  /// Generated version record, rewritten on every invocation
  #[serde(default = "default_generated_version")]
  pub generated_version: PathBuf,

  /// Entry-point scripts shipped with the package
  #[serde(default = "default_scripts")]
  pub scripts: Vec<String>,

  /// Runtime dependencies declared by the package
  #[serde(default = "default_dependencies")]
  pub dependencies: Vec<String>,

  /// Top-level files shipped as data files
  #[serde(default = "default_data_files")]
  pub data_files: Vec<String>,

  /// Directory whose whole tree is shipped as data files
  #[serde(default = "default_test_data_dir")]
  pub test_data_dir: PathBuf,

  /// Where package descriptors and archives are written
  #[serde(default = "default_dist_dir")]
  pub dist_dir: PathBuf,
}

fn default_name() -> String {
  "quast".to_string()
}

fn default_version_file() -> PathBuf {
  PathBuf::from("VERSION.txt")
}

fn default_package_dir() -> PathBuf {
  PathBuf::from("libs")
}

fn default_generated_version() -> PathBuf {
  PathBuf::from("libs").join("version.rs")
}

fn default_scripts() -> Vec<String> {
  ["quast.py", "metaquast.py", "icarus.py"]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_dependencies() -> Vec<String> {
  ["matplotlib", "joblib", "simplejson"]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_data_files() -> Vec<String> {
  ["README.txt", "CHANGES.txt", "VERSION.txt", "LICENSE.txt", "manual.html"]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_test_data_dir() -> PathBuf {
  PathBuf::from("test_data")
}

fn default_dist_dir() -> PathBuf {
  PathBuf::from("dist")
}

impl Default for PackageConfig {
  fn default() -> Self {
    Self {
      name: default_name(),
      version_file: default_version_file(),
      package_dir: default_package_dir(),
      generated_version: default_generated_version(),
      scripts: default_scripts(),
      dependencies: default_dependencies(),
      data_files: default_data_files(),
      test_data_dir: default_test_data_dir(),
      dist_dir: default_dist_dir(),
    }
  }
}

/// The archive command run by `publish`
///
/// `{name}`, `{version}` and `{dist}` (the package dist directory)
/// placeholders are substituted before running.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
  #[serde(default = "default_publish_command")]
  pub command: Vec<String>,
}

fn default_publish_command() -> Vec<String> {
  [
    "git",
    "archive",
    "--format=tar.gz",
    "--prefix={name}-{version}/",
    "-o",
    "{dist}/{name}-{version}.tar.gz",
    "HEAD",
  ]
  .iter()
  .map(|s| s.to_string())
  .collect()
}

impl Default for PublishConfig {
  fn default() -> Self {
    Self {
      command: default_publish_command(),
    }
  }
}

impl PublishConfig {
  /// Command line with placeholders filled in
  pub fn render(&self, name: &str, version: &str, dist: &str) -> Vec<String> {
    self
      .command
      .iter()
      .map(|arg| {
        arg
          .replace("{name}", name)
          .replace("{version}", version)
          .replace("{dist}", dist)
      })
      .collect()
  }
}

/// Override for one of the five bundled-tool provisioners
///
/// # Example
///
/// ```toml
/// [[tools]]
/// name = "blast"
/// provision = ["./scripts/fetch_blast.sh"]
/// teardown = []
/// clean_paths = ["libs/blast/linux", "libs/blast/macosx"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
  pub name: String,
  /// Command that builds or downloads the tool
  #[serde(default)]
  pub provision: Option<Vec<String>>,
  /// Command that removes build outputs (empty = skip)
  #[serde(default)]
  pub teardown: Option<Vec<String>>,
  /// Paths (relative to the root) deleted on teardown
  #[serde(default)]
  pub clean_paths: Vec<PathBuf>,
}

impl ReleaseConfig {
  /// Find config file in search order: release.toml, .release.toml, .config/release.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("release.toml"),
      path.join(".release.toml"),
      path.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, falling back to defaults when no file exists
  pub fn load(path: &Path) -> ReleaseResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: ReleaseConfig = toml_edit::de::from_str(&content).map_err(|e| {
      ReleaseError::Config(ConfigError::Invalid {
        path: config_path.clone(),
        reason: e.to_string(),
      })
    })?;

    config.validate().map_err(|reason| {
      ReleaseError::Config(ConfigError::Invalid {
        path: config_path.clone(),
        reason,
      })
    })?;

    Ok(config)
  }

  fn validate(&self) -> Result<(), String> {
    if self.package.name.trim().is_empty() {
      return Err("package.name must not be empty".to_string());
    }
    if self.publish.command.is_empty() {
      return Err("publish.command must name a program".to_string());
    }
    for tool in &self.tools {
      if ToolKind::from_name(&tool.name).is_none() {
        return Err(format!(
          "unknown tool '{}' (expected one of: {})",
          tool.name,
          ToolKind::ALL.map(|k| k.name()).join(", ")
        ));
      }
      if tool.provision.as_ref().is_some_and(|cmd| cmd.is_empty()) {
        return Err(format!("tools.provision for '{}' must not be empty", tool.name));
      }
    }
    Ok(())
  }

  /// Override entry for a tool, if the file declares one
  pub fn tool(&self, kind: ToolKind) -> Option<&ToolConfig> {
    self.tools.iter().find(|t| t.name == kind.name())
  }
}
