//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A throwaway orchestrator root with a version manifest
pub struct TestRoot {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestRoot {
  /// Create a root containing `VERSION.txt` with `version` on its first line
  pub fn new(version: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().canonicalize()?;

    std::fs::write(path.join("VERSION.txt"), format!("{}\n", version))?;

    Ok(Self { _root: root, path })
  }

  /// Create a root that is also a git repository with one commit
  pub fn with_git(version: &str) -> Result<Self> {
    let root = Self::new(version)?;

    git(&root.path, &["init", "--initial-branch=main"])?;
    git(&root.path, &["config", "user.name", "Test User"])?;
    git(&root.path, &["config", "user.email", "test@example.com"])?;
    std::fs::write(root.path.join(".gitignore"), "dist/\nlibs/version.rs\n")?;
    git(&root.path, &["add", "."])?;
    git(&root.path, &["commit", "-m", "Initial release layout"])?;

    Ok(root)
  }

  /// Write `release.toml` at the root
  pub fn release_toml(&self, content: &str) -> Result<()> {
    std::fs::write(self.path.join("release.toml"), content)?;
    Ok(())
  }

  /// Create a file (and its parents) relative to the root
  pub fn touch(&self, rel: &str) -> Result<()> {
    let path = self.path.join(rel);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, rel)?;
    Ok(())
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Override every provisioner with `command`, so no real tool gets built
pub fn all_tools(command: &[&str]) -> String {
  let argv = command.iter().map(|a| format!("{:?}", a)).collect::<Vec<_>>().join(", ");
  ["aligner", "reads-analyzer", "blast", "glimmer", "gage"]
    .iter()
    .map(|name| format!("[[tools]]\nname = \"{}\"\nprovision = [{}]\nteardown = []\n\n", name, argv))
    .collect()
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run quast-release from `cwd` against `root`, returning the output whatever the exit status
pub fn run_quast_release(cwd: &Path, root: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_quast-release");

  Command::new(bin)
    .current_dir(cwd)
    .env("QUAST_RELEASE_ROOT", root)
    .env_remove("RUST_LOG")
    .args(args)
    .output()
    .context("Failed to run quast-release")
}

/// Run quast-release from the root itself and require success
pub fn run_ok(root: &TestRoot, args: &[&str]) -> Result<Output> {
  let output = run_quast_release(&root.path, &root.path, args)?;

  if !output.status.success() {
    anyhow::bail!(
      "quast-release {} failed ({:?})\nstdout: {}\nstderr: {}",
      args.join(" "),
      output.status.code(),
      String::from_utf8_lossy(&output.stdout),
      String::from_utf8_lossy(&output.stderr)
    );
  }

  Ok(output)
}
