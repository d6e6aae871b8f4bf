//! Integration tests for the working-directory and version-manifest checks

use crate::helpers::{TestRoot, all_tools, run_quast_release};
use anyhow::Result;
use tempfile::TempDir;

#[test]
fn test_wrong_directory_is_refused() -> Result<()> {
  let root = TestRoot::new("5.0.2")?;
  root.release_toml(&all_tools(&["touch", "provisioned.marker"]))?;
  let elsewhere = TempDir::new()?;

  for command in ["install", "clean", "tag", "publish", "sdist"] {
    let output = run_quast_release(elsewhere.path(), &root.path, &[command])?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1), "{} should exit 1", command);
    assert!(
      stderr.contains(&root.path.display().to_string()),
      "error should name the required directory:\n{}",
      stderr
    );
  }

  // Nothing ran, nothing was written
  assert!(!root.file_exists("libs/version.rs"));
  assert!(!root.file_exists("provisioned.marker"));
  assert!(!root.file_exists("dist"));
  assert!(!elsewhere.path().join("libs").exists());

  Ok(())
}

#[test]
fn test_subdirectory_of_root_is_refused() -> Result<()> {
  let root = TestRoot::new("5.0.2")?;
  root.touch("libs/gage/run.sh")?;

  let output = run_quast_release(&root.path.join("libs"), &root.path, &["build"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(!root.file_exists("libs/version.rs"));

  Ok(())
}

#[test]
fn test_missing_version_manifest() -> Result<()> {
  let root = TestRoot::new("5.0.2")?;
  std::fs::remove_file(root.path.join("VERSION.txt"))?;
  root.release_toml(&all_tools(&["touch", "provisioned.marker"]))?;

  let output = run_quast_release(&root.path, &root.path, &["install"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("VERSION.txt"), "stderr:\n{}", stderr);
  assert!(!root.file_exists("provisioned.marker"));
  assert!(!root.file_exists("dist"));

  Ok(())
}

#[test]
fn test_blank_version_manifest() -> Result<()> {
  let root = TestRoot::new("   ")?;

  let output = run_quast_release(&root.path, &root.path, &["tag"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(!root.file_exists("libs/version.rs"));

  Ok(())
}

#[test]
fn test_invalid_release_toml() -> Result<()> {
  let root = TestRoot::new("5.0.2")?;
  root.release_toml("[[tools]]\nname = \"spades\"\n")?;

  let output = run_quast_release(&root.path, &root.path, &["build"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("spades"), "stderr:\n{}", stderr);

  Ok(())
}
