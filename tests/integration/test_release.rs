//! Integration tests for `quast-release tag` and `quast-release publish`

use crate::helpers::{TestRoot, git, run_ok, run_quast_release};
use anyhow::Result;
use tempfile::TempDir;

#[test]
fn test_tag_creates_and_pushes_annotated_tag() -> Result<()> {
  let root = TestRoot::with_git("5.0.2")?;
  let remote = TempDir::new()?;
  git(remote.path(), &["init", "--bare"])?;
  git(&root.path, &["remote", "add", "origin", &remote.path().to_string_lossy()])?;

  run_ok(&root, &["tag"])?;

  let message = git(&root.path, &["tag", "-l", "--format=%(contents:subject)", "5.0.2"])?;
  assert_eq!(String::from_utf8_lossy(&message.stdout).trim(), "Version 5.0.2");

  let pushed = git(remote.path(), &["tag", "-l"])?;
  assert_eq!(String::from_utf8_lossy(&pushed.stdout).trim(), "5.0.2");

  // The revision made it into the version record
  let head = git(&root.path, &["rev-parse", "--short", "HEAD"])?;
  let record = root.read_file("libs/version.rs")?;
  assert!(record.contains(String::from_utf8_lossy(&head.stdout).trim()));

  Ok(())
}

#[test]
fn test_tag_push_failure_is_reported() -> Result<()> {
  // No remote configured: the tag is created, the push fails
  let root = TestRoot::with_git("5.0.2")?;

  let output = run_quast_release(&root.path, &root.path, &["tag"])?;
  assert_eq!(output.status.code(), Some(3));

  let tags = git(&root.path, &["tag", "-l"])?;
  assert_eq!(String::from_utf8_lossy(&tags.stdout).trim(), "5.0.2");

  Ok(())
}

#[test]
fn test_existing_tag_fails_before_push() -> Result<()> {
  let root = TestRoot::with_git("5.0.2")?;
  git(&root.path, &["tag", "-a", "5.0.2", "-m", "earlier"])?;

  let output = run_quast_release(&root.path, &root.path, &["tag"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr.contains("git tag -a 5.0.2"), "stderr:\n{}", stderr);
  assert!(!stderr.contains("Running git push --tags"), "stderr:\n{}", stderr);

  Ok(())
}

#[test]
fn test_publish_archives_head() -> Result<()> {
  let root = TestRoot::with_git("5.0.2")?;

  let output = run_ok(&root, &["publish"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert!(stderr.contains("not production-ready"), "stderr:\n{}", stderr);
  assert!(root.file_exists("dist/quast-5.0.2.tar.gz"));

  Ok(())
}

#[test]
fn test_publish_failure_exit_code() -> Result<()> {
  let root = TestRoot::new("5.0.2")?;
  root.release_toml("[publish]\ncommand = [\"false\"]\n")?;

  let output = run_quast_release(&root.path, &root.path, &["publish"])?;
  assert_eq!(output.status.code(), Some(3));

  Ok(())
}
