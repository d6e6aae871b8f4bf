//! Integration tests for `quast-release clean`

use crate::helpers::{TestRoot, run_ok};
use anyhow::Result;

#[test]
fn test_clean_with_nothing_to_clean() -> Result<()> {
  let root = TestRoot::new("5.0.2")?;

  let output = run_ok(&root, &["clean"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Done."), "stderr:\n{}", stderr);

  Ok(())
}

#[test]
fn test_clean_without_version_manifest() -> Result<()> {
  let root = TestRoot::new("5.0.2")?;
  std::fs::remove_file(root.path.join("VERSION.txt"))?;

  run_ok(&root, &["clean"])?;
  assert!(!root.file_exists("libs/version.rs"));

  Ok(())
}

#[test]
fn test_clean_removes_packaging_leftovers() -> Result<()> {
  let root = TestRoot::new("5.0.2")?;
  root.touch("build/lib/quast.py")?;
  root.touch("dist/quast-5.0.2.json")?;
  root.touch("quast.egg-info/PKG-INFO")?;
  root.touch("README.txt")?;

  run_ok(&root, &["clean"])?;

  assert!(!root.file_exists("build"));
  assert!(!root.file_exists("dist"));
  assert!(!root.file_exists("quast.egg-info"));
  assert!(root.file_exists("README.txt"));

  Ok(())
}

#[test]
fn test_failing_teardown_does_not_abort_clean() -> Result<()> {
  let root = TestRoot::new("5.0.2")?;
  root.touch("libs/glimmer/bin/glimmer3")?;
  root.touch("libs/gage/bin/gage")?;
  root.release_toml(
    r#"
[[tools]]
name = "aligner"
teardown = ["false"]

[[tools]]
name = "blast"
teardown = ["quast-release-missing-cleanup-tool"]

[[tools]]
name = "glimmer"
teardown = []
clean_paths = ["libs/glimmer/bin"]

[[tools]]
name = "gage"
teardown = []
clean_paths = ["libs/gage/bin"]
"#,
  )?;

  run_ok(&root, &["clean"])?;

  // Tools after the failing ones were still torn down
  assert!(!root.file_exists("libs/glimmer/bin"));
  assert!(!root.file_exists("libs/gage/bin"));

  Ok(())
}
