//! Integration tests for build-and-package and argument passthrough

use crate::helpers::{TestRoot, all_tools, run_ok, run_quast_release};
use anyhow::Result;

fn package_tree(root: &TestRoot) -> Result<()> {
  root.touch("libs/html_saver/template.html")?;
  root.touch("libs/MUMmer3.23-linux/nucmer")?;
  root.touch("libs/E-MEM-linux/e-mem")?;
  root.touch("libs/E-MEM-osx/e-mem")?;
  root.touch("libs/bwa/bwa")?;
  root.touch("libs/bwa/bwa.c")?;
  root.touch("libs/bwa/README.md")?;
  root.touch("libs/gage/run.sh")?;
  root.touch("test_data/contigs_1.fasta")?;
  Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn test_build_writes_descriptor_and_version_record() -> Result<()> {
  let root = TestRoot::new("5.0.2")?;
  package_tree(&root)?;
  root.release_toml(&all_tools(&["true"]))?;

  let output = run_ok(&root, &["build"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Installing quast version 5.0.2"), "stderr:\n{}", stderr);
  assert!(stderr.contains("quast installation complete!"), "stderr:\n{}", stderr);

  let record = root.read_file("libs/version.rs")?;
  assert!(record.contains("pub const VERSION: &str = \"5.0.2\";"));
  // Not a git repository: the revision is simply empty
  assert!(record.contains("pub const GIT_REVISION: &str = \"\";"));

  let descriptor: serde_json::Value = serde_json::from_str(&root.read_file("dist/quast-5.0.2.json")?)?;
  assert_eq!(descriptor["version"], "5.0.2");
  let manifest: Vec<&str> = descriptor["manifest"]
    .as_array()
    .unwrap()
    .iter()
    .map(|v| v.as_str().unwrap())
    .collect();
  assert!(manifest.contains(&"html_saver/template.html"));
  assert!(manifest.contains(&"MUMmer3.23-linux/nucmer"));
  assert!(manifest.contains(&"bwa/bwa.c"));
  assert!(manifest.contains(&"gage/run.sh"));
  assert!(!manifest.contains(&"bwa/README.md"));
  assert!(!manifest.contains(&"E-MEM-osx/e-mem"));
  assert_eq!(descriptor["data_files"]["test_data"][0], "test_data/contigs_1.fasta");

  Ok(())
}

#[test]
fn test_every_provisioning_token_packages() -> Result<()> {
  for token in ["install", "develop", "build", "build_ext"] {
    let root = TestRoot::new("5.0.2")?;
    root.release_toml(&all_tools(&["true"]))?;

    run_ok(&root, &["--verbose", token])?;
    assert!(root.file_exists("dist/quast-5.0.2.json"), "{} should package", token);
  }

  Ok(())
}

#[test]
fn test_failed_provisioner_aborts_build() -> Result<()> {
  let root = TestRoot::new("5.0.2")?;
  let mut config = all_tools(&["touch", "provisioned.marker"]);
  config = config.replacen(
    "provision = [\"touch\", \"provisioned.marker\"]",
    "provision = [\"false\"]",
    1,
  );
  root.release_toml(&config)?;

  let output = run_quast_release(&root.path, &root.path, &["install"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(2), "stderr:\n{}", stderr);
  assert!(stderr.contains("aligner"), "stderr:\n{}", stderr);
  assert!(!stderr.contains("installation complete"), "stderr:\n{}", stderr);
  // Later provisioners never ran and nothing was packaged
  assert!(!root.file_exists("provisioned.marker"));
  assert!(!root.file_exists("dist/quast-5.0.2.json"));

  Ok(())
}

#[test]
fn test_default_provisioner_needs_bundle_directory() -> Result<()> {
  let root = TestRoot::new("5.0.2")?;

  let output = run_quast_release(&root.path, &root.path, &["install"])?;
  assert_eq!(output.status.code(), Some(2));
  assert!(!root.file_exists("dist"));

  Ok(())
}

#[test]
fn test_unrecognized_token_skips_provisioning() -> Result<()> {
  let root = TestRoot::new("5.0.2")?;
  root.release_toml(&all_tools(&["touch", "provisioned.marker"]))?;

  for args in [&["sdist"][..], &["install", "--prefix=/opt/quast"][..], &[][..]] {
    let output = run_ok(&root, args)?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Installing quast version 5.0.2"), "stderr:\n{}", stderr);
    assert!(stderr.contains("quast installation complete!"), "stderr:\n{}", stderr);
  }

  assert!(!root.file_exists("provisioned.marker"));
  assert!(!root.file_exists("dist"));
  // The version record is still refreshed
  assert!(root.read_file("libs/version.rs")?.contains("\"5.0.2\""));

  Ok(())
}

#[test]
fn test_version_record_is_rewritten_each_run() -> Result<()> {
  let root = TestRoot::new("5.0.2")?;
  root.touch("libs/version.rs")?;

  run_ok(&root, &["sdist"])?;
  let first = root.read_file("libs/version.rs")?;
  assert!(first.contains("5.0.2"));

  std::fs::write(root.path.join("VERSION.txt"), "5.1.0\n")?;
  run_ok(&root, &["sdist"])?;
  let second = root.read_file("libs/version.rs")?;
  assert!(second.contains("5.1.0"));
  assert!(!second.contains("5.0.2"));

  Ok(())
}
