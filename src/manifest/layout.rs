//! Where each bundled tool lives inside the package directory

use crate::core::platform::Platform;

/// One contribution to the artifact manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleRoot {
  /// Every file beneath the directory, recursively
  Tree(String),
  /// Regular files directly in `dir` whose name starts with `prefix`
  Prefixed { dir: String, prefix: String },
  /// Files matching a glob pattern relative to the package directory
  Pattern(String),
  /// A single path, included verbatim
  File(String),
}

fn tree(dir: impl Into<String>) -> BundleRoot {
  BundleRoot::Tree(dir.into())
}

/// The full, ordered list of bundle roots for `platform`
pub fn bundle_roots(platform: Platform) -> Vec<BundleRoot> {
  let mut roots = vec![tree("html_saver")];

  // Aligners and the sambamba binary differ per platform
  if platform.is_macos() {
    roots.push(tree("E-MEM-osx"));
    roots.push(BundleRoot::File("sambamba/sambamba_osx".to_string()));
  } else {
    roots.push(tree("MUMmer3.23-linux"));
    roots.push(tree("E-MEM-linux"));
    roots.push(BundleRoot::File("sambamba/sambamba_linux".to_string()));
  }

  roots.extend([
    BundleRoot::Prefixed {
      dir: "bwa".to_string(),
      prefix: "bwa".to_string(),
    },
    tree("manta"),
    BundleRoot::Pattern("bedtools/bin/*".to_string()),
    tree(format!("genemark/{}", platform.name())),
    tree(format!("genemark-es/{}", platform.name())),
    tree("genemark-es/lib"),
    tree("glimmer"),
    tree("blast"),
    tree("gage"),
  ]);

  roots
}
