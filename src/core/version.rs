//! Release version resolution and the generated version record
//!
//! The release tag comes from the first line of the version manifest
//! (VERSION.txt). The short git revision is decoration: when it cannot be
//! looked up the record carries an empty string and the run continues.

use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use crate::core::vcs::RevisionSource;
use crate::ui::Logger;
use std::fs;
use std::io;
use std::path::Path;

/// Resolved release version, computed once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
  pub release_tag: String,
  /// Short revision hash, or empty when unavailable
  pub vcs_revision: String,
}

/// Reads the version manifest and stamps the current revision
pub struct VersionResolver<'a> {
  logger: Logger,
  revisions: &'a dyn RevisionSource,
}

impl<'a> VersionResolver<'a> {
  pub fn new(logger: Logger, revisions: &'a dyn RevisionSource) -> Self {
    Self { logger, revisions }
  }

  /// Resolve the version from `manifest_path`
  pub fn resolve(&self, manifest_path: &Path) -> ReleaseResult<Version> {
    let release_tag = read_release_tag(manifest_path)?;

    let vcs_revision = match self.revisions.short_revision() {
      Ok(rev) => rev,
      Err(e) => {
        self.logger.debug(format!("No git revision available: {}", e));
        String::new()
      }
    };

    Ok(Version {
      release_tag,
      vcs_revision,
    })
  }

  /// Write the generated record for runtime introspection
  pub fn persist(&self, version: &Version, output_path: &Path) -> ReleaseResult<()> {
    let record = VersionRecord::render(version);
    if let Some(parent) = output_path.parent()
      && !parent.as_os_str().is_empty()
    {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(output_path, record).with_context(|| format!("Failed to write {}", output_path.display()))?;
    self.logger.debug(format!("Wrote version record to {}", output_path.display()));
    Ok(())
  }
}

fn read_release_tag(manifest_path: &Path) -> ReleaseResult<String> {
  let content = match fs::read_to_string(manifest_path) {
    Ok(content) => content,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      return Err(ReleaseError::Config(ConfigError::VersionFileMissing {
        path: manifest_path.to_path_buf(),
      }));
    }
    Err(e) => return Err(ReleaseError::Io(e).context(format!("Failed to read {}", manifest_path.display()))),
  };

  // Leading blank lines are skipped along with surrounding whitespace
  let tag = content.trim().lines().next().unwrap_or("").trim().to_string();
  if tag.is_empty() {
    return Err(ReleaseError::Config(ConfigError::EmptyVersion {
      path: manifest_path.to_path_buf(),
    }));
  }
  Ok(tag)
}

/// The generated version source file
pub struct VersionRecord;

const HEADER: &str =
  "// Generated by quast-release. Do not edit this file, release versioning is governed by the version manifest";
const VERSION_CONST: &str = "pub const VERSION: &str = ";
const REVISION_CONST: &str = "pub const GIT_REVISION: &str = ";

impl VersionRecord {
  /// Render the record. Identical input yields byte-identical output.
  pub fn render(version: &Version) -> String {
    format!(
      "{}\n{}{:?};\n{}{:?};\n",
      HEADER, VERSION_CONST, version.release_tag, REVISION_CONST, version.vcs_revision
    )
  }

  /// Parse a record written by [`VersionResolver::persist`]
  pub fn read(path: &Path) -> ReleaseResult<Version> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Self::parse(&content).ok_or_else(|| {
      ReleaseError::with_help(
        format!("{} is not a generated version record", path.display()),
        "Re-run quast-release to regenerate it",
      )
    })
  }

  fn parse(content: &str) -> Option<Version> {
    let mut release_tag = None;
    let mut vcs_revision = None;
    for line in content.lines() {
      if let Some(rest) = line.strip_prefix(VERSION_CONST) {
        release_tag = unquote(rest.strip_suffix(';')?);
      } else if let Some(rest) = line.strip_prefix(REVISION_CONST) {
        vcs_revision = unquote(rest.strip_suffix(';')?);
      }
    }
    Some(Version {
      release_tag: release_tag?,
      vcs_revision: vcs_revision?,
    })
  }
}

/// Reverse of `{:?}` string formatting for the escapes it emits
fn unquote(literal: &str) -> Option<String> {
  let inner = literal.strip_prefix('"')?.strip_suffix('"')?;
  let mut out = String::with_capacity(inner.len());
  let mut chars = inner.chars();
  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    }
    match chars.next()? {
      'n' => out.push('\n'),
      'r' => out.push('\r'),
      't' => out.push('\t'),
      '0' => out.push('\0'),
      '\\' => out.push('\\'),
      '"' => out.push('"'),
      '\'' => out.push('\''),
      'u' => {
        let rest: String = chars.by_ref().take_while(|&c| c != '}').collect();
        let hex = rest.strip_prefix('{')?;
        out.push(char::from_u32(u32::from_str_radix(hex, 16).ok()?)?);
      }
      _ => return None,
    }
  }
  Some(out)
}
