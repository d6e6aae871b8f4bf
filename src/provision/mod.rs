//! Bundled-tool provisioners
//!
//! Each native helper shipped in the package (aligners, read-analysis tools,
//! BLAST, Glimmer, GAGE) has one provisioner that builds or fetches it and
//! can remove what it produced. The dispatcher only sees the [`Provisioner`]
//! trait; the production implementation is [`CommandProvisioner`].

mod command;

pub use command::CommandProvisioner;

use crate::core::error::{ReleaseError, ReleaseResult};
use crate::ui::Logger;
use std::fmt;

/// The five bundled tools, in provisioning order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToolKind {
  Aligner,
  ReadsAnalyzer,
  Blast,
  Glimmer,
  Gage,
}

impl ToolKind {
  /// Fixed order for both provisioning and teardown
  pub const ALL: [ToolKind; 5] = [
    ToolKind::Aligner,
    ToolKind::ReadsAnalyzer,
    ToolKind::Blast,
    ToolKind::Glimmer,
    ToolKind::Gage,
  ];

  /// Identifier used in release.toml
  pub fn name(self) -> &'static str {
    match self {
      ToolKind::Aligner => "aligner",
      ToolKind::ReadsAnalyzer => "reads-analyzer",
      ToolKind::Blast => "blast",
      ToolKind::Glimmer => "glimmer",
      ToolKind::Gage => "gage",
    }
  }

  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|k| k.name() == name)
  }

  /// Wording used in the per-step start banner
  pub fn label(self) -> &'static str {
    match self {
      ToolKind::Aligner => "aligner",
      ToolKind::ReadsAnalyzer => "read analysis tools",
      ToolKind::Blast => "BLAST",
      ToolKind::Glimmer => "Glimmer",
      ToolKind::Gage => "GAGE",
    }
  }
}

impl fmt::Display for ToolKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// What a teardown found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Teardown {
  Cleaned,
  NothingToClean,
}

/// Builds (or downloads) one bundled tool and removes it again
pub trait Provisioner {
  fn kind(&self) -> ToolKind;

  /// Build the tool. Any error aborts the build-and-package command.
  fn provision(&self, logger: &Logger) -> ReleaseResult<()>;

  /// Remove build outputs. Called only from `clean`, where errors are logged
  /// and the next provisioner still runs.
  fn teardown(&self, logger: &Logger) -> ReleaseResult<Teardown>;
}

/// Exactly one provisioner per tool, iterated in [`ToolKind::ALL`] order
pub struct ProvisionerSet {
  members: Vec<Box<dyn Provisioner>>,
}

impl ProvisionerSet {
  /// Accepts the provisioners in any order; rejects missing or duplicate tools
  pub fn new(mut members: Vec<Box<dyn Provisioner>>) -> ReleaseResult<Self> {
    members.sort_by_key(|p| p.kind());
    let kinds: Vec<ToolKind> = members.iter().map(|p| p.kind()).collect();
    if kinds != ToolKind::ALL {
      return Err(ReleaseError::message(format!(
        "Expected one provisioner per tool ({}), got [{}]",
        ToolKind::ALL.map(|k| k.name()).join(", "),
        kinds.iter().map(|k| k.name()).collect::<Vec<_>>().join(", ")
      )));
    }
    Ok(Self { members })
  }

  pub fn iter(&self) -> impl Iterator<Item = &dyn Provisioner> {
    self.members.iter().map(|p| p.as_ref())
  }
}
