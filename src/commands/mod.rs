//! Lifecycle commands for quast-release
//!
//! The final command-line token picks the lifecycle:
//!
//! - **clean**: tear down bundled tools, remove build and dist leftovers
//! - **tag**: create and push the release tag
//! - **publish**: build the source archive (not release-ready)
//! - **install / develop / build / build_ext**: provision every tool, then package
//! - anything else, or nothing: handed to the packager untouched
//!
//! Everything except `clean` resolves the version first and rewrites the
//! generated version record, exactly once per invocation.

pub mod clean;
pub mod install;
pub mod publish;
pub mod tag;

pub use clean::run_clean;
pub use install::run_provision_and_package;
pub use publish::run_publish;
pub use tag::run_tag;

use crate::core::context::ReleaseContext;
use crate::core::error::ReleaseResult;
use crate::core::runner::CommandRunner;
use crate::core::vcs::RevisionSource;
use crate::core::version::{Version, VersionResolver};
use crate::package::Packager;
use crate::provision::ProvisionerSet;
use crate::ui::Logger;
use std::sync::Arc;

/// Tokens that trigger provisioning followed by packaging
pub const PROVISIONING_TOKENS: [&str; 4] = ["install", "develop", "build", "build_ext"];

/// What one invocation does, decided from its final argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
  Clean,
  Tag,
  Publish,
  /// Carries the token so the packager knows which flavour was asked for
  ProvisionAndPackage(String),
  /// Unrecognized token, or no arguments at all
  Passthrough(Option<String>),
}

impl Lifecycle {
  /// Only the last argument matters; earlier ones are left to the packager
  pub fn from_args(args: &[String]) -> Self {
    match args.last().map(String::as_str) {
      Some("clean") => Lifecycle::Clean,
      Some("tag") => Lifecycle::Tag,
      Some("publish") => Lifecycle::Publish,
      Some(token) if PROVISIONING_TOKENS.contains(&token) => Lifecycle::ProvisionAndPackage(token.to_string()),
      other => Lifecycle::Passthrough(other.map(str::to_string)),
    }
  }

  pub fn state(&self) -> DispatchState {
    match self {
      Lifecycle::Clean => DispatchState::Cleaning,
      Lifecycle::Tag => DispatchState::Tagging,
      Lifecycle::Publish => DispatchState::Publishing,
      Lifecycle::ProvisionAndPackage(_) => DispatchState::Provisioning,
      Lifecycle::Passthrough(_) => DispatchState::PackagingArgsPassthrough,
    }
  }
}

/// Where the dispatcher is. A dispatcher leaves `Idle` once and never returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
  Idle,
  Cleaning,
  Tagging,
  Publishing,
  Provisioning,
  PackagingArgsPassthrough,
}

/// Everything the dispatcher delegates to
pub struct Collaborators {
  pub provisioners: ProvisionerSet,
  pub packager: Box<dyn Packager>,
  pub runner: Arc<dyn CommandRunner>,
  pub revisions: Box<dyn RevisionSource>,
}

/// Runs exactly one lifecycle per invocation
pub struct Dispatcher<'a> {
  ctx: &'a ReleaseContext,
  parts: Collaborators,
  logger: Logger,
  state: DispatchState,
}

impl<'a> Dispatcher<'a> {
  pub fn new(ctx: &'a ReleaseContext, parts: Collaborators, logger: Logger) -> Self {
    Self {
      ctx,
      parts,
      logger,
      state: DispatchState::Idle,
    }
  }

  pub fn state(&self) -> DispatchState {
    self.state
  }

  pub fn run(&mut self, lifecycle: Lifecycle) -> ReleaseResult<()> {
    if self.state != DispatchState::Idle {
      return Err(format!("Dispatcher already ran ({:?})", self.state).into());
    }
    self.state = lifecycle.state();
    self.logger.debug(format!("Dispatching {:?} on {}", lifecycle, self.ctx.platform));

    // clean never reads the version manifest
    if lifecycle == Lifecycle::Clean {
      return run_clean(self.ctx, &self.parts.provisioners, &self.logger);
    }

    let version = self.resolve_version()?;

    match lifecycle {
      Lifecycle::Clean => Ok(()),
      Lifecycle::Tag => run_tag(self.ctx, &version, self.parts.runner.as_ref(), &self.logger),
      Lifecycle::Publish => run_publish(self.ctx, &version, self.parts.runner.as_ref(), &self.logger),
      Lifecycle::ProvisionAndPackage(token) => {
        self.install_banner(&version);
        run_provision_and_package(
          self.ctx,
          &token,
          &version,
          &self.parts.provisioners,
          self.parts.packager.as_ref(),
          &self.logger,
        )?;
        self.complete_banner();
        Ok(())
      }
      Lifecycle::Passthrough(token) => {
        self.install_banner(&version);
        self.parts.packager.passthrough(token.as_deref())?;
        self.complete_banner();
        Ok(())
      }
    }
  }

  /// Read the manifest and rewrite the generated version record
  fn resolve_version(&self) -> ReleaseResult<Version> {
    let package = &self.ctx.config.package;
    let resolver = VersionResolver::new(self.logger.child("version"), self.parts.revisions.as_ref());
    let version = resolver.resolve(&self.ctx.path(&package.version_file))?;
    resolver.persist(&version, &self.ctx.path(&package.generated_version))?;
    Ok(version)
  }

  fn install_banner(&self, version: &Version) {
    let mut title = format!("Installing {} version {}", self.ctx.config.package.name, version.release_tag);
    if !version.vcs_revision.is_empty() {
      title.push_str(&format!(" (revision {})", version.vcs_revision));
    }
    self.logger.banner(title);
  }

  fn complete_banner(&self) {
    self
      .logger
      .banner(format!("{} installation complete!", self.ctx.config.package.name));
  }
}
