//! Build-and-package: provision every bundled tool, then hand the manifest
//! to the packager
//!
//! Provisioning is fail-fast. The first provisioner error stops the run
//! before any later tool is built and before the packager is called.

use crate::core::context::ReleaseContext;
use crate::core::error::{ProvisionError, ReleaseError, ReleaseResult};
use crate::core::version::Version;
use crate::manifest::{ManifestBuilder, data_files};
use crate::package::{PackageSpec, Packager};
use crate::provision::ProvisionerSet;
use crate::ui::Logger;

pub fn run_provision_and_package(
  ctx: &ReleaseContext,
  command: &str,
  version: &Version,
  provisioners: &ProvisionerSet,
  packager: &dyn Packager,
  logger: &Logger,
) -> ReleaseResult<()> {
  for provisioner in provisioners.iter() {
    let kind = provisioner.kind();
    logger.info(format!("* Compiling {} *", kind.label()));
    provisioner
      .provision(&logger.child(kind.name()))
      .map_err(|e| match e {
        ReleaseError::Provision(_) => e,
        other => ProvisionError::new(kind.name(), other.to_string()).into(),
      })?;
  }

  let manifest = ManifestBuilder::new(logger.child("manifest"), &ctx.package_root()).build(ctx.platform)?;
  logger.debug(format!("Manifest has {} file(s)", manifest.len()));

  let package = &ctx.config.package;
  let spec = PackageSpec::new(
    &package.name,
    version,
    manifest,
    package.scripts.clone(),
    data_files(&ctx.root, package, ctx.platform),
    package.dependencies.clone(),
  );
  packager.package(&spec, command)
}
