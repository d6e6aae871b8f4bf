//! `clean`: tear down every bundled tool and drop packaging leftovers
//!
//! Best effort throughout. A provisioner that fails or has nothing to clean
//! is logged and the next one still runs; `clean` itself only fails when it
//! cannot run at all.

use crate::core::context::ReleaseContext;
use crate::core::error::ReleaseResult;
use crate::provision::{ProvisionerSet, Teardown};
use crate::ui::Logger;
use std::fs;
use std::path::PathBuf;

/// Tear down all provisioners in fixed order, then remove build outputs
pub fn run_clean(ctx: &ReleaseContext, provisioners: &ProvisionerSet, logger: &Logger) -> ReleaseResult<()> {
  logger.info("Cleaning up binary files...");

  for provisioner in provisioners.iter() {
    let kind = provisioner.kind();
    match provisioner.teardown(&logger.child(kind.name())) {
      Ok(Teardown::Cleaned) => logger.debug(format!("{}: cleaned", kind)),
      Ok(Teardown::NothingToClean) => logger.debug(format!("{}: nothing to clean", kind)),
      Err(e) => logger.warn(format!("{}: teardown failed, continuing: {}", kind, e)),
    }
  }

  for dir in leftover_dirs(ctx) {
    let target = ctx.path(&dir);
    if !target.is_dir() {
      continue;
    }
    match fs::remove_dir_all(&target) {
      Ok(()) => logger.debug(format!("Removed {}", dir.display())),
      Err(e) => logger.warn(format!("Could not remove {}: {}", dir.display(), e)),
    }
  }

  logger.info("Done.");
  Ok(())
}

/// Packaging outputs removed after teardown, relative to the root
fn leftover_dirs(ctx: &ReleaseContext) -> Vec<PathBuf> {
  vec![
    PathBuf::from("build"),
    ctx.config.package.dist_dir.clone(),
    PathBuf::from(format!("{}.egg-info", ctx.config.package.name)),
  ]
}
