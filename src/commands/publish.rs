//! `publish`: produce a source archive of the release
//!
//! Runs the `[publish] command` from release.toml (a `git archive` of HEAD by
//! default). Publishing is not release-ready: the archive is whatever the
//! command produces and nothing is uploaded, so every run warns about it.

use crate::core::context::ReleaseContext;
use crate::core::error::{CommandError, ReleaseError, ReleaseResult, ResultExt};
use crate::core::runner::{CommandRunner, display_command};
use crate::core::version::Version;
use crate::ui::Logger;
use crate::utils::to_manifest_path;
use std::fs;

pub fn run_publish(
  ctx: &ReleaseContext,
  version: &Version,
  runner: &dyn CommandRunner,
  logger: &Logger,
) -> ReleaseResult<()> {
  logger.warn("publish is not production-ready: it builds a local source archive and uploads nothing");

  let dist = ctx.path(&ctx.config.package.dist_dir);
  fs::create_dir_all(&dist).with_context(|| format!("Failed to create {}", dist.display()))?;

  let argv = ctx.config.publish.render(
    &ctx.config.package.name,
    &version.release_tag,
    &to_manifest_path(&ctx.config.package.dist_dir),
  );
  let Some((program, args)) = argv.split_first() else {
    return Err(ReleaseError::message("publish.command is empty"));
  };

  let command = display_command(program, args);
  logger.info(format!("Running {}", command));
  let code = runner.run(program, args, &ctx.root)?;
  if code != 0 {
    return Err(ReleaseError::Command(CommandError::Failed { command, code }));
  }

  logger.info(format!("Archived {} {}", ctx.config.package.name, version.release_tag));
  Ok(())
}
