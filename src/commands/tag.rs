//! `tag`: annotate the current commit with the release tag and push tags

use crate::core::context::ReleaseContext;
use crate::core::error::ReleaseResult;
use crate::core::runner::{CommandRunner, display_command};
use crate::core::version::Version;
use crate::ui::Logger;

/// `git tag -a <tag> -m "Version <tag>"` followed by `git push --tags`.
///
/// The push only happens after the tag was created. No check is made that the
/// working tree is clean or that the tag is new; git reports those itself.
pub fn run_tag(ctx: &ReleaseContext, version: &Version, runner: &dyn CommandRunner, logger: &Logger) -> ReleaseResult<()> {
  let tag = &version.release_tag;

  let create = tag_args(tag);
  logger.info(format!("Running {}", display_command("git", &create)));
  runner.run_checked("git", &create, &ctx.root)?;

  let push = vec!["push".to_string(), "--tags".to_string()];
  logger.info(format!("Running {}", display_command("git", &push)));
  runner.run_checked("git", &push, &ctx.root)?;

  logger.info(format!("Tagged and pushed {}", tag));
  Ok(())
}

fn tag_args(tag: &str) -> Vec<String> {
  vec![
    "tag".to_string(),
    "-a".to_string(),
    tag.to_string(),
    "-m".to_string(),
    format!("Version {}", tag),
  ]
}
