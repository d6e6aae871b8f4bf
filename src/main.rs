mod commands;
mod core;
mod manifest;
mod package;
mod provision;
mod ui;
mod utils;

use clap::Parser;
use crate::commands::{Collaborators, Dispatcher, Lifecycle};
use crate::core::context::ReleaseContext;
use crate::core::error::{ReleaseError, ReleaseResult, ResultExt, report_error};
use crate::core::platform::Platform;
use crate::core::runner::{CommandRunner, SystemRunner};
use crate::core::vcs::SystemGit;
use crate::package::DescriptorPackager;
use crate::provision::{CommandProvisioner, ProvisionerSet};
use crate::ui::Logger;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;

/// Build, tag, publish and clean QUAST releases
///
/// The last argument selects the lifecycle: clean, tag, publish,
/// install, develop, build or build_ext. Anything else is handed to the
/// packager untouched.
#[derive(Parser)]
#[command(name = "quast-release")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Orchestrator root; quast-release refuses to run from anywhere else
  #[arg(long, env = "QUAST_RELEASE_ROOT", default_value = env!("CARGO_MANIFEST_DIR"))]
  root: PathBuf,

  /// Log debug output
  #[arg(short, long)]
  verbose: bool,

  /// Emit logs as JSON lines
  #[arg(long)]
  json_logs: bool,

  /// Lifecycle arguments; only the final one selects the command
  #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
  args: Vec<String>,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
  ui::init_tracing(cli.json_logs, level);
  let logger = Logger::new("quast-release");

  if let Err(err) = run(cli, logger) {
    handle_error(&logger, err);
  }
}

fn run(cli: Cli, logger: Logger) -> ReleaseResult<()> {
  let cwd = std::env::current_dir().context("Failed to get current directory")?;

  // Platform is decided once here and never re-detected downstream
  let platform = Platform::detect();
  let ctx = ReleaseContext::build(&cwd, &cli.root, platform)?;

  let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner);
  let parts = Collaborators {
    provisioners: ProvisionerSet::new(CommandProvisioner::all(
      &ctx.root,
      &ctx.config,
      platform,
      runner.clone(),
    ))?,
    packager: Box::new(DescriptorPackager::new(
      logger.child("package"),
      &ctx.path(&ctx.config.package.dist_dir),
    )),
    runner,
    revisions: Box::new(SystemGit::at(&ctx.root)),
  };

  Dispatcher::new(&ctx, parts, logger.child("dispatch")).run(Lifecycle::from_args(&cli.args))
}

fn handle_error(logger: &Logger, err: ReleaseError) -> ! {
  report_error(logger, &err);
  std::process::exit(err.exit_code().as_i32());
}
