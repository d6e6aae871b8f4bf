//! Logging for lifecycle commands
//!
//! `main` installs a `tracing` subscriber once; components never reach for a
//! global handle. Each one is constructed with a [`Logger`] naming it, and every
//! record carries that name in a `component` field.

use std::fmt::Display;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Install the global subscriber. `RUST_LOG` wins over `level` when set.
pub fn init_tracing(json: bool, level: Level) {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

  if json {
    tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt::layer().with_target(false).with_writer(std::io::stderr).json())
      .try_init()
      .ok();
  } else {
    tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
      .try_init()
      .ok();
  }
}

/// Logger handle passed into component constructors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Logger {
  component: &'static str,
}

impl Logger {
  pub fn new(component: &'static str) -> Self {
    Self { component }
  }

  /// Logger for a collaborator created by this component
  pub fn child(&self, component: &'static str) -> Self {
    Self { component }
  }

  pub fn component(&self) -> &'static str {
    self.component
  }

  pub fn debug(&self, msg: impl Display) {
    tracing::debug!(component = self.component, "{}", msg);
  }

  pub fn info(&self, msg: impl Display) {
    tracing::info!(component = self.component, "{}", msg);
  }

  pub fn warn(&self, msg: impl Display) {
    tracing::warn!(component = self.component, "{}", msg);
  }

  pub fn error(&self, msg: impl Display) {
    tracing::error!(component = self.component, "{}", msg);
  }

  /// Framed multi-line banner, one record per line
  pub fn banner(&self, title: impl Display) {
    let title = title.to_string();
    let width = title.lines().map(|l| l.chars().count()).max().unwrap_or(0) + 2;
    let rule = "-".repeat(width);
    self.info(&rule);
    for line in title.lines() {
      self.info(format!(" {}", line));
    }
    self.info(&rule);
  }
}
