//! Error types for quast-release with contextual messages and exit codes
//!
//! Every fatal condition of a lifecycle command ends up here. Best-effort
//! paths (clean teardown, revision lookup) still produce these errors, but
//! their call sites drop them explicitly instead of propagating.

use crate::ui::Logger;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for quast-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Configuration error (wrong directory, version manifest, release.toml)
  Config = 1,
  /// A provisioner failed during build-and-package
  Provision = 2,
  /// An external command (git, archiver) exited non-zero
  Command = 3,
  /// I/O and other system errors
  System = 4,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for quast-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Configuration errors
  Config(ConfigError),

  /// Provisioner failures
  Provision(ProvisionError),

  /// External command failures
  Command(CommandError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io(err) => ReleaseError::Message {
        message: format!("{}: {}", ctx_str, err),
        context: None,
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Config(_) => ExitCode::Config,
      ReleaseError::Provision(_) => ExitCode::Provision,
      ReleaseError::Command(_) => ExitCode::Command,
      ReleaseError::Io(_) => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::System,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Provision(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Provision(e) => write!(f, "{}", e),
      ReleaseError::Command(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<ConfigError> for ReleaseError {
  fn from(err: ConfigError) -> Self {
    ReleaseError::Config(err)
  }
}

impl From<ProvisionError> for ReleaseError {
  fn from(err: ProvisionError) -> Self {
    ReleaseError::Provision(err)
  }
}

impl From<CommandError> for ReleaseError {
  fn from(err: CommandError) -> Self {
    ReleaseError::Command(err)
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<glob::PatternError> for ReleaseError {
  fn from(err: glob::PatternError) -> Self {
    ReleaseError::message(format!("Invalid glob pattern: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Invoked from a directory other than the orchestrator root
  WrongDirectory { required: PathBuf, actual: PathBuf },

  /// VERSION.txt (or the configured manifest) does not exist
  VersionFileMissing { path: PathBuf },

  /// The version manifest's first line is blank
  EmptyVersion { path: PathBuf },

  /// release.toml could not be parsed or failed validation
  Invalid { path: PathBuf, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::WrongDirectory { required, .. } => {
        Some(format!("Please, change to {} before running quast-release", required.display()))
      }
      ConfigError::VersionFileMissing { .. } | ConfigError::EmptyVersion { .. } => {
        Some("Put the release tag (e.g. 5.0.2) on the first line of the version file.".to_string())
      }
      ConfigError::Invalid { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::WrongDirectory { required, actual } => write!(
        f,
        "quast-release must run from {} (current directory: {})",
        required.display(),
        actual.display()
      ),
      ConfigError::VersionFileMissing { path } => {
        write!(f, "Version file not found: {}", path.display())
      }
      ConfigError::EmptyVersion { path } => {
        write!(f, "Version file has an empty first line: {}", path.display())
      }
      ConfigError::Invalid { path, reason } => {
        write!(f, "Invalid configuration in {}: {}", path.display(), reason)
      }
    }
  }
}

/// A provisioner failed while building or downloading its tool
#[derive(Debug)]
pub struct ProvisionError {
  pub tool: String,
  pub reason: String,
}

impl ProvisionError {
  pub fn new(tool: impl Into<String>, reason: impl Into<String>) -> Self {
    Self {
      tool: tool.into(),
      reason: reason.into(),
    }
  }

  fn help_message(&self) -> Option<String> {
    Some(format!(
      "Fix the {} build and re-run; `quast-release clean` removes partial artifacts.",
      self.tool
    ))
  }
}

impl fmt::Display for ProvisionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Failed to provision {}: {}", self.tool, self.reason)
  }
}

/// External command failures
#[derive(Debug)]
pub enum CommandError {
  /// The program could not be started at all
  Spawn { command: String, reason: String },

  /// The program ran and exited unsuccessfully
  Failed { command: String, code: i32 },
}

impl fmt::Display for CommandError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CommandError::Spawn { command, reason } => write!(f, "Failed to run `{}`: {}", command, reason),
      CommandError::Failed { command, code } => write!(f, "`{}` exited with status {}", command, code),
    }
  }
}

/// Result type alias for quast-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Report a fatal error as one log record, with help text when there is any
pub fn report_error(logger: &Logger, error: &ReleaseError) {
  match error.help_message() {
    Some(help) => logger.error(format!("{}\n💡 Help: {}", error, help)),
    None => logger.error(error),
  }
}
