//! External command execution
//!
//! Lifecycle commands that shell out (tagging, publishing, provisioner
//! builds) go through [`CommandRunner`] so the dispatcher can be exercised
//! without touching git or make.

use crate::core::error::{CommandError, ReleaseError, ReleaseResult};
use std::path::Path;
use std::process::Command;

pub trait CommandRunner {
  /// Run `program args...` in `cwd` to completion and return its exit code.
  /// Only a failure to start the program is an error.
  fn run(&self, program: &str, args: &[String], cwd: &Path) -> ReleaseResult<i32>;

  /// Run and turn a non-zero exit into [`CommandError::Failed`]
  fn run_checked(&self, program: &str, args: &[String], cwd: &Path) -> ReleaseResult<()> {
    let code = self.run(program, args, cwd)?;
    if code != 0 {
      return Err(ReleaseError::Command(CommandError::Failed {
        command: display_command(program, args),
        code,
      }));
    }
    Ok(())
  }
}

/// Runs commands with inherited stdio, blocking until they exit
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn run(&self, program: &str, args: &[String], cwd: &Path) -> ReleaseResult<i32> {
    let status = Command::new(program).args(args).current_dir(cwd).status().map_err(|e| {
      ReleaseError::Command(CommandError::Spawn {
        command: display_command(program, args),
        reason: e.to_string(),
      })
    })?;

    // Killed by a signal: no code, report as generic failure
    Ok(status.code().unwrap_or(-1))
  }
}

/// Human-readable command line for logs and errors
pub fn display_command(program: &str, args: &[String]) -> String {
  let mut line = program.to_string();
  for arg in args {
    line.push(' ');
    if arg.is_empty() || arg.contains(char::is_whitespace) {
      line.push_str(&format!("{:?}", arg));
    } else {
      line.push_str(arg);
    }
  }
  line
}
