//! Host platform detection
//!
//! Resolved once in `main` and handed to every consumer by value, so a single
//! run never sees two different platforms.

use std::fmt;

/// Platform family the bundled binaries are built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
  MacOsX,
  /// Generic Unix-like host; anything that is not macOS lands here
  Linux,
}

impl Platform {
  /// Detect the platform of the running host
  pub fn detect() -> Self {
    Self::from_os(std::env::consts::OS)
  }

  /// Map a `std::env::consts::OS` value to a platform
  pub fn from_os(os: &str) -> Self {
    match os {
      "macos" => Platform::MacOsX,
      _ => Platform::Linux,
    }
  }

  /// Directory qualifier used by platform-specific bundles
  pub fn name(self) -> &'static str {
    match self {
      Platform::MacOsX => "macosx",
      Platform::Linux => "linux",
    }
  }

  pub fn is_macos(self) -> bool {
    self == Platform::MacOsX
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
