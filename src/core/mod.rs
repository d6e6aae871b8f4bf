//! Core engine for quast-release
//!
//! - **config**: release.toml parsing and validation
//! - **context**: per-invocation context (root, config, platform) and the working-directory check
//! - **error**: error types with exit codes and help messages
//! - **platform**: host platform detection
//! - **runner**: external command execution
//! - **vcs**: git queries (SystemGit)
//! - **version**: version manifest resolution and the generated version record

pub mod config;
pub mod context;
pub mod error;
pub mod platform;
pub mod runner;
pub mod vcs;
pub mod version;
