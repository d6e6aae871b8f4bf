//! Operator-facing output: the tracing subscriber and the per-component logger

pub mod logger;

pub use logger::{Logger, init_tracing};
