//! Observability
//!
//! Logging infrastructure for the `codewalk` CLI.

pub mod logging;

pub use logging::{LogFormat, init_logging, verbosity_to_directive};
