//! Command-line interface
//!
//! Clap argument definitions and command handlers for the `codewalk` binary.

pub mod args;
pub mod commands;
