//! `codewalk` - Static site generator for code walkthrough courses
//!
//! This library provides the build pipeline, preview server, and CLI
//! plumbing behind the `codewalk` binary. Content compilation and page
//! rendering live in the `codewalk-render` crate; shared types in
//! `codewalk-core`.

pub mod build;
pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod server;
pub mod watch;
