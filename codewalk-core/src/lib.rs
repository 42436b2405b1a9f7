//! `codewalk` Core — shared types, configuration schema, and document IR
//!
//! This crate provides the site configuration types, the compiled document
//! intermediate representation, code themes, and error types shared across
//! `codewalk` (CLI/build/server) and `codewalk-render` (content compilation).

pub mod config;
pub mod document;
pub mod error;
pub mod slug;
pub mod theme;
