//! Site configuration loading and validation
//!
//! The configuration schema lives in `codewalk-core` so the render crate
//! can share it; this module owns the loading pipeline (read, environment
//! expansion, parse, validate, freeze).

pub mod loader;
pub mod validation;

pub use loader::{LoadResult, base_dir, load};
