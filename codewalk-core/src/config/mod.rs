//! Site configuration schema
//!
//! Types deserialized from `codewalk.yaml`. Loading and validation live in
//! the `codewalk` binary crate; this module only defines the shape.

pub mod schema;

pub use schema::*;
