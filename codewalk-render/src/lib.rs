//! `codewalk` Render — content compilation and HTML rendering
//!
//! Turns `.mdx` content files into the portable document IR (markdown with
//! annotated code fences and walkthrough sections) and renders the IR into
//! the static pages of the site bundle.

pub mod annotation;
pub mod assets;
pub mod diff;
pub mod error;
pub mod frontmatter;
pub mod highlight;
pub mod html;
pub mod markdown;

pub use error::{CompileError, RenderError};
pub use markdown::compile;
