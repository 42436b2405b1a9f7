//! Embedded static assets for the generated site.
//!
//! Both files are compiled into the binary via `include_str!` so a build
//! never depends on asset files being installed next to the executable.

/// Site stylesheet, written into `assets/site.css` of every bundle.
///
/// Token and emphasis colors are custom properties supplied by the
/// per-theme stylesheet generated from [`codewalk_core::theme::Theme::css`].
pub const STYLESHEET: &str = include_str!("assets/site.css");

/// Walkthrough hydration script, written into `assets/walkthrough.js`.
///
/// Reads the document IR embedded by the page template and drives the
/// scroll-linked step activation via `IntersectionObserver`.
pub const WALKTHROUGH_JS: &str = include_str!("assets/walkthrough.js");
