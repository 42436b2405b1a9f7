//! Content slugs
//!
//! A slug is the stem of a content file (`build-your-own-redux.mdx` has the
//! slug `build-your-own-redux`) and is the single path component of every
//! route the page is published under. Validation only refuses names that
//! would escape or shadow the output tree; case and punctuation are kept
//! exactly as the author wrote them.

use crate::error::SlugError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The file extension content files must carry.
pub const CONTENT_EXTENSION: &str = "mdx";

/// A validated content slug.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Validates a file stem as a slug.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError`] if the stem is empty, begins with a dot, or
    /// contains a path separator.
    pub fn new(stem: &str) -> Result<Self, SlugError> {
        if stem.is_empty() {
            return Err(SlugError::Empty);
        }
        if stem.starts_with('.') {
            return Err(SlugError::DotFile {
                name: stem.to_string(),
            });
        }
        if stem.contains('/') || stem.contains('\\') {
            return Err(SlugError::Separator {
                name: stem.to_string(),
            });
        }
        Ok(Self(stem.to_string()))
    }

    /// The slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Route of the primary (themed) page: `/post/<slug>/`.
    #[must_use]
    pub fn primary_route(&self) -> String {
        format!("/post/{}/", self.0)
    }

    /// Route of the secondary top-level variant: `/<slug>/`.
    #[must_use]
    pub fn secondary_route(&self) -> String {
        format!("/{}/", self.0)
    }

    /// Output file of the primary page, relative to the bundle root.
    #[must_use]
    pub fn primary_output(&self) -> PathBuf {
        ["post", self.0.as_str(), "index.html"].iter().collect()
    }

    /// Output file of the secondary variant, relative to the bundle root.
    #[must_use]
    pub fn secondary_output(&self) -> PathBuf {
        [self.0.as_str(), "index.html"].iter().collect()
    }

    /// Source file name the slug was derived from.
    #[must_use]
    pub fn source_file_name(&self) -> String {
        format!("{}.{CONTENT_EXTENSION}", self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slug() {
        let slug = Slug::new("build-your-own-redux").unwrap();
        assert_eq!(slug.as_str(), "build-your-own-redux");
        assert_eq!(slug.primary_route(), "/post/build-your-own-redux/");
        assert_eq!(slug.secondary_route(), "/build-your-own-redux/");
    }

    #[test]
    fn test_case_is_preserved() {
        let slug = Slug::new("ReactBasics").unwrap();
        assert_eq!(slug.as_str(), "ReactBasics");
    }

    #[test]
    fn test_empty_stem_rejected() {
        assert_eq!(Slug::new(""), Err(SlugError::Empty));
    }

    #[test]
    fn test_dot_stems_rejected() {
        assert!(matches!(Slug::new("."), Err(SlugError::DotFile { .. })));
        assert!(matches!(Slug::new(".."), Err(SlugError::DotFile { .. })));
        assert!(matches!(
            Slug::new(".hidden"),
            Err(SlugError::DotFile { .. })
        ));
    }

    #[test]
    fn test_separators_rejected() {
        assert!(matches!(
            Slug::new("a/b"),
            Err(SlugError::Separator { .. })
        ));
        assert!(matches!(
            Slug::new("a\\b"),
            Err(SlugError::Separator { .. })
        ));
    }

    #[test]
    fn test_output_paths() {
        let slug = Slug::new("react-basics").unwrap();
        assert_eq!(
            slug.primary_output(),
            PathBuf::from("post/react-basics/index.html")
        );
        assert_eq!(
            slug.secondary_output(),
            PathBuf::from("react-basics/index.html")
        );
        assert_eq!(slug.source_file_name(), "react-basics.mdx");
    }
}
