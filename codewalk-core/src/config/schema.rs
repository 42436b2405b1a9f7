//! Site configuration schema types
//!
//! These types are deserialized from the `codewalk.yaml` site configuration.
//! Defaults follow the conventional project layout: content in `posts/`,
//! output in `dist/`, the `dracula-soft` theme on themed pages.

use crate::theme::DEFAULT_THEME;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Top-Level Configuration
// ============================================================================

/// Root configuration for a codewalk site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct SiteConfig {
    /// Site metadata (required)
    pub site: SiteMetadata,

    /// Directory holding `.mdx` content files
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Directory the static bundle is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Directory of files copied verbatim into the bundle root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_dir: Option<PathBuf>,

    /// Theme for the themed `/post/` pages: a built-in name or a JSON file path
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Navigation index page content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexConfig>,
}

/// Site identification and serving prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SiteMetadata {
    /// Site title (required), used on the index page and in page titles
    pub title: String,

    /// Site description for the index page meta tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Path prefix every internal link carries (e.g. `/my-course-site`)
    #[serde(default)]
    pub base_path: String,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("posts")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

// ============================================================================
// Navigation Index
// ============================================================================

/// Content of the generated index page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IndexConfig {
    /// Introductory paragraphs (markdown)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intro: Vec<String>,

    /// Course sections in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionConfig>,
}

/// One course section of the index page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SectionConfig {
    /// Section heading
    pub heading: String,

    /// Paragraph shown under the heading (markdown)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blurb: Option<String>,

    /// Courses listed in this section
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub courses: Vec<CourseConfig>,
}

/// One course entry: either an internal post or an external link,
/// optionally paired with a sandbox link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CourseConfig {
    /// Displayed course title
    pub title: String,

    /// Slug of an internal post (mutually exclusive with `url`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<String>,

    /// External course URL (mutually exclusive with `post`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// External sandbox URL shown next to the course link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox: Option<String>,
}
