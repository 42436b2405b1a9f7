//! Site build pipeline.
//!
//! Orchestrates the stages of a build: scan the content directory, compile
//! every source file, resolve themes, and emit the static bundle. The bundle
//! is written into a staging directory next to the output directory and
//! renamed into place only after every page rendered, so a failed build
//! leaves the previous output untouched.

pub mod emit;
pub mod manifest;
pub mod scan;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use codewalk_core::config::SiteConfig;
use codewalk_core::document::Document;
use codewalk_core::error::ConfigError;
use codewalk_core::slug::Slug;
use codewalk_core::theme::{PLAIN_THEME, Theme};

use crate::build::scan::ContentEntry;
use crate::error::{CodewalkError, Result};

// ============================================================================
// Build Results
// ============================================================================

/// A content file compiled into its document form.
#[derive(Debug)]
pub struct BuiltPost {
    /// Slug the post's routes derive from.
    pub slug: Slug,
    /// Compiled document.
    pub document: Document,
}

/// Summary of a completed build.
#[derive(Debug)]
pub struct BuildSummary {
    /// Number of content files compiled.
    pub posts: usize,
    /// Number of routes in the bundle (two per post plus the index).
    pub routes: usize,
    /// Directory the bundle was committed to.
    pub output_dir: PathBuf,
}

// ============================================================================
// Theme Resolution
// ============================================================================

/// Every theme a build needs, resolved up front.
///
/// The site-wide theme styles the themed post variant, the plain theme
/// styles the unthemed variant plus the index and the not-found page, and
/// `overrides` holds themes requested by individual posts through their
/// front matter.
#[derive(Debug)]
pub struct ThemeSet {
    site: Theme,
    plain: Theme,
    overrides: BTreeMap<String, Theme>,
}

impl ThemeSet {
    /// Resolves the site theme, the plain theme, and every per-post
    /// override named by a compiled document.
    ///
    /// # Errors
    ///
    /// Returns an error when the site theme is unknown or unreadable, or
    /// when a post names a theme that cannot be resolved. Post theme
    /// failures carry the path of the content file that requested them.
    pub fn resolve(
        config: &SiteConfig,
        posts: &[BuiltPost],
        content_dir: &Path,
        base_dir: &Path,
    ) -> Result<Self> {
        let site = Theme::resolve(&config.theme, base_dir)?;
        let plain = Theme::resolve(PLAIN_THEME, base_dir)?;

        let mut overrides = BTreeMap::new();
        for post in posts {
            if let Some(spec) = &post.document.theme
                && !overrides.contains_key(spec)
            {
                let theme = Theme::resolve(spec, base_dir).map_err(|source| {
                    CodewalkError::ContentTheme {
                        path: content_dir.join(post.slug.source_file_name()),
                        source,
                    }
                })?;
                overrides.insert(spec.clone(), theme);
            }
        }

        Ok(Self {
            site,
            plain,
            overrides,
        })
    }

    /// Theme for the themed variant of `document`.
    #[must_use]
    pub fn for_document(&self, document: &Document) -> &Theme {
        document
            .theme
            .as_ref()
            .and_then(|spec| self.overrides.get(spec))
            .unwrap_or(&self.site)
    }

    /// Theme for plain variants, the index, and the not-found page.
    #[must_use]
    pub const fn plain(&self) -> &Theme {
        &self.plain
    }

    /// Stylesheet text for every distinct theme, keyed by file stem.
    ///
    /// Themes that share a name collapse into one entry, so each theme
    /// stylesheet is written to the bundle exactly once.
    #[must_use]
    pub fn stylesheets(&self) -> BTreeMap<String, String> {
        let mut sheets = BTreeMap::new();
        for theme in [&self.site, &self.plain]
            .into_iter()
            .chain(self.overrides.values())
        {
            sheets
                .entry(theme.css_class())
                .or_insert_with(|| theme.css());
        }
        sheets
    }
}

// ============================================================================
// Build
// ============================================================================

/// Builds the static bundle described by `config`.
///
/// Relative paths in the configuration resolve against `base_dir`, the
/// directory holding the configuration file. When `output_override` is set
/// it replaces the configured output directory as given, without resolving
/// against `base_dir`.
///
/// # Errors
///
/// Fails fast on the first problem: an unreadable content directory, a file
/// whose name is not a valid slug, a compile error (with the offending
/// path), an unresolvable theme, an index entry referencing a post that
/// does not exist, or an I/O failure while writing the bundle.
pub fn build_site(
    config: &SiteConfig,
    base_dir: &Path,
    output_override: Option<&Path>,
) -> Result<BuildSummary> {
    let content_dir = base_dir.join(&config.content_dir);
    let output_dir =
        output_override.map_or_else(|| base_dir.join(&config.output_dir), Path::to_path_buf);
    let public_dir = config.public_dir.as_ref().map(|dir| base_dir.join(dir));

    let entries = scan::scan_content(&content_dir)?;
    tracing::debug!(count = entries.len(), "content scan complete");

    let mut posts = Vec::with_capacity(entries.len());
    for entry in &entries {
        posts.push(compile_entry(entry)?);
    }

    if let Some((field, slug)) = dangling_index_posts(config, &entries).into_iter().next() {
        return Err(ConfigError::InvalidValue {
            field,
            value: slug,
            expected: "the slug of an existing content file".to_string(),
        }
        .into());
    }

    let themes = ThemeSet::resolve(config, &posts, &content_dir, base_dir)?;

    let staging_parent = parent_dir(&output_dir);
    std::fs::create_dir_all(&staging_parent)?;
    let staging = tempfile::Builder::new()
        .prefix(".codewalk-build-")
        .tempdir_in(&staging_parent)?;

    let writer = emit::BundleWriter::new(config, &themes, public_dir.as_deref());
    writer.write_bundle(staging.path(), &posts)?;

    commit(staging, &output_dir)?;

    let routes = posts.len() * 2 + 1;
    Ok(BuildSummary {
        posts: posts.len(),
        routes,
        output_dir,
    })
}

/// Reads and compiles a single content file.
///
/// # Errors
///
/// Read failures and compile failures both carry the file's path.
pub fn compile_entry(entry: &ContentEntry) -> Result<BuiltPost> {
    let source = std::fs::read_to_string(&entry.path).map_err(|e| {
        CodewalkError::Io(std::io::Error::new(
            e.kind(),
            format!("cannot read {}: {e}", entry.path.display()),
        ))
    })?;
    let document =
        codewalk_render::compile(&source, &entry.slug).map_err(|source| CodewalkError::Content {
            path: entry.path.clone(),
            source,
        })?;
    Ok(BuiltPost {
        slug: entry.slug.clone(),
        document,
    })
}

/// Index course entries whose `post` slug matches no scanned content file.
///
/// Returns `(field path, slug)` pairs in declaration order.
fn dangling_index_posts(config: &SiteConfig, entries: &[ContentEntry]) -> Vec<(String, String)> {
    let mut dangling = Vec::new();
    let Some(index) = &config.index else {
        return dangling;
    };
    for (si, section) in index.sections.iter().enumerate() {
        for (ci, course) in section.courses.iter().enumerate() {
            if let Some(post) = &course.post
                && !entries.iter().any(|entry| entry.slug.as_str() == post)
            {
                dangling.push((
                    format!("index.sections[{si}].courses[{ci}].post"),
                    post.clone(),
                ));
            }
        }
    }
    dangling
}

/// Swaps the staged bundle into place.
///
/// The staging directory lives on the same filesystem as the output
/// directory, so the final rename is atomic on platforms that support it.
fn commit(staging: tempfile::TempDir, output_dir: &Path) -> Result<()> {
    let staged = staging.keep();
    match std::fs::metadata(output_dir) {
        Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(output_dir)?,
        Ok(_) => std::fs::remove_file(output_dir)?,
        Err(_) => {}
    }
    if let Err(e) = std::fs::rename(&staged, output_dir) {
        let _ = std::fs::remove_dir_all(&staged);
        return Err(e.into());
    }
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

// ============================================================================
// Check
// ============================================================================

/// Outcome for one post in a check run.
#[derive(Debug, Serialize)]
pub struct PostReport {
    /// Post slug.
    pub slug: String,
    /// Title from the source file.
    pub title: String,
    /// Number of walkthrough steps across the document.
    pub steps: usize,
}

/// A problem found while checking, attributed to the file that caused it.
#[derive(Debug, Serialize)]
pub struct Problem {
    /// Offending file.
    pub path: PathBuf,
    /// What is wrong with it.
    pub message: String,
}

/// Everything a check run learned about the site.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Posts that compiled, in slug order.
    pub posts: Vec<PostReport>,
    /// Problems found, in discovery order.
    pub problems: Vec<Problem>,
}

/// Checks content and configuration without writing any output.
///
/// Unlike [`build_site`], a problem does not stop the pass. Every invalid
/// file name, compile failure, unresolvable theme, and dangling index
/// reference is collected so one run reports them all. Config-level
/// problems are attributed to `config_path`.
///
/// # Errors
///
/// Only infrastructure failures abort the pass, such as an unreadable
/// content directory.
pub fn check_site(
    config: &SiteConfig,
    base_dir: &Path,
    config_path: &Path,
) -> Result<CheckReport> {
    let content_dir = base_dir.join(&config.content_dir);
    let outcome = scan::scan_outcome(&content_dir)?;

    let mut posts = Vec::new();
    let mut problems = Vec::new();

    for (path, err) in outcome.rejected {
        problems.push(Problem {
            path,
            message: err.to_string(),
        });
    }

    for entry in &outcome.entries {
        match compile_entry(entry) {
            Ok(post) => {
                if let Some(spec) = &post.document.theme
                    && let Err(e) = Theme::resolve(spec, base_dir)
                {
                    problems.push(Problem {
                        path: entry.path.clone(),
                        message: e.to_string(),
                    });
                }
                posts.push(PostReport {
                    slug: post.slug.as_str().to_string(),
                    title: post.document.title.clone(),
                    steps: post.document.step_count(),
                });
            }
            Err(CodewalkError::Content { path, source }) => {
                problems.push(Problem {
                    path,
                    message: source.to_string(),
                });
            }
            Err(other) => return Err(other),
        }
    }

    if let Err(e) = Theme::resolve(&config.theme, base_dir) {
        problems.push(Problem {
            path: config_path.to_path_buf(),
            message: e.to_string(),
        });
    }

    for (field, slug) in dangling_index_posts(config, &outcome.entries) {
        problems.push(Problem {
            path: config_path.to_path_buf(),
            message: format!("{field} references unknown post '{slug}'"),
        });
    }

    Ok(CheckReport { posts, problems })
}

// ============================================================================
// Tests
// ============================================================================
