//! Content directory scanning
//!
//! Enumerates the content files that become routes. Only direct children
//! of the content directory with the content extension are considered;
//! the listing is sorted by slug so builds are deterministic.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use codewalk_core::error::SlugError;
use codewalk_core::slug::{CONTENT_EXTENSION, Slug};

use crate::error::CodewalkError;

/// One content file selected for the build.
#[derive(Debug, Clone)]
pub struct ContentEntry {
    /// Route slug derived from the file stem.
    pub slug: Slug,
    /// Path to the source file.
    pub path: PathBuf,
}

/// Result of a scan, with invalid file names kept aside.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Valid content files sorted by slug.
    pub entries: Vec<ContentEntry>,
    /// Content files whose stem cannot become a slug, in directory order.
    pub rejected: Vec<(PathBuf, SlugError)>,
}

/// Scans the content directory, collecting invalid names instead of
/// failing on them.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be read.
pub fn scan_outcome(dir: &Path) -> Result<ScanOutcome, CodewalkError> {
    let reader = std::fs::read_dir(dir).map_err(|e| {
        CodewalkError::Io(std::io::Error::new(
            e.kind(),
            format!("cannot read content directory {}: {e}", dir.display()),
        ))
    })?;

    let mut entries = Vec::new();
    let mut rejected = Vec::new();
    for item in reader {
        let item = item?;
        let path = item.path();

        let is_file = std::fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false);
        if !is_file {
            tracing::debug!(path = %path.display(), "skipping non-file entry");
            continue;
        }
        if path.extension().and_then(OsStr::to_str) != Some(CONTENT_EXTENSION) {
            tracing::debug!(path = %path.display(), "skipping non-content file");
            continue;
        }

        let stem = path.file_stem().and_then(OsStr::to_str).unwrap_or_default();
        match Slug::new(stem) {
            Ok(slug) => entries.push(ContentEntry { slug, path }),
            Err(source) => rejected.push((path, source)),
        }
    }

    entries.sort_by(|a, b| a.slug.cmp(&b.slug));
    Ok(ScanOutcome { entries, rejected })
}

/// Scans the content directory for the build.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be read, or a slug error
/// naming the offending file if a file stem cannot become a route.
pub fn scan_content(dir: &Path) -> Result<Vec<ContentEntry>, CodewalkError> {
    let outcome = scan_outcome(dir)?;
    if let Some((path, source)) = outcome.rejected.into_iter().next() {
        return Err(CodewalkError::Slug { path, source });
    }
    Ok(outcome.entries)
}
