//! Site configuration loader
//!
//! Loading pipeline:
//! 1. Read raw file content (UTF-8 BOM stripped)
//! 2. Environment variable expansion (pre-parse, on raw text)
//! 3. YAML parsing to the typed schema
//! 4. Validation
//! 5. Freeze with `Arc`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use codewalk_core::config::SiteConfig;
use codewalk_core::error::{ConfigError, ValidationIssue};

use crate::config::validation::Validator;

/// Result of loading a site configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: Arc<SiteConfig>,

    /// Warnings encountered during validation.
    pub warnings: Vec<ValidationIssue>,
}

/// Loads a site configuration file and returns the frozen configuration.
///
/// # Errors
///
/// Returns an error if the file cannot be read, an environment variable
/// reference cannot be expanded, YAML parsing fails, or validation fails.
pub fn load(path: &Path) -> Result<LoadResult, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
        path: path.to_path_buf(),
    })?;

    // Handle UTF-8 BOM
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

    if raw.trim().is_empty() {
        return Err(ConfigError::ParseError {
            path: path.to_path_buf(),
            line: None,
            message: "configuration file is empty".to_string(),
        });
    }

    let expanded = expand_env(raw)?;

    let config: SiteConfig =
        serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })?;

    let mut validator = Validator::new();
    let result = validator.validate(&config);

    if result.has_errors() {
        return Err(ConfigError::ValidationError {
            path: path.display().to_string(),
            errors: result.errors,
        });
    }

    Ok(LoadResult {
        config: Arc::new(config),
        warnings: result.warnings,
    })
}

/// Returns the directory relative paths in the configuration resolve
/// against: the directory containing the configuration file.
#[must_use]
pub fn base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Expands environment variable references in raw YAML text.
///
/// Supports:
/// - `${VAR}` - expand to value, error if unset
/// - `${VAR:-default}` - expand to default if unset
/// - `$$` - literal `$`
///
/// A bare `$` not followed by `{` or `$` passes through unchanged.
fn expand_env(raw: &str) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(raw.len());
    let mut line = 1usize;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
            out.push(c);
            continue;
        }
        if c != '$' {
            out.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                out.push('$');
            }
            Some('{') => {
                chars.next();
                let mut spec = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    if c == '\n' {
                        line += 1;
                    }
                    spec.push(c);
                }
                if !closed {
                    return Err(ConfigError::InvalidValue {
                        field: format!("${{{spec}"),
                        value: "unterminated reference".to_string(),
                        expected: "a closing '}'".to_string(),
                    });
                }

                let (name, default) = match spec.split_once(":-") {
                    Some((name, default)) => (name, Some(default)),
                    None => (spec.as_str(), None),
                };
                if name.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: format!("${{{spec}}}"),
                        value: "empty variable name".to_string(),
                        expected: "an environment variable name".to_string(),
                    });
                }

                match std::env::var(name) {
                    Ok(value) => out.push_str(&value),
                    Err(_) => match default {
                        Some(default) => out.push_str(default),
                        None => {
                            return Err(ConfigError::EnvVarNotSet {
                                var: name.to_string(),
                                line,
                            });
                        }
                    },
                }
            }
            _ => out.push('$'),
        }
    }

    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================
