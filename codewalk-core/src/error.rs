//! Core error types for `codewalk`
//!
//! Configuration, slug, and theme error types shared across the workspace.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
///
/// These errors cover all failure modes during site configuration reading,
/// environment expansion, parsing, and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}{}: {message}", line.map_or_else(String::new, |l| format!(" (line {l})")))]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Configuration validation failed
    #[error("validation failed for {path}")]
    ValidationError {
        /// Path to the configuration file
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// Environment variable referenced in configuration is not set
    #[error("environment variable '{var}' not set (referenced on line {line})")]
    EnvVarNotSet {
        /// Name of the environment variable
        var: String,
        /// Line in the configuration where it was referenced
        line: usize,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found during site configuration validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// YAML path to the problematic field (e.g., "index.sections[2].courses[0]")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - validation failure that prevents the configuration from being used
    Error,
    /// Warning - potential issue that does not prevent configuration loading
    Warning,
}

// ============================================================================
// Slug Errors
// ============================================================================

/// Rejected content file names.
///
/// Slugs come straight from file stems, so the only names refused are the
/// ones that would escape or shadow the output tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    /// The file stem was empty
    #[error("empty slug")]
    Empty,

    /// The file stem begins with a dot (includes "." and "..")
    #[error("slug '{name}' begins with a dot")]
    DotFile {
        /// The offending file stem
        name: String,
    },

    /// The file stem contains a path separator
    #[error("slug '{name}' contains a path separator")]
    Separator {
        /// The offending file stem
        name: String,
    },
}

// ============================================================================
// Theme Errors
// ============================================================================

/// Theme resolution and loading errors.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Requested theme is not a built-in and not a file path
    #[error("unknown theme '{name}' (built-in themes: {available})")]
    UnknownTheme {
        /// The requested theme name
        name: String,
        /// Comma-separated list of built-in theme names
        available: String,
    },

    /// Theme file could not be read
    #[error("failed to read theme file {path}: {source}")]
    ReadError {
        /// Path to the theme file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Theme file is not valid theme JSON
    #[error("invalid theme file {path}: {message}")]
    ParseError {
        /// Path to the theme file
        path: PathBuf,
        /// Error message from the parser
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_issue_display() {
        let issue = ValidationIssue {
            path: "index.sections[0].courses[1]".to_string(),
            message: "course sets both 'post' and 'url'".to_string(),
            severity: Severity::Error,
        };
        assert_eq!(
            issue.to_string(),
            "error: course sets both 'post' and 'url' at index.sections[0].courses[1]"
        );
    }

    #[test]
    fn test_validation_issue_warning_display() {
        let issue = ValidationIssue {
            path: "index.sections".to_string(),
            message: "no sections defined".to_string(),
            severity: Severity::Warning,
        };
        assert_eq!(
            issue.to_string(),
            "warning: no sections defined at index.sections"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ParseError {
            path: PathBuf::from("codewalk.yaml"),
            line: Some(42),
            message: "unexpected token".to_string(),
        };
        assert!(err.to_string().contains("codewalk.yaml"));
        assert!(err.to_string().contains("(line 42)"));
        assert!(err.to_string().contains("unexpected token"));
    }

    #[test]
    fn test_config_error_display_without_line() {
        let err = ConfigError::ParseError {
            path: PathBuf::from("codewalk.yaml"),
            line: None,
            message: "bad".to_string(),
        };
        assert!(!err.to_string().contains("line"));
    }

    #[test]
    fn test_slug_error_display() {
        let err = SlugError::DotFile {
            name: "..".to_string(),
        };
        assert_eq!(err.to_string(), "slug '..' begins with a dot");
    }

    #[test]
    fn test_theme_error_lists_builtins() {
        let err = ThemeError::UnknownTheme {
            name: "solarized".to_string(),
            available: "dracula-soft, github-light".to_string(),
        };
        assert!(err.to_string().contains("solarized"));
        assert!(err.to_string().contains("dracula-soft"));
    }
}
