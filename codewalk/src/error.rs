//! Error types for the `codewalk` CLI
//!
//! Aggregates the domain errors from the core and render crates and maps
//! each failure class to a process exit code.

use std::path::PathBuf;
use thiserror::Error;

use codewalk_core::error::{ConfigError, SlugError, ThemeError};
use codewalk_render::{CompileError, RenderError};

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `codewalk` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, validation failure, bad theme)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Content error (a content file failed to compile)
    pub const CONTENT_ERROR: i32 = 4;

    /// Preview server error (bind failure, watcher failure)
    pub const SERVER_ERROR: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `codewalk` operations.
///
/// This enum aggregates all domain-specific errors and provides
/// a unified interface for error handling and exit code mapping.
#[derive(Debug, Error)]
pub enum CodewalkError {
    /// Site configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Site-level theme resolution error
    #[error(transparent)]
    Theme(#[from] ThemeError),

    /// A content file failed to compile
    #[error("{path}: {source}")]
    Content {
        /// Path to the offending content file
        path: PathBuf,
        /// The compilation failure
        #[source]
        source: CompileError,
    },

    /// A content file requested a theme that could not be resolved
    #[error("{path}: {source}")]
    ContentTheme {
        /// Path to the offending content file
        path: PathBuf,
        /// The theme resolution failure
        #[source]
        source: ThemeError,
    },

    /// A content file name cannot become a route
    #[error("{path}: {source}")]
    Slug {
        /// Path to the offending content file
        path: PathBuf,
        /// The slug failure
        #[source]
        source: SlugError,
    },

    /// One or more content files failed `check`
    #[error("content check failed with {count} {}", if *count == 1 { "error" } else { "errors" })]
    CheckFailed {
        /// Number of problems found
        count: usize,
    },

    /// Page rendering error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Preview server error
    #[error("server error: {0}")]
    Server(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodewalkError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Theme(_) => ExitCode::CONFIG_ERROR,
            Self::Content { .. } | Self::ContentTheme { .. } | Self::Slug { .. } => {
                ExitCode::CONTENT_ERROR
            }
            Self::CheckFailed { .. } => ExitCode::CONTENT_ERROR,
            Self::Render(_) | Self::Json(_) => ExitCode::ERROR,
            Self::Server(_) => ExitCode::SERVER_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

/// Result type alias for `codewalk` operations.
pub type Result<T> = std::result::Result<T, CodewalkError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::SUCCESS, 0);
        assert_eq!(ExitCode::ERROR, 1);
        assert_eq!(ExitCode::CONFIG_ERROR, 2);
        assert_eq!(ExitCode::IO_ERROR, 3);
        assert_eq!(ExitCode::CONTENT_ERROR, 4);
        assert_eq!(ExitCode::SERVER_ERROR, 5);
        assert_eq!(ExitCode::USAGE_ERROR, 64);
        assert_eq!(ExitCode::INTERRUPTED, 130);
        assert_eq!(ExitCode::TERMINATED, 143);
    }

    #[test]
    fn test_config_error_exit_code() {
        let err: CodewalkError = ConfigError::MissingFile {
            path: PathBuf::from("/x"),
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::CONFIG_ERROR);
    }

    #[test]
    fn test_content_error_exit_code_and_path() {
        let err = CodewalkError::Content {
            path: PathBuf::from("posts/broken.mdx"),
            source: CompileError::UnterminatedWalkthrough { line: 7 },
        };
        assert_eq!(err.exit_code(), ExitCode::CONTENT_ERROR);
        let text = err.to_string();
        assert!(text.contains("posts/broken.mdx"), "got: {text}");
        assert!(text.contains("line 7"), "got: {text}");
    }

    #[test]
    fn test_slug_error_exit_code() {
        let err = CodewalkError::Slug {
            path: PathBuf::from("posts/.hidden.mdx"),
            source: SlugError::DotFile {
                name: ".hidden".to_string(),
            },
        };
        assert_eq!(err.exit_code(), ExitCode::CONTENT_ERROR);
    }

    #[test]
    fn test_io_error_exit_code() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err: CodewalkError = io_err.into();
        assert_eq!(err.exit_code(), ExitCode::IO_ERROR);
    }

    #[test]
    fn test_server_error_exit_code() {
        let err = CodewalkError::Server("bind failed".to_string());
        assert_eq!(err.exit_code(), ExitCode::SERVER_ERROR);
        assert_eq!(err.to_string(), "server error: bind failed");
    }

    #[test]
    fn test_check_failed_display() {
        let one = CodewalkError::CheckFailed { count: 1 };
        let many = CodewalkError::CheckFailed { count: 3 };
        assert_eq!(one.to_string(), "content check failed with 1 error");
        assert_eq!(many.to_string(), "content check failed with 3 errors");
    }

    #[test]
    fn test_theme_error_exit_code() {
        let err: CodewalkError = ThemeError::UnknownTheme {
            name: "solarized".to_string(),
            available: "dracula-soft, github-light".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::CONFIG_ERROR);
    }
}
