//! Site configuration validation
//!
//! Semantic validation of the deserialized `SiteConfig`. Validation
//! collects ALL issues rather than stopping at the first, so a broken
//! configuration is reported in one pass.

use codewalk_core::config::SiteConfig;
use codewalk_core::error::{Severity, ValidationIssue};
use codewalk_core::slug::Slug;

// ============================================================================
// Public API
// ============================================================================

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Site configuration validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a configuration and returns the result.
    pub fn validate(&mut self, config: &SiteConfig) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_site(config);
        self.validate_directories(config);
        self.validate_index(config);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    // ========================================================================
    // Rules
    // ========================================================================

    fn validate_site(&mut self, config: &SiteConfig) {
        if config.site.title.trim().is_empty() {
            self.add_error("site.title", "site title is required and cannot be empty");
        }

        let base = &config.site.base_path;
        if !base.is_empty() {
            if !base.starts_with('/') {
                self.add_error("site.base_path", "base path must start with '/'");
            }
            if base.ends_with('/') {
                self.add_error("site.base_path", "base path must not end with '/'");
            }
        }

        if config.theme.trim().is_empty() {
            self.add_error("theme", "theme cannot be empty");
        }
    }

    fn validate_directories(&mut self, config: &SiteConfig) {
        if config.content_dir.as_os_str().is_empty() {
            self.add_error("content_dir", "content directory cannot be empty");
        }
        if config.output_dir.as_os_str().is_empty() {
            self.add_error("output_dir", "output directory cannot be empty");
        }
        if config.content_dir == config.output_dir {
            self.add_error(
                "output_dir",
                "output directory cannot be the content directory",
            );
        }
        if let Some(public) = &config.public_dir {
            if public.as_os_str().is_empty() {
                self.add_error("public_dir", "public directory cannot be empty");
            }
            if public == &config.output_dir {
                self.add_error("public_dir", "public directory cannot be the output directory");
            }
        }
    }

    fn validate_index(&mut self, config: &SiteConfig) {
        let Some(index) = &config.index else {
            return;
        };

        if index.sections.is_empty() {
            self.add_warning("index.sections", "index has no sections");
        }

        for (si, section) in index.sections.iter().enumerate() {
            let section_path = format!("index.sections[{si}]");
            if section.heading.trim().is_empty() {
                self.add_error(&format!("{section_path}.heading"), "section heading is empty");
            }

            for (ci, course) in section.courses.iter().enumerate() {
                let course_path = format!("{section_path}.courses[{ci}]");
                if course.title.trim().is_empty() {
                    self.add_error(&format!("{course_path}.title"), "course title is empty");
                }
                match (&course.post, &course.url) {
                    (Some(_), Some(_)) => self.add_error(
                        &course_path,
                        "course sets both 'post' and 'url'; use exactly one",
                    ),
                    (None, None) => self.add_warning(
                        &course_path,
                        "course has neither 'post' nor 'url' and will render unlinked",
                    ),
                    _ => {}
                }
                if let Some(post) = &course.post
                    && let Err(e) = Slug::new(post)
                {
                    self.add_error(&format!("{course_path}.post"), &e.to_string());
                }
            }
        }
    }

    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
