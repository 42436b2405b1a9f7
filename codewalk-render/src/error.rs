//! Render error types
//!
//! [`CompileError`] covers everything that can be wrong with a content
//! file. Every variant carries the 1-based source line, so callers can
//! point at the exact spot after prefixing the file path.

use thiserror::Error;

/// Content compilation errors.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Frontmatter block is malformed
    #[error("frontmatter error (line {line}): {message}")]
    Frontmatter {
        /// Line within the frontmatter block
        line: usize,
        /// Error message from the YAML parser
        message: String,
    },

    /// A walkthrough section was opened but never closed
    #[error("walkthrough opened on line {line} is never closed (missing ':::')")]
    UnterminatedWalkthrough {
        /// Line of the opening sentinel
        line: usize,
    },

    /// A walkthrough section was opened inside another one
    #[error("nested walkthrough on line {line}")]
    NestedWalkthrough {
        /// Line of the inner opening sentinel
        line: usize,
    },

    /// A closing sentinel appeared outside any walkthrough
    #[error("':::' on line {line} does not close anything")]
    StrayClose {
        /// Line of the stray sentinel
        line: usize,
    },

    /// A paragraph starts like a sentinel but is not one
    #[error("malformed walkthrough marker on line {line}: '{text}'")]
    BadSentinel {
        /// Line of the paragraph
        line: usize,
        /// The paragraph text as written
        text: String,
    },

    /// A walkthrough step has no code fence
    #[error("walkthrough step ending on line {line} has no code fence")]
    StepWithoutCode {
        /// Line of the step boundary
        line: usize,
    },

    /// A walkthrough step has more than one code fence
    #[error("walkthrough step has a second code fence on line {line}")]
    MultipleSnippets {
        /// Line of the extra fence
        line: usize,
    },

    /// A fence info string could not be parsed
    #[error("bad code annotation on line {line}: {message}")]
    InvalidAnnotation {
        /// Line of the fence
        line: usize,
        /// What was wrong with it
        message: String,
    },

    /// A focus or mark annotation points past the end of the snippet
    #[error("annotation on line {line} references line {target}, but the snippet has {len} lines")]
    AnnotationOutOfRange {
        /// Line of the fence
        line: usize,
        /// The referenced snippet line
        target: usize,
        /// Number of lines in the snippet
        len: usize,
    },
}

impl CompileError {
    /// The 1-based source line the error points at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Frontmatter { line, .. }
            | Self::UnterminatedWalkthrough { line }
            | Self::NestedWalkthrough { line }
            | Self::StrayClose { line }
            | Self::BadSentinel { line, .. }
            | Self::StepWithoutCode { line }
            | Self::MultipleSnippets { line }
            | Self::InvalidAnnotation { line, .. }
            | Self::AnnotationOutOfRange { line, .. } => *line,
        }
    }
}

/// Errors while rendering the IR into bundle artifacts.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Document IR could not be serialized for page embedding
    #[error("failed to serialize document IR: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_reports_line() {
        let err = CompileError::StepWithoutCode { line: 12 };
        assert_eq!(err.line(), 12);
        assert!(err.to_string().contains("line 12"));
    }

    #[test]
    fn test_annotation_out_of_range_display() {
        let err = CompileError::AnnotationOutOfRange {
            line: 3,
            target: 40,
            len: 12,
        };
        let msg = err.to_string();
        assert!(msg.contains("line 40"));
        assert!(msg.contains("12 lines"));
    }
}
