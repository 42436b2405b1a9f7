//! Frontmatter parsing
//!
//! Content files may open with a YAML block between `---` lines. Only
//! `title`, `description`, and `theme` mean anything to the renderer;
//! other keys are kept (in order) so tooling can round-trip them.

use crate::error::CompileError;
use indexmap::IndexMap;
use serde::Deserialize;

/// Parsed frontmatter of a content file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FrontMatter {
    /// Page title
    #[serde(default)]
    pub title: Option<String>,

    /// Page description
    #[serde(default)]
    pub description: Option<String>,

    /// Per-page theme override
    #[serde(default)]
    pub theme: Option<String>,

    /// Remaining keys, in source order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

/// Splits a content file into frontmatter and body.
///
/// Returns the parsed frontmatter (default when the file has none), the
/// markdown body, and the number of source lines preceding the body, for
/// error line adjustment.
///
/// # Errors
///
/// Returns [`CompileError::Frontmatter`] when the opening `---` has no
/// closing line or the block is not valid YAML.
pub fn parse(source: &str) -> Result<(FrontMatter, &str, usize), CompileError> {
    let Some(rest) = strip_open_delimiter(source) else {
        return Ok((FrontMatter::default(), source, 0));
    };

    // Scan for the closing line, keeping byte offsets into `rest`.
    let mut offset = 0;
    let mut lines_seen = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']).trim_end() == "---" {
            let yaml = &rest[..offset];
            let front = parse_yaml(yaml)?;
            let body = &rest[offset + line.len()..];
            // opening line + yaml lines + closing line
            return Ok((front, body, lines_seen + 2));
        }
        offset += line.len();
        lines_seen += 1;
    }

    Err(CompileError::Frontmatter {
        line: 1,
        message: "missing closing '---'".to_string(),
    })
}

fn strip_open_delimiter(source: &str) -> Option<&str> {
    let first_line_end = source.find('\n')?;
    let first_line = source[..first_line_end].trim_end();
    (first_line == "---").then(|| &source[first_line_end + 1..])
}

fn parse_yaml(yaml: &str) -> Result<FrontMatter, CompileError> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    serde_yaml::from_str(yaml).map_err(|e| {
        // serde_yaml lines are relative to the block, which starts on file line 2
        let line = e.location().map_or(2, |loc| loc.line() + 1);
        CompileError::Frontmatter {
            line,
            message: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_frontmatter() {
        let (front, body, offset) = parse("# Title\n\nprose\n").unwrap();
        assert!(front.title.is_none());
        assert_eq!(body, "# Title\n\nprose\n");
        assert_eq!(offset, 0);
    }

    #[test]
    fn test_basic_frontmatter() {
        let src = "---\ntitle: Build Your Own Redux\ndescription: A course\n---\n# Heading\n";
        let (front, body, offset) = parse(src).unwrap();
        assert_eq!(front.title.as_deref(), Some("Build Your Own Redux"));
        assert_eq!(front.description.as_deref(), Some("A course"));
        assert_eq!(body, "# Heading\n");
        assert_eq!(offset, 4);
    }

    #[test]
    fn test_empty_frontmatter_block() {
        let (front, body, offset) = parse("---\n---\nbody\n").unwrap();
        assert!(front.title.is_none());
        assert_eq!(body, "body\n");
        assert_eq!(offset, 2);
    }

    #[test]
    fn test_extra_keys_preserved_in_order() {
        let src = "---\nzebra: 1\ntitle: t\napple: 2\n---\n";
        let (front, _, _) = parse(src).unwrap();
        let keys: Vec<&str> = front.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zebra", "apple"]);
    }

    #[test]
    fn test_missing_close_is_an_error() {
        let err = parse("---\ntitle: t\n").unwrap_err();
        assert!(err.to_string().contains("missing closing"));
    }

    #[test]
    fn test_yaml_error_is_frontmatter_error() {
        // line 3 of the file: the bad mapping entry
        let src = "---\ntitle: t\n  bad indent: [\n---\nbody\n";
        let err = parse(src).unwrap_err();
        assert!(matches!(err, CompileError::Frontmatter { .. }));
    }

    #[test]
    fn test_thematic_break_later_is_not_frontmatter() {
        let src = "intro\n\n---\n\nmore\n";
        let (front, body, offset) = parse(src).unwrap();
        assert!(front.title.is_none());
        assert_eq!(body, src);
        assert_eq!(offset, 0);
    }

    #[test]
    fn test_crlf_delimiters() {
        let src = "---\r\ntitle: t\r\n---\r\nbody\r\n";
        let (front, body, offset) = parse(src).unwrap();
        assert_eq!(front.title.as_deref(), Some("t"));
        assert_eq!(body, "body\r\n");
        assert_eq!(offset, 3);
    }
}
