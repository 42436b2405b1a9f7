//! Compiled document intermediate representation
//!
//! A [`Document`] is the portable output of content compilation: everything
//! the HTML templates and the client-side walkthrough script need, with no
//! reference back to the source file. Token spans are part of the IR so
//! hydration never has to re-highlight code.

use serde::{Deserialize, Serialize};

/// Version stamp serialized with every document.
///
/// The hydration script refuses to animate documents with a different
/// version, so stale embedded payloads degrade to static HTML instead of
/// misbehaving.
pub const IR_VERSION: u32 = 1;

// ============================================================================
// Document
// ============================================================================

/// A fully compiled content file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Document {
    /// IR version stamp (see [`IR_VERSION`])
    pub ir_version: u32,

    /// Slug the document is published under
    pub slug: String,

    /// Page title (frontmatter `title`, else first heading, else the slug)
    pub title: String,

    /// Page description for the meta tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Per-page theme override (frontmatter `theme`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Page content in document order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Number of walkthrough steps across all blocks.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|b| match b {
                Block::Walkthrough { steps } => steps.len(),
                _ => 0,
            })
            .sum()
    }
}

/// One top-level unit of page content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Rendered markdown prose
    Prose {
        /// Pre-rendered HTML
        html: String,
    },

    /// A standalone annotated code fence
    Code {
        /// The highlighted snippet
        snippet: Snippet,
    },

    /// A walkthrough section: prose steps paired with code snapshots
    Walkthrough {
        /// Steps in source order
        steps: Vec<Step>,
    },
}

/// One step of a walkthrough: prose beside a code snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Step {
    /// Rendered prose for this step
    pub prose_html: String,

    /// Code snapshot shown while this step is active
    pub snippet: Snippet,
}

// ============================================================================
// Snippets
// ============================================================================

/// A highlighted code listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Snippet {
    /// Language tag from the fence info string
    pub lang: String,

    /// Displayed snippet title (usually a file name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Lines in order, 1-based numbering
    pub lines: Vec<Line>,
}

impl Snippet {
    /// Plain text of every line, without trailing newlines.
    #[must_use]
    pub fn line_texts(&self) -> Vec<String> {
        self.lines.iter().map(Line::text).collect()
    }

    /// 1-based numbers of the focused lines.
    #[must_use]
    pub fn focused_lines(&self) -> Vec<usize> {
        self.lines
            .iter()
            .filter(|l| l.focused)
            .map(|l| l.number)
            .collect()
    }
}

/// One line of a snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Line {
    /// 1-based line number within the snippet
    pub number: usize,

    /// Token spans covering the whole line text
    pub spans: Vec<TokenSpan>,

    /// Line is focused (explicit `focus=` or the step's default focus)
    #[serde(default)]
    pub focused: bool,

    /// Line is marked (explicit `mark=`)
    #[serde(default)]
    pub marked: bool,

    /// Line is new relative to the previous walkthrough step
    #[serde(default)]
    pub added: bool,
}

impl Line {
    /// Plain text of the line.
    #[must_use]
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A run of characters with a single token classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TokenSpan {
    /// Token classification
    pub kind: TokenKind,

    /// The characters of the span
    pub text: String,
}

/// Token classifications the scanner produces and themes color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Anything not otherwise classified
    Plain,
    /// Language keyword
    Keyword,
    /// String literal (including template strings)
    String,
    /// Numeric literal
    Number,
    /// Line or block comment
    Comment,
    /// Capitalized identifier (type or component name)
    TypeName,
    /// Identifier immediately followed by a call
    Function,
    /// Word literal such as `true`, `false`, `null`
    Literal,
}

impl TokenKind {
    /// CSS class the span is rendered with.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Plain => "tok-plain",
            Self::Keyword => "tok-keyword",
            Self::String => "tok-string",
            Self::Number => "tok-number",
            Self::Comment => "tok-comment",
            Self::TypeName => "tok-type",
            Self::Function => "tok-function",
            Self::Literal => "tok-literal",
        }
    }
}
