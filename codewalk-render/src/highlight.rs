//! Token-level syntax highlighting
//!
//! A small hand-rolled scanner, one profile per language family. It only
//! needs to be good enough for course snippets: keywords, strings,
//! numbers, comments, capitalized names, and calls. Output is token spans
//! for the document IR; colors come from the theme stylesheet at render
//! time.
//!
//! The scanner works line by line so snippets keep their 1-based line
//! structure, carrying block-comment state between lines.

use codewalk_core::document::{TokenKind, TokenSpan};
use std::collections::HashSet;

// ============================================================================
// Language Profiles
// ============================================================================

struct LanguageProfile {
    keywords: &'static [&'static str],
    literals: &'static [&'static str],
    string_quotes: &'static [char],
    line_comment: Option<&'static str>,
    block_comment: Option<(&'static str, &'static str)>,
    uppercase_types: bool,
    detect_calls: bool,
}

static JS: LanguageProfile = LanguageProfile {
    keywords: &[
        "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
        "default", "delete", "do", "else", "export", "extends", "finally", "for", "from",
        "function", "get", "if", "import", "in", "instanceof", "let", "new", "of", "return",
        "set", "static", "super", "switch", "this", "throw", "try", "typeof", "var", "void",
        "while", "with", "yield",
    ],
    literals: &["true", "false", "null", "undefined", "NaN", "Infinity"],
    string_quotes: &['"', '\'', '`'],
    line_comment: Some("//"),
    block_comment: Some(("/*", "*/")),
    uppercase_types: true,
    detect_calls: true,
};

static RUST: LanguageProfile = LanguageProfile {
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
        "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "type",
        "unsafe", "use", "where", "while",
    ],
    literals: &["true", "false"],
    string_quotes: &['"'],
    line_comment: Some("//"),
    block_comment: Some(("/*", "*/")),
    uppercase_types: true,
    detect_calls: true,
};

static JSON: LanguageProfile = LanguageProfile {
    keywords: &[],
    literals: &["true", "false", "null"],
    string_quotes: &['"'],
    line_comment: None,
    block_comment: None,
    uppercase_types: false,
    detect_calls: false,
};

static CSS: LanguageProfile = LanguageProfile {
    keywords: &[],
    literals: &[],
    string_quotes: &['"', '\''],
    line_comment: None,
    block_comment: Some(("/*", "*/")),
    uppercase_types: false,
    detect_calls: true,
};

static HTML: LanguageProfile = LanguageProfile {
    keywords: &[],
    literals: &[],
    string_quotes: &['"', '\''],
    line_comment: None,
    block_comment: Some(("<!--", "-->")),
    uppercase_types: false,
    detect_calls: false,
};

static BASH: LanguageProfile = LanguageProfile {
    keywords: &[
        "case", "do", "done", "elif", "else", "esac", "export", "fi", "for", "function", "if",
        "in", "local", "return", "then", "until", "while",
    ],
    literals: &[],
    string_quotes: &['"', '\''],
    line_comment: Some("#"),
    block_comment: None,
    uppercase_types: false,
    detect_calls: false,
};

fn profile_for(lang: &str) -> Option<&'static LanguageProfile> {
    match lang {
        "js" | "jsx" | "ts" | "tsx" | "mjs" | "javascript" | "typescript" => Some(&JS),
        "rust" | "rs" => Some(&RUST),
        "json" => Some(&JSON),
        "css" => Some(&CSS),
        "html" => Some(&HTML),
        "bash" | "sh" | "shell" => Some(&BASH),
        _ => None,
    }
}

// ============================================================================
// Highlighter
// ============================================================================

/// Line-by-line scanner for one snippet.
pub struct Highlighter {
    keywords: HashSet<&'static str>,
    literals: HashSet<&'static str>,
    string_quotes: &'static [char],
    line_comment: Option<&'static str>,
    block_comment: Option<(&'static str, &'static str)>,
    uppercase_types: bool,
    detect_calls: bool,
    plain: bool,
    in_block_comment: bool,
}

impl Highlighter {
    /// Creates a scanner for a language tag. Unrecognized tags fall back to
    /// a pass-through profile that emits whole lines as plain spans.
    #[must_use]
    pub fn new(lang: &str) -> Self {
        profile_for(lang).map_or_else(
            || Self {
                keywords: HashSet::new(),
                literals: HashSet::new(),
                string_quotes: &[],
                line_comment: None,
                block_comment: None,
                uppercase_types: false,
                detect_calls: false,
                plain: true,
                in_block_comment: false,
            },
            |profile| Self {
                keywords: profile.keywords.iter().copied().collect(),
                literals: profile.literals.iter().copied().collect(),
                string_quotes: profile.string_quotes,
                line_comment: profile.line_comment,
                block_comment: profile.block_comment,
                uppercase_types: profile.uppercase_types,
                detect_calls: profile.detect_calls,
                plain: false,
                in_block_comment: false,
            },
        )
    }

    /// Scans one line into coalesced token spans.
    pub fn highlight_line(&mut self, text: &str) -> Vec<TokenSpan> {
        if self.plain {
            let mut spans = Spans::default();
            spans.push(TokenKind::Plain, text);
            return spans.into_vec();
        }

        let mut spans = Spans::default();
        let mut pos = 0;

        if self.in_block_comment {
            let close = self.block_comment.map_or("*/", |(_, close)| close);
            if let Some(i) = text.find(close) {
                let end = i + close.len();
                spans.push(TokenKind::Comment, &text[..end]);
                pos = end;
                self.in_block_comment = false;
            } else {
                spans.push(TokenKind::Comment, text);
                return spans.into_vec();
            }
        }

        while pos < text.len() {
            let rest = &text[pos..];
            let Some(c) = rest.chars().next() else { break };

            if let Some(marker) = self.line_comment
                && rest.starts_with(marker)
            {
                spans.push(TokenKind::Comment, rest);
                break;
            }

            if let Some((open, close)) = self.block_comment
                && rest.starts_with(open)
            {
                if let Some(i) = rest[open.len()..].find(close) {
                    let end = open.len() + i + close.len();
                    spans.push(TokenKind::Comment, &rest[..end]);
                    pos += end;
                } else {
                    spans.push(TokenKind::Comment, rest);
                    self.in_block_comment = true;
                    pos = text.len();
                }
                continue;
            }

            if self.string_quotes.contains(&c) {
                let end = scan_string(rest, c);
                spans.push(TokenKind::String, &rest[..end]);
                pos += end;
                continue;
            }

            if c.is_ascii_digit() {
                let end = scan_while(rest, |ch| {
                    ch.is_ascii_alphanumeric() || ch == '.' || ch == '_'
                });
                spans.push(TokenKind::Number, &rest[..end]);
                pos += end;
                continue;
            }

            if c.is_ascii_alphabetic() || c == '_' || c == '$' {
                let end = scan_while(rest, |ch| {
                    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
                });
                let ident = &rest[..end];
                spans.push(self.classify(ident, &rest[end..]), ident);
                pos += end;
                continue;
            }

            let len = c.len_utf8();
            spans.push(TokenKind::Plain, &rest[..len]);
            pos += len;
        }

        spans.into_vec()
    }

    fn classify(&self, ident: &str, after: &str) -> TokenKind {
        if self.keywords.contains(ident) {
            return TokenKind::Keyword;
        }
        if self.literals.contains(ident) {
            return TokenKind::Literal;
        }
        if self.uppercase_types && ident.starts_with(|ch: char| ch.is_ascii_uppercase()) {
            return TokenKind::TypeName;
        }
        if self.detect_calls && after.trim_start().starts_with('(') {
            return TokenKind::Function;
        }
        TokenKind::Plain
    }
}

/// Highlights a whole snippet, returning spans per line.
#[must_use]
pub fn highlight_snippet(lang: &str, code: &str) -> Vec<Vec<TokenSpan>> {
    let mut highlighter = Highlighter::new(lang);
    code.lines()
        .map(|line| highlighter.highlight_line(line))
        .collect()
}

// ============================================================================
// Scanning Helpers
// ============================================================================

/// Byte length of the leading run matching `pred`.
fn scan_while(text: &str, pred: impl Fn(char) -> bool) -> usize {
    text.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(text.len(), |(i, _)| i)
}

/// Byte length of a string literal starting at the opening quote,
/// including the closing quote. Unterminated strings run to end of line.
fn scan_string(text: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, c) in text.char_indices().skip(1) {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == quote {
            return i + c.len_utf8();
        }
    }
    text.len()
}

/// Span accumulator that merges adjacent spans of the same kind.
#[derive(Default)]
struct Spans(Vec<TokenSpan>);

impl Spans {
    fn push(&mut self, kind: TokenKind, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(last) = self.0.last_mut()
            && last.kind == kind
        {
            last.text.push_str(text);
            return;
        }
        self.0.push(TokenSpan {
            kind,
            text: text.to_string(),
        });
    }

    fn into_vec(self) -> Vec<TokenSpan> {
        self.0
    }
}
