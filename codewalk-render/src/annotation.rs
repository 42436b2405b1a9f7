//! Fence annotation parsing
//!
//! The info string of a code fence carries the language, an optional
//! snippet title, and line annotations:
//!
//! ````text
//! ```js store.js focus=2:4,7 mark=10
//! ```
//! ````
//!
//! Line lists are 1-based, comma-separated, with `a:b` inclusive ranges.

use codewalk_core::document::Line;

/// Recognized annotation keys.
const KNOWN_KEYS: [&str; 2] = ["focus", "mark"];

/// A parsed fence info string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    /// Language tag (empty for plain fences)
    pub lang: String,
    /// Displayed snippet title, usually a file name
    pub title: Option<String>,
    /// Lines the author focused explicitly
    pub focus: Option<LineSet>,
    /// Lines the author marked
    pub mark: Option<LineSet>,
}

impl Annotation {
    /// Parses a fence info string.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first problem; the caller attaches
    /// the source line.
    pub fn parse(info: &str) -> Result<Self, String> {
        let mut tokens = info.split_whitespace();
        let mut out = Self::default();

        if let Some(first) = tokens.next() {
            if first.contains('=') {
                return Err("annotations require a language tag first".to_string());
            }
            out.lang = first.to_string();
        } else {
            return Ok(out);
        }

        for token in tokens {
            if let Some((key, value)) = token.split_once('=') {
                let set = LineSet::parse(value)
                    .map_err(|e| format!("{key}: {e}"))?;
                let slot = match key {
                    "focus" => &mut out.focus,
                    "mark" => &mut out.mark,
                    _ => {
                        return Err(format!(
                            "unknown annotation key '{key}' (known: {})",
                            KNOWN_KEYS.join(", ")
                        ));
                    }
                };
                if slot.is_some() {
                    return Err(format!("duplicate annotation '{key}'"));
                }
                *slot = Some(set);
            } else if out.title.is_none() {
                out.title = Some(token.to_string());
            } else {
                return Err(format!("unexpected '{token}' after the snippet title"));
            }
        }

        Ok(out)
    }

    /// Applies focus and mark flags to highlighted lines.
    pub fn apply(&self, lines: &mut [Line]) {
        if let Some(focus) = &self.focus {
            for line in lines.iter_mut() {
                line.focused = focus.contains(line.number);
            }
        }
        if let Some(mark) = &self.mark {
            for line in lines.iter_mut() {
                line.marked = mark.contains(line.number);
            }
        }
    }

    /// Highest snippet line any annotation references.
    #[must_use]
    pub fn max_referenced_line(&self) -> Option<usize> {
        [self.focus.as_ref(), self.mark.as_ref()]
            .into_iter()
            .flatten()
            .filter_map(LineSet::max_line)
            .max()
    }
}

// ============================================================================
// Line Sets
// ============================================================================

/// A set of 1-based line numbers, stored as inclusive ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSet(Vec<(usize, usize)>);

impl LineSet {
    /// Parses a comma-separated list of numbers and `a:b` ranges.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first malformed item.
    pub fn parse(value: &str) -> Result<Self, String> {
        if value.is_empty() {
            return Err("empty line list".to_string());
        }
        let mut ranges = Vec::new();
        for item in value.split(',') {
            let (start, end) = match item.split_once(':') {
                Some((a, b)) => (parse_line_number(a)?, parse_line_number(b)?),
                None => {
                    let n = parse_line_number(item)?;
                    (n, n)
                }
            };
            if start > end {
                return Err(format!("range {start}:{end} is backwards"));
            }
            ranges.push((start, end));
        }
        Ok(Self(ranges))
    }

    /// Whether the set contains a line number.
    #[must_use]
    pub fn contains(&self, n: usize) -> bool {
        self.0.iter().any(|&(start, end)| start <= n && n <= end)
    }

    /// The highest line number in the set.
    #[must_use]
    pub fn max_line(&self) -> Option<usize> {
        self.0.iter().map(|&(_, end)| end).max()
    }
}

fn parse_line_number(text: &str) -> Result<usize, String> {
    let n: usize = text
        .parse()
        .map_err(|_| format!("invalid line number '{text}'"))?;
    if n == 0 {
        return Err("line numbers are 1-based".to_string());
    }
    Ok(n)
}
