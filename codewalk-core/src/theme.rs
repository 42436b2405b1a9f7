//! Code themes
//!
//! A theme maps token kinds and line emphasis to colors. Two themes ship
//! built in: `dracula-soft` (the configuration default, used on the themed
//! `/post/` pages) and `github-light` (used on the plain top-level
//! variants). Custom themes are JSON files referenced by path from the
//! site configuration.
//!
//! Themes never touch markup. Rendering emits token CSS classes and each
//! theme becomes one CSS custom-property block scoped to a `theme-*` class,
//! so swapping themes is a stylesheet change only.

use crate::error::ThemeError;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

/// Built-in theme names, in the order help text lists them.
pub const BUILTIN_THEMES: [&str; 2] = ["dracula-soft", "github-light"];

/// Theme used when the site configuration does not name one.
pub const DEFAULT_THEME: &str = "dracula-soft";

/// Theme used for the plain top-level page variants.
pub const PLAIN_THEME: &str = "github-light";

// ============================================================================
// Theme Types
// ============================================================================

/// A complete code color theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct Theme {
    /// Theme name (also the basis of its CSS class)
    pub name: String,

    /// Code block background
    pub background: String,

    /// Default text color
    pub foreground: String,

    /// Token colors
    pub tokens: TokenColors,

    /// Focus, mark, and added-line emphasis
    pub emphasis: EmphasisColors,
}

/// Colors for each token classification.
///
/// `plain` falls back to the theme foreground and has no field here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct TokenColors {
    /// Language keywords
    pub keyword: String,
    /// String literals
    pub string: String,
    /// Numeric literals
    pub number: String,
    /// Comments
    pub comment: String,
    /// Type and component names
    pub type_name: String,
    /// Called identifiers
    pub function: String,
    /// Word literals (`true`, `null`, ...)
    pub literal: String,
}

/// Emphasis colors for walkthrough line states.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct EmphasisColors {
    /// Left border of focused lines
    pub focus_border: String,
    /// Background of marked lines
    pub mark_background: String,
    /// Background of lines added since the previous step
    pub added_background: String,
}

// ============================================================================
// Resolution
// ============================================================================

impl Theme {
    /// Looks up a built-in theme by name.
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "dracula-soft" => Some(Self::dracula_soft()),
            "github-light" => Some(Self::github_light()),
            _ => None,
        }
    }

    /// Resolves a configuration `theme` value.
    ///
    /// Values containing a path separator or a `.json` suffix are loaded as
    /// theme files relative to `base_dir`; anything else must be a built-in
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError`] if the name is unknown or the file cannot be
    /// read or parsed.
    pub fn resolve(spec: &str, base_dir: &Path) -> Result<Self, ThemeError> {
        let looks_like_path =
            spec.contains('/') || spec.contains('\\') || spec.ends_with(".json");
        if looks_like_path {
            return Self::load_file(&base_dir.join(spec));
        }
        Self::builtin(spec).ok_or_else(|| ThemeError::UnknownTheme {
            name: spec.to_string(),
            available: BUILTIN_THEMES.join(", "),
        })
    }

    /// Loads a theme from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError`] if the file cannot be read or is not valid
    /// theme JSON.
    pub fn load_file(path: &Path) -> Result<Self, ThemeError> {
        let text = std::fs::read_to_string(path).map_err(|e| ThemeError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&text).map_err(|e| ThemeError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn dracula_soft() -> Self {
        Self {
            name: "dracula-soft".to_string(),
            background: "#282a36".to_string(),
            foreground: "#f6f6f4".to_string(),
            tokens: TokenColors {
                keyword: "#f286c4".to_string(),
                string: "#e7ee98".to_string(),
                number: "#bf9eee".to_string(),
                comment: "#7b7f8b".to_string(),
                type_name: "#97e1f1".to_string(),
                function: "#62e884".to_string(),
                literal: "#bf9eee".to_string(),
            },
            emphasis: EmphasisColors {
                focus_border: "#bf9eee".to_string(),
                mark_background: "#3b3d4d".to_string(),
                added_background: "#28392f".to_string(),
            },
        }
    }

    fn github_light() -> Self {
        Self {
            name: "github-light".to_string(),
            background: "#f6f8fa".to_string(),
            foreground: "#24292e".to_string(),
            tokens: TokenColors {
                keyword: "#d73a49".to_string(),
                string: "#032f62".to_string(),
                number: "#005cc5".to_string(),
                comment: "#6a737d".to_string(),
                type_name: "#6f42c1".to_string(),
                function: "#6f42c1".to_string(),
                literal: "#005cc5".to_string(),
            },
            emphasis: EmphasisColors {
                focus_border: "#0366d6".to_string(),
                mark_background: "#fff8c5".to_string(),
                added_background: "#e6ffed".to_string(),
            },
        }
    }

    // ========================================================================
    // CSS Emission
    // ========================================================================

    /// CSS class the theme is scoped to, derived from its name.
    #[must_use]
    pub fn css_class(&self) -> String {
        let mut class = String::from("theme-");
        let mut last_dash = false;
        for c in self.name.chars() {
            if c.is_ascii_alphanumeric() {
                class.push(c.to_ascii_lowercase());
                last_dash = false;
            } else if !last_dash {
                class.push('-');
                last_dash = true;
            }
        }
        class.trim_end_matches('-').to_string()
    }

    /// The theme as one CSS custom-property block.
    ///
    /// The shared stylesheet consumes only these variables, so the emitted
    /// block is the entire per-theme surface.
    #[must_use]
    pub fn css(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, ".{} {{", self.css_class());
        let _ = writeln!(out, "  --cw-bg: {};", self.background);
        let _ = writeln!(out, "  --cw-fg: {};", self.foreground);
        let _ = writeln!(out, "  --cw-keyword: {};", self.tokens.keyword);
        let _ = writeln!(out, "  --cw-string: {};", self.tokens.string);
        let _ = writeln!(out, "  --cw-number: {};", self.tokens.number);
        let _ = writeln!(out, "  --cw-comment: {};", self.tokens.comment);
        let _ = writeln!(out, "  --cw-type: {};", self.tokens.type_name);
        let _ = writeln!(out, "  --cw-function: {};", self.tokens.function);
        let _ = writeln!(out, "  --cw-literal: {};", self.tokens.literal);
        let _ = writeln!(out, "  --cw-focus-border: {};", self.emphasis.focus_border);
        let _ = writeln!(out, "  --cw-mark-bg: {};", self.emphasis.mark_background);
        let _ = writeln!(out, "  --cw-added-bg: {};", self.emphasis.added_background);
        out.push_str("}\n");
        out
    }
}
