//! HTML assembly for the static bundle
//!
//! Pages are plain `format!` templates. Snippets render as one `span` per
//! line carrying state classes, so the stylesheet and the walkthrough
//! script never parse code text.

pub mod page;

pub use page::{PageContext, PageVariant};

use codewalk_core::document::{Line, Snippet};
use pulldown_cmark::html::push_html;
use pulldown_cmark::Parser;
use std::fmt::Write as _;

/// Escape HTML special characters
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Prefixes a site-relative route with the configured base path.
#[must_use]
pub fn href(base_path: &str, route: &str) -> String {
    format!("{base_path}{route}")
}

/// Renders one markdown string (config intro text, blurbs) to HTML.
#[must_use]
pub fn render_inline_markdown(markdown: &str) -> String {
    let mut out = String::new();
    push_html(&mut out, Parser::new(markdown));
    out
}

// ============================================================================
// Snippet Rendering
// ============================================================================

/// Renders a snippet as a `figure` of per-line spans.
#[must_use]
pub fn render_snippet(snippet: &Snippet) -> String {
    let mut out = String::new();
    let has_focus = snippet.lines.iter().any(|l| l.focused);
    let _ = writeln!(
        out,
        "<figure class=\"snippet{}\" data-lang=\"{}\">",
        if has_focus { " has-focus" } else { "" },
        html_escape(&snippet.lang)
    );
    if let Some(title) = &snippet.title {
        let _ = writeln!(
            out,
            "<figcaption class=\"snippet-title\">{}</figcaption>",
            html_escape(title)
        );
    }
    out.push_str("<pre><code>");
    for line in &snippet.lines {
        out.push_str(&render_line(line));
    }
    out.push_str("</code></pre>\n</figure>\n");
    out
}

fn render_line(line: &Line) -> String {
    let mut classes = String::from("line");
    if line.focused {
        classes.push_str(" focus");
    }
    if line.marked {
        classes.push_str(" mark");
    }
    if line.added {
        classes.push_str(" added");
    }
    let mut out = format!("<span class=\"{classes}\" data-line=\"{}\">", line.number);
    for span in &line.spans {
        let _ = write!(
            out,
            "<span class=\"{}\">{}</span>",
            span.kind.css_class(),
            html_escape(&span.text)
        );
    }
    out.push_str("</span>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use codewalk_core::document::{TokenKind, TokenSpan};

    fn line(number: usize, text: &str) -> Line {
        Line {
            number,
            spans: vec![TokenSpan {
                kind: TokenKind::Keyword,
                text: text.to_string(),
            }],
            focused: false,
            marked: false,
            added: false,
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;"
        );
    }

    #[test]
    fn test_href_prefixes_base_path() {
        assert_eq!(href("/courses", "/post/redux/"), "/courses/post/redux/");
        assert_eq!(href("", "/post/redux/"), "/post/redux/");
    }

    #[test]
    fn test_render_snippet_line_classes() {
        let mut focused = line(1, "const");
        focused.focused = true;
        focused.added = true;
        let snippet = Snippet {
            lang: "js".to_string(),
            title: Some("store.js".to_string()),
            lines: vec![focused, line(2, "let")],
        };
        let html = render_snippet(&snippet);
        assert!(html.contains("class=\"snippet has-focus\""));
        assert!(html.contains("data-lang=\"js\""));
        assert!(html.contains("snippet-title\">store.js<"));
        assert!(html.contains("<span class=\"line focus added\" data-line=\"1\">"));
        assert!(html.contains("<span class=\"line\" data-line=\"2\">"));
        assert!(html.contains("<span class=\"tok-keyword\">const</span>"));
    }

    #[test]
    fn test_snippet_without_focus_has_no_marker_class() {
        let snippet = Snippet {
            lang: "js".to_string(),
            title: None,
            lines: vec![line(1, "let")],
        };
        let html = render_snippet(&snippet);
        assert!(html.contains("class=\"snippet\""));
        assert!(!html.contains("has-focus"));
        assert!(!html.contains("figcaption"));
    }

    #[test]
    fn test_code_text_is_escaped() {
        let snippet = Snippet {
            lang: "html".to_string(),
            title: None,
            lines: vec![line(1, "<script>alert(1)</script>")],
        };
        let html = render_snippet(&snippet);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_inline_markdown() {
        let html = render_inline_markdown("We'll start with **Redux**!");
        assert!(html.contains("<strong>Redux</strong>"));
    }
}
