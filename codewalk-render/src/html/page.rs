//! Page templates
//!
//! Every page shares one base layout. Post pages embed their document IR
//! as JSON for the walkthrough script to hydrate; the index and not-found
//! pages are static.

use crate::error::RenderError;
use crate::html::{href, html_escape, render_inline_markdown, render_snippet};
use codewalk_core::config::{CourseConfig, IndexConfig, SiteMetadata};
use codewalk_core::document::{Block, Document};
use codewalk_core::theme::Theme;
use std::fmt::Write as _;

/// Name of the global the document IR is embedded under.
pub const DOC_GLOBAL: &str = "__CODEWALK_DOC__";

/// Which route variant a post page is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageVariant {
    /// The themed `/post/<slug>/` page
    Post,
    /// The plain `/<slug>/` page
    Plain,
}

impl PageVariant {
    const fn body_class(self) -> &'static str {
        match self {
            Self::Post => "page-post",
            Self::Plain => "page-plain",
        }
    }
}

/// Shared context for page rendering.
pub struct PageContext<'a> {
    site: &'a SiteMetadata,
}

impl<'a> PageContext<'a> {
    #[must_use]
    pub const fn new(site: &'a SiteMetadata) -> Self {
        Self { site }
    }

    /// Render the base HTML structure
    fn base(
        &self,
        title: &str,
        description: Option<&str>,
        theme: &Theme,
        body_class: &str,
        content: &str,
        scripts: &str,
    ) -> String {
        let base = &self.site.base_path;
        let description_tag = description.map_or_else(String::new, |d| {
            format!("\n    <meta name=\"description\" content=\"{}\">", html_escape(d))
        });
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>{description_tag}
    <link rel="stylesheet" href="{site_css}">
    <link rel="stylesheet" href="{theme_css}">
</head>
<body class="{body_class} {theme_class}">
    <main class="content">
{content}
    </main>{scripts}
</body>
</html>
"#,
            title = html_escape(title),
            site_css = href(base, "/assets/site.css"),
            theme_css = href(base, &format!("/assets/{}.css", theme.css_class())),
            theme_class = theme.css_class(),
        )
    }

    // ========================================================================
    // Post Pages
    // ========================================================================

    /// Renders a compiled document as a full page.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the document IR cannot be serialized for
    /// embedding.
    pub fn post_page(
        &self,
        doc: &Document,
        theme: &Theme,
        variant: PageVariant,
    ) -> Result<String, RenderError> {
        let mut content = String::new();
        for block in &doc.blocks {
            match block {
                Block::Prose { html } => {
                    let _ = writeln!(content, "<section class=\"prose\">\n{html}</section>");
                }
                Block::Code { snippet } => content.push_str(&render_snippet(snippet)),
                Block::Walkthrough { steps } => {
                    let _ = writeln!(
                        content,
                        "<section class=\"walkthrough\" data-steps=\"{}\">",
                        steps.len()
                    );
                    content.push_str("<div class=\"walkthrough-steps\">\n");
                    for (i, step) in steps.iter().enumerate() {
                        let _ = writeln!(
                            content,
                            "<div class=\"step\" data-step=\"{i}\">\n{}</div>",
                            step.prose_html
                        );
                    }
                    content.push_str("</div>\n<div class=\"walkthrough-code\">\n");
                    for (i, step) in steps.iter().enumerate() {
                        let _ = writeln!(content, "<div class=\"step-code\" data-step=\"{i}\">");
                        content.push_str(&render_snippet(&step.snippet));
                        content.push_str("</div>\n");
                    }
                    content.push_str("</div>\n</section>\n");
                }
            }
        }

        // The payload lands inside a script element, so break any
        // "</script>" the code text might contain.
        let ir_json = serde_json::to_string(doc)?.replace('<', "\\u003c");
        let scripts = format!(
            "\n    <script>window.{DOC_GLOBAL} = {ir_json};</script>\n    <script src=\"{}\" defer></script>",
            href(&self.site.base_path, "/assets/walkthrough.js"),
        );

        let title = format!("{} · {}", doc.title, self.site.title);
        Ok(self.base(
            &title,
            doc.description.as_deref(),
            theme,
            variant.body_class(),
            &content,
            &scripts,
        ))
    }

    // ========================================================================
    // Index Page
    // ========================================================================

    /// Renders the navigation index page.
    #[must_use]
    pub fn index_page(&self, index: &IndexConfig, theme: &Theme) -> String {
        let mut content = String::new();
        let _ = writeln!(content, "<h1>{}</h1>", html_escape(&self.site.title));

        for paragraph in &index.intro {
            content.push_str(&render_inline_markdown(paragraph));
        }

        for section in &index.sections {
            content.push_str("<section class=\"course-section\">\n");
            let _ = writeln!(content, "<h2>{}</h2>", html_escape(&section.heading));
            if let Some(blurb) = &section.blurb {
                content.push_str(&render_inline_markdown(blurb));
            }
            if !section.courses.is_empty() {
                content.push_str("<ol class=\"course-list\">\n");
                for course in &section.courses {
                    content.push_str(&self.course_entry(course));
                }
                content.push_str("</ol>\n");
            }
            content.push_str("</section>\n");
        }

        self.base(
            &self.site.title,
            self.site.description.as_deref(),
            theme,
            "page-index",
            &content,
            "",
        )
    }

    fn course_entry(&self, course: &CourseConfig) -> String {
        let base = &self.site.base_path;
        let course_link = match (&course.post, &course.url) {
            (Some(slug), _) => format!(
                "<a href=\"{}\">{}</a>",
                href(base, &format!("/post/{slug}/")),
                html_escape(&course.title)
            ),
            (None, Some(url)) => format!(
                "<a href=\"{}\" rel=\"noopener noreferrer\">{}</a>",
                html_escape(url),
                html_escape(&course.title)
            ),
            (None, None) => html_escape(&course.title),
        };
        course.sandbox.as_ref().map_or_else(
            || format!("<li>{course_link}</li>\n"),
            |sandbox| {
                format!(
                    "<li>{course_link} : <a href=\"{}\" rel=\"noopener noreferrer\">Sandbox</a></li>\n",
                    html_escape(sandbox)
                )
            },
        )
    }

    // ========================================================================
    // Not Found
    // ========================================================================

    /// Renders the 404 page served for unknown routes.
    #[must_use]
    pub fn not_found_page(&self, theme: &Theme) -> String {
        let content = format!(
            "<div class=\"not-found\">\n<h1>Page not found</h1>\n<p>There is no page at this address.</p>\n<p><a href=\"{}\">Back to the index</a></p>\n</div>",
            href(&self.site.base_path, "/")
        );
        let title = format!("Not Found · {}", self.site.title);
        self.base(&title, None, theme, "page-not-found", &content, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codewalk_core::config::SectionConfig;
    use codewalk_core::document::{IR_VERSION, Line, Snippet, Step, TokenKind, TokenSpan};

    fn site() -> SiteMetadata {
        SiteMetadata {
            title: "Build Your Own".to_string(),
            description: Some("course site".to_string()),
            base_path: "/courses".to_string(),
        }
    }

    fn doc() -> Document {
        Document {
            ir_version: IR_VERSION,
            slug: "redux".to_string(),
            title: "Redux".to_string(),
            description: None,
            theme: None,
            blocks: vec![Block::Walkthrough {
                steps: vec![Step {
                    prose_html: "<p>step</p>".to_string(),
                    snippet: Snippet {
                        lang: "js".to_string(),
                        title: None,
                        lines: vec![Line {
                            number: 1,
                            spans: vec![TokenSpan {
                                kind: TokenKind::Plain,
                                text: "</script>".to_string(),
                            }],
                            focused: false,
                            marked: false,
                            added: false,
                        }],
                    },
                }],
            }],
        }
    }

    #[test]
    fn test_post_page_embeds_ir() {
        let site = site();
        let ctx = PageContext::new(&site);
        let theme = Theme::builtin("dracula-soft").unwrap();
        let html = ctx.post_page(&doc(), &theme, PageVariant::Post).unwrap();
        assert!(html.contains("window.__CODEWALK_DOC__ = {"));
        assert!(html.contains("\"ir_version\":1"));
        assert!(html.contains("class=\"page-post theme-dracula-soft\""));
        assert!(html.contains("/courses/assets/walkthrough.js"));
        assert!(html.contains("<title>Redux · Build Your Own</title>"));
    }

    #[test]
    fn test_embedded_json_cannot_close_the_script() {
        let site = site();
        let ctx = PageContext::new(&site);
        let theme = Theme::builtin("dracula-soft").unwrap();
        let html = ctx.post_page(&doc(), &theme, PageVariant::Post).unwrap();
        let script_start = html.find("window.__CODEWALK_DOC__").unwrap();
        let payload = &html[script_start..];
        let end = payload.find("</script>").unwrap();
        assert!(!payload[..end].contains("</script"));
        assert!(payload.contains("\\u003c/script>"));
    }

    #[test]
    fn test_plain_variant_body_class() {
        let site = site();
        let ctx = PageContext::new(&site);
        let theme = Theme::builtin("github-light").unwrap();
        let html = ctx.post_page(&doc(), &theme, PageVariant::Plain).unwrap();
        assert!(html.contains("class=\"page-plain theme-github-light\""));
        assert!(html.contains("/courses/assets/theme-github-light.css"));
    }

    #[test]
    fn test_index_page_links() {
        let site = site();
        let ctx = PageContext::new(&site);
        let theme = Theme::builtin("github-light").unwrap();
        let index = IndexConfig {
            intro: vec!["Welcome to the **course**.".to_string()],
            sections: vec![SectionConfig {
                heading: "Redux".to_string(),
                blurb: Some("Start here.".to_string()),
                courses: vec![
                    CourseConfig {
                        title: "Build our own Redux".to_string(),
                        post: Some("build-your-own-redux".to_string()),
                        url: None,
                        sandbox: Some("https://glitch.com/edit/#!/demo".to_string()),
                    },
                    CourseConfig {
                        title: "Build your own React".to_string(),
                        post: None,
                        url: Some("https://pomb.us/build-your-own-react/".to_string()),
                        sandbox: None,
                    },
                ],
            }],
        };
        let html = ctx.index_page(&index, &theme);
        assert!(html.contains("<h1>Build Your Own</h1>"));
        assert!(html.contains("<strong>course</strong>"));
        assert!(html.contains("href=\"/courses/post/build-your-own-redux/\""));
        assert!(html.contains("rel=\"noopener noreferrer\">Sandbox</a>"));
        assert!(html.contains("href=\"https://pomb.us/build-your-own-react/\""));
        assert!(html.contains("meta name=\"description\" content=\"course site\""));
    }

    #[test]
    fn test_not_found_page_links_home() {
        let site = site();
        let ctx = PageContext::new(&site);
        let theme = Theme::builtin("github-light").unwrap();
        let html = ctx.not_found_page(&theme);
        assert!(html.contains("Page not found"));
        assert!(html.contains("href=\"/courses/\""));
    }
}
