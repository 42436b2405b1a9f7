//! Content compilation: markdown with walkthrough sections to document IR
//!
//! The compiler drives a `pulldown-cmark` event stream and sorts events
//! into IR blocks. Ordinary prose runs are rendered straight to HTML.
//! Top-level fenced code blocks become highlighted snippets. A paragraph
//! consisting of `::: walkthrough` opens a walkthrough section, `:::`
//! closes it, and thematic breaks inside separate its steps; each step is
//! prose plus exactly one fence.
//!
//! Sentinels, snippet fences, and step breaks are only recognized at the
//! top level. Inside lists, blockquotes, and tables everything passes
//! through as prose, and indented code blocks are always prose. Step
//! breaks need blank lines around them, as `---` directly under a line of
//! text is a setext heading in markdown.

use crate::annotation::Annotation;
use crate::diff;
use crate::error::CompileError;
use crate::frontmatter;
use crate::highlight;
use codewalk_core::document::{Block, Document, IR_VERSION, Line, Snippet, Step};
use codewalk_core::slug::Slug;
use pulldown_cmark::html::push_html;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::ops::Range;

/// Compiles one content file into its document IR.
///
/// # Errors
///
/// Returns [`CompileError`] naming the offending source line for malformed
/// frontmatter, walkthrough structure violations, and bad annotations.
pub fn compile(source: &str, slug: &Slug) -> Result<Document, CompileError> {
    let (front, body, line_offset) = frontmatter::parse(source)?;

    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(body, options);

    let compiler = Compiler::new(body, line_offset);
    let (blocks, first_h1) = compiler.run(parser.into_offset_iter())?;

    let title = front
        .title
        .clone()
        .or(first_h1)
        .unwrap_or_else(|| slug.as_str().to_string());

    Ok(Document {
        ir_version: IR_VERSION,
        slug: slug.as_str().to_string(),
        title,
        description: front.description,
        theme: front.theme,
        blocks,
    })
}

// ============================================================================
// Compiler
// ============================================================================

struct Compiler<'a> {
    index: LineIndex,
    line_offset: usize,
    depth: usize,
    blocks: Vec<Block>,
    prose: Vec<Event<'a>>,
    walkthrough: Option<Walkthrough<'a>>,
    first_h1: Option<String>,
    h1_buf: Option<String>,
}

struct Walkthrough<'a> {
    open_line: usize,
    steps: Vec<Step>,
    prose: Vec<Event<'a>>,
    snippet: Option<Snippet>,
}

impl<'a> Compiler<'a> {
    fn new(body: &str, line_offset: usize) -> Self {
        Self {
            index: LineIndex::new(body),
            line_offset,
            depth: 0,
            blocks: Vec::new(),
            prose: Vec::new(),
            walkthrough: None,
            first_h1: None,
            h1_buf: None,
        }
    }

    fn run<I>(mut self, mut events: I) -> Result<(Vec<Block>, Option<String>), CompileError>
    where
        I: Iterator<Item = (Event<'a>, Range<usize>)>,
    {
        while let Some((event, range)) = events.next() {
            match event {
                Event::Start(Tag::Paragraph) if self.depth == 0 => {
                    let line = self.line_at(range.start);
                    let inner = collect_paragraph(&mut events);
                    self.handle_paragraph(inner, line)?;
                }
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) if self.depth == 0 => {
                    let line = self.line_at(range.start);
                    let code = collect_fence(&mut events);
                    let snippet = build_snippet(info.as_ref(), &code, line)?;
                    self.place_snippet(snippet, line)?;
                }
                Event::Rule if self.depth == 0 && self.walkthrough.is_some() => {
                    let line = self.line_at(range.start);
                    self.end_step(line)?;
                }
                Event::Start(tag) => {
                    self.depth += 1;
                    self.push_prose_event(Event::Start(tag));
                }
                Event::End(end) => {
                    self.depth = self.depth.saturating_sub(1);
                    self.push_prose_event(Event::End(end));
                }
                other => self.push_prose_event(other),
            }
        }
        self.finish()
    }

    fn finish(mut self) -> Result<(Vec<Block>, Option<String>), CompileError> {
        if let Some(w) = &self.walkthrough {
            return Err(CompileError::UnterminatedWalkthrough { line: w.open_line });
        }
        self.flush_prose();
        Ok((self.blocks, self.first_h1))
    }

    // ========================================================================
    // Walkthrough Structure
    // ========================================================================

    fn handle_paragraph(
        &mut self,
        inner: Vec<Event<'a>>,
        line: usize,
    ) -> Result<(), CompileError> {
        let (text, text_only) = paragraph_text(&inner);
        let trimmed = text.trim();
        if !trimmed.starts_with(":::") {
            self.push_prose_event(Event::Start(Tag::Paragraph));
            for event in inner {
                self.push_prose_event(event);
            }
            self.push_prose_event(Event::End(TagEnd::Paragraph));
            return Ok(());
        }

        if !text_only {
            return Err(CompileError::BadSentinel {
                line,
                text: trimmed.to_string(),
            });
        }
        match trimmed[3..].trim() {
            "" => self.close_walkthrough(line),
            "walkthrough" => self.open_walkthrough(line),
            _ => Err(CompileError::BadSentinel {
                line,
                text: trimmed.to_string(),
            }),
        }
    }

    fn open_walkthrough(&mut self, line: usize) -> Result<(), CompileError> {
        if self.walkthrough.is_some() {
            return Err(CompileError::NestedWalkthrough { line });
        }
        self.flush_prose();
        self.walkthrough = Some(Walkthrough {
            open_line: line,
            steps: Vec::new(),
            prose: Vec::new(),
            snippet: None,
        });
        Ok(())
    }

    fn close_walkthrough(&mut self, line: usize) -> Result<(), CompileError> {
        if self.walkthrough.is_none() {
            return Err(CompileError::StrayClose { line });
        }
        self.end_step(line)?;
        if let Some(mut w) = self.walkthrough.take() {
            diff::annotate_steps(&mut w.steps);
            self.blocks.push(Block::Walkthrough { steps: w.steps });
        }
        Ok(())
    }

    fn end_step(&mut self, line: usize) -> Result<(), CompileError> {
        let Some(w) = self.walkthrough.as_mut() else {
            return Ok(());
        };
        let Some(snippet) = w.snippet.take() else {
            return Err(CompileError::StepWithoutCode { line });
        };
        let mut prose_html = String::new();
        push_html(&mut prose_html, w.prose.drain(..));
        w.steps.push(Step {
            prose_html,
            snippet,
        });
        Ok(())
    }

    fn place_snippet(&mut self, snippet: Snippet, line: usize) -> Result<(), CompileError> {
        if let Some(w) = self.walkthrough.as_mut() {
            if w.snippet.is_some() {
                return Err(CompileError::MultipleSnippets { line });
            }
            w.snippet = Some(snippet);
        } else {
            self.flush_prose();
            self.blocks.push(Block::Code { snippet });
        }
        Ok(())
    }

    // ========================================================================
    // Prose
    // ========================================================================

    fn push_prose_event(&mut self, event: Event<'a>) {
        self.capture_title(&event);
        if let Some(w) = self.walkthrough.as_mut() {
            w.prose.push(event);
        } else {
            self.prose.push(event);
        }
    }

    fn flush_prose(&mut self) {
        if self.prose.is_empty() {
            return;
        }
        let mut html = String::new();
        push_html(&mut html, self.prose.drain(..));
        if !html.trim().is_empty() {
            self.blocks.push(Block::Prose { html });
        }
    }

    /// Remembers the text of the first level-1 heading as the title fallback.
    fn capture_title(&mut self, event: &Event<'a>) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) if self.first_h1.is_none() && self.h1_buf.is_none() => {
                self.h1_buf = Some(String::new());
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some(buf) = &mut self.h1_buf {
                    buf.push_str(t);
                }
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                if let Some(buf) = self.h1_buf.take() {
                    self.first_h1 = Some(buf.trim().to_string());
                }
            }
            _ => {}
        }
    }

    fn line_at(&self, offset: usize) -> usize {
        self.index.line_of(offset) + self.line_offset
    }
}

// ============================================================================
// Event Collection
// ============================================================================

/// Drains one paragraph's inner events, consuming the closing tag.
fn collect_paragraph<'a, I>(events: &mut I) -> Vec<Event<'a>>
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    let mut inner = Vec::new();
    for (event, _) in events.by_ref() {
        if matches!(event, Event::End(TagEnd::Paragraph)) {
            break;
        }
        inner.push(event);
    }
    inner
}

/// Drains one fenced code block's text, consuming the closing tag.
fn collect_fence<'a, I>(events: &mut I) -> String
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    let mut code = String::new();
    for (event, _) in events.by_ref() {
        match event {
            Event::Text(t) => code.push_str(&t),
            Event::End(TagEnd::CodeBlock) => break,
            _ => {}
        }
    }
    code
}

/// Concatenated text of a paragraph, and whether it held only plain text.
fn paragraph_text(events: &[Event<'_>]) -> (String, bool) {
    let mut text = String::new();
    let mut text_only = true;
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            _ => text_only = false,
        }
        if matches!(event, Event::Code(_) | Event::InlineHtml(_)) {
            text_only = false;
        }
    }
    (text, text_only)
}

/// Builds a highlighted snippet from a fence.
fn build_snippet(info: &str, code: &str, fence_line: usize) -> Result<Snippet, CompileError> {
    let ann = Annotation::parse(info).map_err(|message| CompileError::InvalidAnnotation {
        line: fence_line,
        message,
    })?;

    let mut lines: Vec<Line> = highlight::highlight_snippet(&ann.lang, code)
        .into_iter()
        .enumerate()
        .map(|(i, spans)| Line {
            number: i + 1,
            spans,
            focused: false,
            marked: false,
            added: false,
        })
        .collect();

    if let Some(target) = ann.max_referenced_line()
        && target > lines.len()
    {
        return Err(CompileError::AnnotationOutOfRange {
            line: fence_line,
            target,
            len: lines.len(),
        });
    }
    ann.apply(&mut lines);

    let lang = if ann.lang.is_empty() {
        "text".to_string()
    } else {
        ann.lang.clone()
    };
    Ok(Snippet {
        lang,
        title: ann.title,
        lines,
    })
}

// ============================================================================
// Line Mapping
// ============================================================================

/// Byte offset to 1-based line mapping over the markdown body.
struct LineIndex(Vec<usize>);

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                starts.push(i + 1);
            }
        }
        Self(starts)
    }

    fn line_of(&self, offset: usize) -> usize {
        self.0.partition_point(|&start| start <= offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codewalk_core::document::TokenKind;

    fn slug() -> Slug {
        Slug::new("test-post").unwrap()
    }

    fn compile_ok(source: &str) -> Document {
        compile(source, &slug()).unwrap()
    }

    fn compile_err(source: &str) -> CompileError {
        compile(source, &slug()).unwrap_err()
    }

    #[test]
    fn test_plain_document() {
        let doc = compile_ok("# Redux from scratch\n\nLet's begin.\n");
        assert_eq!(doc.title, "Redux from scratch");
        assert_eq!(doc.blocks.len(), 1);
        match &doc.blocks[0] {
            Block::Prose { html } => {
                assert!(html.contains("<h1>Redux from scratch</h1>"));
                assert!(html.contains("<p>Let's begin.</p>"));
            }
            other => panic!("expected prose, got {other:?}"),
        }
    }

    #[test]
    fn test_frontmatter_title_wins_over_heading() {
        let doc = compile_ok("---\ntitle: From Frontmatter\n---\n# From Heading\n");
        assert_eq!(doc.title, "From Frontmatter");
    }

    #[test]
    fn test_title_falls_back_to_slug() {
        let doc = compile_ok("just prose\n");
        assert_eq!(doc.title, "test-post");
    }

    #[test]
    fn test_standalone_fence_becomes_code_block() {
        let doc = compile_ok("intro\n\n```js store.js focus=1\nconst a = 1\nconst b = 2\n```\n");
        assert_eq!(doc.blocks.len(), 2);
        match &doc.blocks[1] {
            Block::Code { snippet } => {
                assert_eq!(snippet.lang, "js");
                assert_eq!(snippet.title.as_deref(), Some("store.js"));
                assert_eq!(snippet.lines.len(), 2);
                assert!(snippet.lines[0].focused);
                assert!(!snippet.lines[1].focused);
                assert_eq!(snippet.lines[0].spans[0].kind, TokenKind::Keyword);
            }
            other => panic!("expected code, got {other:?}"),
        }
    }

    #[test]
    fn test_fence_without_language_is_text() {
        let doc = compile_ok("```\nhello\n```\n");
        match &doc.blocks[0] {
            Block::Code { snippet } => assert_eq!(snippet.lang, "text"),
            other => panic!("expected code, got {other:?}"),
        }
    }

    #[test]
    fn test_walkthrough_with_two_steps() {
        let src = "\
::: walkthrough

First we create the store.

```js store.js
const store = {}
```

---

Then we add dispatch.

```js store.js
const store = {}
store.dispatch = () => {}
```

:::
";
        let doc = compile_ok(src);
        assert_eq!(doc.blocks.len(), 1);
        match &doc.blocks[0] {
            Block::Walkthrough { steps } => {
                assert_eq!(steps.len(), 2);
                assert!(steps[0].prose_html.contains("create the store"));
                assert_eq!(steps[0].snippet.lines.len(), 1);
                // second step gets the new line flagged and auto-focused
                assert_eq!(steps[1].snippet.lines.len(), 2);
                assert!(steps[1].snippet.lines[1].added);
                assert_eq!(steps[1].snippet.focused_lines(), vec![2]);
            }
            other => panic!("expected walkthrough, got {other:?}"),
        }
    }

    #[test]
    fn test_prose_around_walkthrough() {
        let src = "before\n\n::: walkthrough\n\nstep\n\n```js\nlet a = 1\n```\n\n:::\n\nafter\n";
        let doc = compile_ok(src);
        assert_eq!(doc.blocks.len(), 3);
        assert!(matches!(doc.blocks[0], Block::Prose { .. }));
        assert!(matches!(doc.blocks[1], Block::Walkthrough { .. }));
        assert!(matches!(doc.blocks[2], Block::Prose { .. }));
    }

    #[test]
    fn test_sentinels_are_not_rendered() {
        let src = "::: walkthrough\n\n```js\nlet a = 1\n```\n\n:::\n";
        let doc = compile_ok(src);
        for block in &doc.blocks {
            if let Block::Prose { html } = block {
                assert!(!html.contains(":::"));
            }
        }
    }

    #[test]
    fn test_unterminated_walkthrough_names_open_line() {
        let err = compile_err("intro\n\n::: walkthrough\n\n```js\nlet a = 1\n```\n");
        match err {
            CompileError::UnterminatedWalkthrough { line } => assert_eq!(line, 3),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_stray_close() {
        let err = compile_err("prose\n\n:::\n");
        assert!(matches!(err, CompileError::StrayClose { line: 3 }));
    }

    #[test]
    fn test_nested_walkthrough() {
        let src = "::: walkthrough\n\n::: walkthrough\n";
        let err = compile_err(src);
        assert!(matches!(err, CompileError::NestedWalkthrough { line: 3 }));
    }

    #[test]
    fn test_step_without_code() {
        let src = "::: walkthrough\n\nonly prose here\n\n:::\n";
        let err = compile_err(src);
        assert!(matches!(err, CompileError::StepWithoutCode { line: 5 }));
    }

    #[test]
    fn test_second_fence_in_step() {
        let src = "::: walkthrough\n\n```js\nlet a = 1\n```\n\n```js\nlet b = 2\n```\n\n:::\n";
        let err = compile_err(src);
        assert!(matches!(err, CompileError::MultipleSnippets { line: 7 }));
    }

    #[test]
    fn test_bad_annotation_line_accounts_for_frontmatter() {
        let src = "---\ntitle: t\n---\n\n```js focus=oops\nlet a = 1\n```\n";
        let err = compile_err(src);
        match err {
            CompileError::InvalidAnnotation { line, message } => {
                assert_eq!(line, 5);
                assert!(message.contains("oops"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_focus_past_end_of_snippet() {
        let err = compile_err("```js focus=9\nlet a = 1\n```\n");
        match err {
            CompileError::AnnotationOutOfRange { line, target, len } => {
                assert_eq!(line, 1);
                assert_eq!(target, 9);
                assert_eq!(len, 1);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_misspelled_sentinel() {
        let err = compile_err("::: walkthrougth\n");
        match err {
            CompileError::BadSentinel { line, text } => {
                assert_eq!(line, 1);
                assert!(text.contains("walkthrougth"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_fence_inside_list_stays_prose() {
        let src = "- item\n\n  ```js\n  let a = 1\n  ```\n";
        let doc = compile_ok(src);
        assert_eq!(doc.blocks.len(), 1);
        match &doc.blocks[0] {
            Block::Prose { html } => assert!(html.contains("<code")),
            other => panic!("expected prose, got {other:?}"),
        }
    }

    #[test]
    fn test_rule_outside_walkthrough_is_prose() {
        let doc = compile_ok("above\n\n---\n\nbelow\n");
        assert_eq!(doc.blocks.len(), 1);
        match &doc.blocks[0] {
            Block::Prose { html } => assert!(html.contains("<hr")),
            other => panic!("expected prose, got {other:?}"),
        }
    }

    #[test]
    fn test_paragraph_mentioning_colons_is_prose() {
        let doc = compile_ok("Type a ::: somewhere mid-sentence.\n");
        assert!(matches!(&doc.blocks[0], Block::Prose { .. }));
    }

    #[test]
    fn test_indented_code_is_prose() {
        let doc = compile_ok("para\n\n    indented code\n");
        assert_eq!(doc.blocks.len(), 1);
    }

    #[test]
    fn test_tables_render_in_prose() {
        let doc = compile_ok("| a | b |\n|---|---|\n| 1 | 2 |\n");
        match &doc.blocks[0] {
            Block::Prose { html } => assert!(html.contains("<table>")),
            other => panic!("expected prose, got {other:?}"),
        }
    }

    #[test]
    fn test_frontmatter_theme_flows_to_document() {
        let doc = compile_ok("---\ntheme: github-light\n---\nbody\n");
        assert_eq!(doc.theme.as_deref(), Some("github-light"));
    }

    #[test]
    fn test_mark_annotation_survives_diffing() {
        let src = "\
::: walkthrough

```js
let a = 1
```

---

```js mark=1
let a = 1
let b = 2
```

:::
";
        let doc = compile_ok(src);
        match &doc.blocks[0] {
            Block::Walkthrough { steps } => {
                assert!(steps[1].snippet.lines[0].marked);
                // no explicit focus, so the added line is focused
                assert_eq!(steps[1].snippet.focused_lines(), vec![2]);
            }
            other => panic!("expected walkthrough, got {other:?}"),
        }
    }
}
