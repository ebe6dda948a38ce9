// Markdown: inline text runs take the literal path; code is left alone

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use tracing::debug;

use super::FormatAdapter;
use crate::error::AdapterError;
use crate::position::LineIndex;
use crate::span::{SpanKind, TextSpan};

#[derive(Debug)]
pub struct MarkdownAdapter {
    options: Options,
}

impl MarkdownAdapter {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_FOOTNOTES);
        Self { options }
    }
}

impl Default for MarkdownAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatAdapter for MarkdownAdapter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["md", "markdown"]
    }

    fn extract_spans(&self, source: &str) -> Result<Vec<TextSpan>, AdapterError> {
        let index = LineIndex::new(source);
        let mut spans = Vec::new();
        let mut in_code_block = false;

        for (event, range) in Parser::new_ext(source, self.options).into_offset_iter() {
            match event {
                Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
                Event::End(TagEnd::CodeBlock) => in_code_block = false,
                Event::Text(_) if !in_code_block => {
                    // WHY: take the raw source slice so the fix replaces exactly what is on disk
                    let raw = &source[range.clone()];
                    if raw.trim().is_empty() {
                        continue;
                    }
                    spans.push(TextSpan::new(
                        raw,
                        SpanKind::Literal,
                        index.location(range.start),
                        Some(range),
                    ));
                }
                _ => {}
            }
        }

        debug!("Extracted {} markdown text spans", spans.len());
        Ok(spans)
    }
}
