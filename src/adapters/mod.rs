// WHY: each adapter only turns a file into spans; rewriting and reporting are shared
// so every format follows the same one-diagnostic-per-changed-span contract

pub mod css;
pub mod html;
pub mod javascript;
mod lexer;
pub mod markdown;

use std::path::Path;

use crate::diagnostic::Diagnostic;
use crate::engine::RewriteEngine;
use crate::error::{AdapterError, EngineError};
use crate::span::TextSpan;

pub use css::CssAdapter;
pub use html::HtmlAdapter;
pub use javascript::JavaScriptAdapter;
pub use markdown::MarkdownAdapter;

/// Format-specific span extraction
pub trait FormatAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    /// File extensions (without the dot) this adapter lints
    fn extensions(&self) -> &'static [&'static str];

    /// Spans in document order
    fn extract_spans(&self, source: &str) -> Result<Vec<TextSpan>, AdapterError>;

    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions().iter().any(|known| known.eq_ignore_ascii_case(ext)))
    }

    fn lint_source(&self, engine: &RewriteEngine, source: &str) -> Result<Vec<Diagnostic>, AdapterError> {
        let spans = self.extract_spans(source)?;
        Ok(diagnostics_for(engine, &spans))
    }
}

/// One diagnostic per changed span, in span order
pub fn diagnostics_for(engine: &RewriteEngine, spans: &[TextSpan]) -> Vec<Diagnostic> {
    spans
        .iter()
        .filter_map(|span| {
            let outcome = engine.process(span);
            outcome
                .changed
                .then(|| Diagnostic::from_span(span, outcome.text))
        })
        .collect()
}

/// The formats selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    JavaScript,
    Css,
    Markdown,
    Html,
}

impl AdapterKind {
    pub fn build(self) -> Result<Box<dyn FormatAdapter>, EngineError> {
        Ok(match self {
            AdapterKind::JavaScript => Box::new(JavaScriptAdapter::new()?),
            AdapterKind::Css => Box::new(CssAdapter::new()?),
            AdapterKind::Markdown => Box::new(MarkdownAdapter::new()),
            AdapterKind::Html => Box::new(HtmlAdapter::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_by_extension() {
        let adapter = AdapterKind::JavaScript.build().unwrap();
        assert!(adapter.handles(Path::new("src/app.js")));
        assert!(adapter.handles(Path::new("src/App.TSX")));
        assert!(!adapter.handles(Path::new("styles.css")));
        assert!(!adapter.handles(Path::new("Makefile")));

        let adapter = AdapterKind::Markdown.build().unwrap();
        assert_eq!(adapter.name(), "markdown");
        assert!(adapter.handles(Path::new("README.md")));
    }
}
