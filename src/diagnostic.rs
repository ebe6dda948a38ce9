// WHY: diagnostics are built by adapters only; the engine never sees locations

use std::ops::Range;

use serde::Serialize;

use crate::position::Location;
use crate::span::{SpanKind, TextSpan};

/// Machine-applicable replacement of a byte range in the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    pub range: Range<usize>,
    pub replacement: String,
}

/// One changed span
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub original: String,
    pub rewritten: String,
    pub location: Location,
    pub kind: SpanKind,
    pub message: String,
    pub fix: Option<Fix>,
    /// Set once the fix has been written back to the source
    pub fixed: bool,
}

impl Diagnostic {
    pub fn from_span(span: &TextSpan, rewritten: String) -> Self {
        let message = match span.kind {
            SpanKind::Literal => format!(
                "Use inclusive term '{}' instead of '{}'",
                rewritten, span.content
            ),
            SpanKind::Prose => format!(
                "Use inclusive term: \"{}\" instead of \"{}\"",
                rewritten, span.content
            ),
        };
        let fix = span.range.clone().map(|range| Fix {
            range,
            replacement: rewritten.clone(),
        });

        Self {
            original: span.content.clone(),
            rewritten,
            location: span.location,
            kind: span.kind,
            message,
            fix,
            fixed: false,
        }
    }
}
