use std::ops::Range;

use serde::Serialize;

use crate::position::Location;

/// Which rewrite path a span takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    /// Identifiers, string literals, markup text: substring substitution
    Literal,
    /// Comments and other free-form prose: term-level substitution
    Prose,
}

/// A unit of text extracted from a parsed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub content: String,
    pub kind: SpanKind,
    pub location: Location,
    /// Byte range of `content` in the source, when it appears there verbatim
    pub range: Option<Range<usize>>,
}

impl TextSpan {
    pub fn new(content: impl Into<String>, kind: SpanKind, location: Location, range: Option<Range<usize>>) -> Self {
        Self {
            content: content.into(),
            kind,
            location,
            range,
        }
    }

    pub fn literal(content: impl Into<String>) -> Self {
        Self::new(content, SpanKind::Literal, Location::start(), None)
    }

    pub fn prose(content: impl Into<String>) -> Self {
        Self::new(content, SpanKind::Prose, Location::start(), None)
    }
}

/// Engine result for one span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanOutcome {
    pub text: String,
    pub changed: bool,
}
