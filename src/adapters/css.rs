// Stylesheets: only comment bodies are checked, through the prose path

use tracing::debug;

use super::lexer::{self, Lexer};
use super::FormatAdapter;
use crate::error::{AdapterError, EngineError};
use crate::position::LineIndex;
use crate::span::{SpanKind, TextSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Comment,
    UnterminatedComment,
    String,
}

// Strings are scanned only so that "/*" inside them does not open a comment
const RULES: &[(Token, &str)] = &[
    (Token::Comment, lexer::BLOCK_COMMENT),
    (Token::UnterminatedComment, lexer::UNTERMINATED_BLOCK_COMMENT),
    (Token::String, lexer::DOUBLE_QUOTED),
    (Token::String, lexer::SINGLE_QUOTED),
];

pub struct CssAdapter {
    lexer: Lexer<Token>,
}

impl CssAdapter {
    pub fn new() -> Result<Self, EngineError> {
        Ok(Self {
            lexer: Lexer::new(RULES)?,
        })
    }
}

impl FormatAdapter for CssAdapter {
    fn name(&self) -> &'static str {
        "css"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["css", "scss", "less"]
    }

    fn extract_spans(&self, source: &str) -> Result<Vec<TextSpan>, AdapterError> {
        let index = LineIndex::new(source);
        let mut spans = Vec::new();

        for (token, range) in self.lexer.tokens(source) {
            match token {
                Token::Comment => {
                    let body = range.start + 2..range.end - 2;
                    if source[body.clone()].trim().is_empty() {
                        continue;
                    }
                    spans.push(TextSpan::new(
                        &source[body.clone()],
                        SpanKind::Prose,
                        index.location(body.start),
                        Some(body),
                    ));
                }
                Token::UnterminatedComment => {
                    let location = index.location(range.start);
                    return Err(AdapterError::Parse {
                        line: location.line,
                        column: location.column,
                        message: "unterminated comment".to_string(),
                    });
                }
                Token::String => {}
            }
        }

        debug!("Extracted {} css comment spans", spans.len());
        Ok(spans)
    }
}
