// JavaScript / TypeScript: identifiers and string literals take the literal path,
// comment bodies take the prose path

use tracing::debug;

use super::lexer::{self, Lexer};
use super::FormatAdapter;
use crate::error::{AdapterError, EngineError};
use crate::position::LineIndex;
use crate::span::{SpanKind, TextSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    LineComment,
    BlockComment,
    UnterminatedComment,
    String,
    Template,
    Number,
    Identifier,
}

const RULES: &[(Token, &str)] = &[
    (Token::LineComment, lexer::LINE_COMMENT),
    (Token::BlockComment, lexer::BLOCK_COMMENT),
    (Token::UnterminatedComment, lexer::UNTERMINATED_BLOCK_COMMENT),
    (Token::String, lexer::DOUBLE_QUOTED),
    (Token::String, lexer::SINGLE_QUOTED),
    (Token::Template, r"`(?:[^`\\]|\\[\s\S])*`"),
    (Token::Number, r"[0-9][0-9A-Za-z_.]*"),
    (Token::Identifier, r"[\p{L}_$][\p{L}\p{N}_$]*"),
];

/// Reserved words are never reported; they cannot be renamed
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "break", "case", "catch", "class", "const", "continue",
    "debugger", "declare", "default", "delete", "do", "else", "enum", "export", "extends", "false",
    "finally", "for", "from", "function", "get", "if", "implements", "import", "in", "instanceof",
    "interface", "let", "new", "null", "of", "package", "private", "protected", "public", "return",
    "set", "static", "super", "switch", "this", "throw", "true", "try", "type", "typeof",
    "undefined", "var", "void", "while", "with", "yield",
];

pub struct JavaScriptAdapter {
    lexer: Lexer<Token>,
}

impl JavaScriptAdapter {
    pub fn new() -> Result<Self, EngineError> {
        Ok(Self {
            lexer: Lexer::new(RULES)?,
        })
    }
}

impl FormatAdapter for JavaScriptAdapter {
    fn name(&self) -> &'static str {
        "javascript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["js", "jsx", "mjs", "cjs", "ts", "tsx"]
    }

    fn extract_spans(&self, source: &str) -> Result<Vec<TextSpan>, AdapterError> {
        let index = LineIndex::new(source);
        let mut spans = Vec::new();

        for (token, range) in self.lexer.tokens(source) {
            let (kind, body) = match token {
                Token::LineComment => (SpanKind::Prose, range.start + 2..range.end),
                Token::BlockComment => (SpanKind::Prose, range.start + 2..range.end - 2),
                Token::String | Token::Template => (SpanKind::Literal, range.start + 1..range.end - 1),
                Token::Identifier if !KEYWORDS.contains(&&source[range.clone()]) => {
                    (SpanKind::Literal, range)
                }
                Token::UnterminatedComment => {
                    let location = index.location(range.start);
                    return Err(AdapterError::Parse {
                        line: location.line,
                        column: location.column,
                        message: "unterminated block comment".to_string(),
                    });
                }
                Token::Identifier | Token::Number => continue,
            };

            if source[body.clone()].trim().is_empty() {
                continue;
            }
            spans.push(TextSpan::new(
                &source[body.clone()],
                kind,
                index.location(body.start),
                Some(body),
            ));
        }

        debug!("Extracted {} javascript spans", spans.len());
        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RewriteEngine;
    use crate::position::Location;

    fn adapter() -> JavaScriptAdapter {
        JavaScriptAdapter::new().unwrap()
    }

    #[test]
    fn test_extracts_identifiers_strings_and_comments() {
        let source = "// primary note\nconst masterNode = \"slave\"; /* he said */\n";
        let spans = adapter().extract_spans(source).unwrap();
        let contents: Vec<(&str, SpanKind)> = spans.iter().map(|s| (s.content.as_str(), s.kind)).collect();

        assert_eq!(
            contents,
            vec![
                (" primary note", SpanKind::Prose),
                ("masterNode", SpanKind::Literal),
                ("slave", SpanKind::Literal),
                (" he said ", SpanKind::Prose),
            ]
        );
        assert_eq!(spans[1].location, Location { line: 2, column: 7 });
        assert_eq!(spans[2].range, Some(36..41));
    }

    #[test]
    fn test_comment_markers_inside_strings_are_text() {
        let spans = adapter().extract_spans("let url = 'http://host/*x';").unwrap();
        let contents: Vec<&str> = spans.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["url", "http://host/*x"]);
    }

    #[test]
    fn test_numbers_are_skipped() {
        let spans = adapter().extract_spans("x = 0x1he + 2e10;").unwrap();
        let contents: Vec<&str> = spans.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["x"]);
    }

    #[test]
    fn test_unterminated_comment_is_parse_error() {
        let err = adapter().extract_spans("let a = 1;\n/* never closed").unwrap_err();
        assert!(matches!(err, AdapterError::Parse { line: 2, column: 1, .. }));
    }

    #[test]
    fn test_lint_source_reports_changed_spans() {
        let engine = RewriteEngine::shared().unwrap();
        let source = "// he wrote this\nconst blacklist = [];\nconst ok = 1;\n";
        let diagnostics = adapter().lint_source(engine, source).unwrap();

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].rewritten, " they wrote this");
        assert_eq!(
            diagnostics[0].message,
            "Use inclusive term: \" they wrote this\" instead of \" he wrote this\""
        );
        assert_eq!(diagnostics[1].original, "blacklist");
        assert_eq!(diagnostics[1].message, "Use inclusive term 'blocklist' instead of 'blacklist'");
        assert_eq!(diagnostics[1].location, Location { line: 2, column: 7 });
    }
}
