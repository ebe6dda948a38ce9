// WHY: the engine owns the compiled dictionary and exposes the three rewrite passes;
// it is immutable after construction and shared process-wide

use std::sync::OnceLock;

use tracing::info;

use crate::dictionary::TermDictionary;
use crate::error::EngineError;
use crate::gender::GenderOptionDetector;
use crate::matcher::PatternMatcher;
use crate::prose::ProseRewriter;
use crate::rewriter::LiteralRewriter;
use crate::span::{SpanKind, SpanOutcome, TextSpan};

static SHARED_ENGINE: OnceLock<Result<RewriteEngine, EngineError>> = OnceLock::new();

/// Literal, prose and gender-option passes over one dictionary
#[derive(Debug)]
pub struct RewriteEngine {
    matcher: PatternMatcher,
    prose: ProseRewriter,
    gender: GenderOptionDetector,
}

impl RewriteEngine {
    pub fn new(dictionary: TermDictionary) -> Result<Self, EngineError> {
        let prose = ProseRewriter::new(&dictionary)?;
        let gender = GenderOptionDetector::new(dictionary.gender_options());
        let matcher = PatternMatcher::new(dictionary)?;
        Ok(Self {
            matcher,
            prose,
            gender,
        })
    }

    /// Engine over the built-in dictionary
    pub fn builtin() -> Result<Self, EngineError> {
        let engine = Self::new(TermDictionary::builtin()?)?;
        info!("Rewrite engine ready with {} terms", engine.dictionary().len());
        Ok(engine)
    }

    /// Process-wide engine, built on first use
    pub fn shared() -> Result<&'static RewriteEngine, EngineError> {
        SHARED_ENGINE
            .get_or_init(Self::builtin)
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn dictionary(&self) -> &TermDictionary {
        self.matcher.dictionary()
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    /// Substring-level substitution
    pub fn rewrite(&self, text: &str) -> String {
        LiteralRewriter::new(&self.matcher).rewrite(text)
    }

    /// Term-level substitution for free-form prose
    pub fn rewrite_prose(&self, text: &str) -> String {
        self.prose.rewrite_prose(text)
    }

    /// Gender-option expansion; meant to run after `rewrite`/`rewrite_prose`
    pub fn detect_and_expand(&self, text: &str) -> String {
        self.gender.detect_and_expand(text)
    }

    /// Route a span by kind, then run the gender-option pass on the result
    pub fn process(&self, span: &TextSpan) -> SpanOutcome {
        let rewritten = match span.kind {
            SpanKind::Literal => self.rewrite(&span.content),
            SpanKind::Prose => self.rewrite_prose(&span.content),
        };
        let text = self.detect_and_expand(&rewritten);
        let changed = text != span.content;
        SpanOutcome { text, changed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPANDED: &str = "Gender options: male, female, non-binary, genderqueer, genderfluid, agender, bigender, pangender, androgyne, demiboy, demigirl, neutrois, two-spirit";

    fn engine() -> &'static RewriteEngine {
        RewriteEngine::shared().unwrap()
    }

    #[test]
    fn test_process_literal_span() {
        let outcome = engine().process(&TextSpan::literal("he is a good man"));
        assert_eq!(outcome.text, "they is a good individual");
        assert!(outcome.changed);
    }

    #[test]
    fn test_process_prose_span() {
        let outcome = engine().process(&TextSpan::prose("This section is for men."));
        assert!(outcome
            .text
            .contains("a person that identifies as an individual and maybe a man"));
        assert!(!outcome.text.contains("men."));
    }

    #[test]
    fn test_process_unchanged_span() {
        let outcome = engine().process(&TextSpan::literal("const value = 42;"));
        assert_eq!(outcome.text, "const value = 42;");
        assert!(!outcome.changed);
    }

    #[test]
    fn test_gender_prompt_after_literal_rewrite() {
        let outcome = engine().process(&TextSpan::literal("Please select your gender"));
        assert_eq!(outcome.text, EXPANDED);
    }

    #[test]
    fn test_sex_is_rewritten_before_detection() {
        let engine = engine();
        assert_eq!(engine.rewrite("sex"), "gender");
        assert_eq!(engine.process(&TextSpan::literal("sex")).text, EXPANDED);
        assert_eq!(engine.process(&TextSpan::prose("Your sex?")).text, EXPANDED);
    }

    #[test]
    fn test_shared_engine_is_singleton() {
        let a = RewriteEngine::shared().unwrap() as *const RewriteEngine;
        let b = RewriteEngine::shared().unwrap() as *const RewriteEngine;
        assert_eq!(a, b);
    }
}
