// WHY: comments and other free-form prose are rewritten term by term instead of by raw
// substring, so "the" survives while a standalone "he" is replaced

pub mod document;

pub use document::{Document, Sentence, Term, TokenProseEngine};

use tracing::trace;

use crate::dictionary::TermDictionary;
use crate::error::EngineError;

/// Capability needed from a natural-language toolkit: parse, grammar-aware
/// replace of one term, and serialization back to text.
pub trait ProseEngine: Send + Sync {
    type Document;

    fn parse(&self, text: &str) -> Self::Document;

    fn replace_term(&self, document: Self::Document, term: &str, replacement: &str) -> Self::Document;

    fn serialize(&self, document: &Self::Document) -> String;
}

/// Applies every dictionary entry, in order, through a [`ProseEngine`]
#[derive(Debug)]
pub struct ProseRewriter<E: ProseEngine = TokenProseEngine> {
    engine: E,
    entries: Vec<(String, String)>,
}

impl ProseRewriter<TokenProseEngine> {
    pub fn new(dictionary: &TermDictionary) -> Result<Self, EngineError> {
        Ok(Self::with_engine(TokenProseEngine::new()?, dictionary))
    }
}

impl<E: ProseEngine> ProseRewriter<E> {
    pub fn with_engine(engine: E, dictionary: &TermDictionary) -> Self {
        let entries = dictionary
            .entries()
            .map(|(t, r)| (t.to_string(), r.to_string()))
            .collect();
        Self { engine, entries }
    }

    /// Rewrite prose; entries are applied one after another, so a later entry
    /// sees the output of earlier ones.
    pub fn rewrite_prose(&self, text: &str) -> String {
        let mut document = self.engine.parse(text);
        for (term, replacement) in &self.entries {
            document = self.engine.replace_term(document, term, replacement);
        }
        let rewritten = self.engine.serialize(&document);
        if rewritten != text {
            trace!(original = text, rewritten = %rewritten, "Prose rewritten");
        }
        rewritten
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter() -> ProseRewriter {
        ProseRewriter::new(&TermDictionary::builtin().unwrap()).unwrap()
    }

    #[test]
    fn test_men_becomes_descriptive_phrase() {
        let rewritten = rewriter().rewrite_prose("This section is for men.");
        assert_eq!(
            rewritten,
            "This section is for a person that identifies as an individual and maybe a man."
        );
    }

    #[test]
    fn test_prose_leaves_embedded_terms_alone() {
        let rewriter = rewriter();
        assert_eq!(rewriter.rewrite_prose("Then the theme changed."), "Then the theme changed.");
        assert_eq!(rewriter.rewrite_prose("He is the master."), "They is the primary.");
    }

    #[test]
    fn test_prose_prefers_longer_terms_listed_first() {
        let rewriter = rewriter();
        assert_eq!(
            rewriter.rewrite_prose("Ask him/her, or he/she will ask the chairman."),
            "Ask them, or they will ask the chairperson."
        );
    }

    #[test]
    fn test_prose_multi_word_terms() {
        let rewriter = rewriter();
        assert_eq!(
            rewriter.rewrite_prose("Ladies and gentlemen, a quick sanity check."),
            "Everyone, a quick confidence check."
        );
    }

    struct Shouting;

    impl ProseEngine for Shouting {
        type Document = String;

        fn parse(&self, text: &str) -> String {
            text.to_string()
        }

        fn replace_term(&self, document: String, term: &str, replacement: &str) -> String {
            document.replace(term, &replacement.to_uppercase())
        }

        fn serialize(&self, document: &String) -> String {
            document.clone()
        }
    }

    #[test]
    fn test_custom_engine() {
        let dictionary = TermDictionary::new(&[("slave", "secondary")], &["x"]).unwrap();
        let rewriter = ProseRewriter::with_engine(Shouting, &dictionary);
        assert_eq!(rewriter.rewrite_prose("a slave node"), "a SECONDARY node");
    }
}
