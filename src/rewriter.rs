// WHY: identifiers, string literals and markup text get raw substring substitution;
// no tokenization, so surrounding characters and spacing are preserved verbatim

use crate::matcher::PatternMatcher;

/// Substring-level rewriter over the compiled term pattern
#[derive(Debug, Clone, Copy)]
pub struct LiteralRewriter<'m> {
    matcher: &'m PatternMatcher,
}

impl<'m> LiteralRewriter<'m> {
    pub fn new(matcher: &'m PatternMatcher) -> Self {
        Self { matcher }
    }

    pub fn rewrite(&self, text: &str) -> String {
        self.matcher.find_and_replace_all(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::TermDictionary;

    fn matcher() -> PatternMatcher {
        PatternMatcher::new(TermDictionary::builtin().unwrap()).unwrap()
    }

    #[test]
    fn test_literal_sentence() {
        let matcher = matcher();
        let rewriter = LiteralRewriter::new(&matcher);
        // no agreement between tokens on the literal path
        assert_eq!(rewriter.rewrite("he is a good man"), "they is a good individual");
    }

    #[test]
    fn test_literal_identifiers_stay_identifiers() {
        let matcher = matcher();
        let rewriter = LiteralRewriter::new(&matcher);
        assert_eq!(rewriter.rewrite("masterNode"), "primaryNode");
        assert_eq!(rewriter.rewrite("slave_count"), "secondary_count");
        assert_eq!(rewriter.rewrite("BLACKLIST"), "blocklist");
    }

    #[test]
    fn test_literal_case_insensitive() {
        let matcher = matcher();
        let rewriter = LiteralRewriter::new(&matcher);
        for input in ["HE/SHE", "He/She", "he/she"] {
            assert_eq!(rewriter.rewrite(input), "they");
        }
    }

    #[test]
    fn test_literal_passthrough() {
        let matcher = matcher();
        let rewriter = LiteralRewriter::new(&matcher);
        let text = "  primary\tallowlist  \n  nothing to do ";
        assert_eq!(rewriter.rewrite(text), text);
    }
}
