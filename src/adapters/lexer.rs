// WHY: lightweight scanners for source formats; one multi-pattern regex, earliest
// listed pattern wins when two start at the same offset

use std::ops::Range;

use regex_automata::meta::Regex;

use crate::error::EngineError;

/// Token scanner over a fixed, ordered list of (kind, pattern) rules
#[derive(Debug)]
pub(crate) struct Lexer<K> {
    regex: Regex,
    kinds: Vec<K>,
}

impl<K: Copy> Lexer<K> {
    pub(crate) fn new(rules: &[(K, &str)]) -> Result<Self, EngineError> {
        let patterns: Vec<&str> = rules.iter().map(|(_, p)| *p).collect();
        let regex = Regex::new_many(&patterns).map_err(|e| EngineError::MatchCompilation {
            message: e.to_string(),
        })?;
        Ok(Self {
            regex,
            kinds: rules.iter().map(|(k, _)| *k).collect(),
        })
    }

    /// Non-overlapping tokens left to right; text matching no rule is skipped
    pub(crate) fn tokens<'t>(&'t self, text: &'t str) -> impl Iterator<Item = (K, Range<usize>)> + 't {
        self.regex
            .find_iter(text)
            .map(move |m| (self.kinds[m.pattern().as_usize()], m.range()))
    }
}

/// Shared patterns for C-family comments and quoted strings
pub(crate) const BLOCK_COMMENT: &str = r"/\*[\s\S]*?\*/";
pub(crate) const UNTERMINATED_BLOCK_COMMENT: &str = r"/\*";
pub(crate) const LINE_COMMENT: &str = r"//[^\n]*";
pub(crate) const DOUBLE_QUOTED: &str = r#""(?:[^"\\\n]|\\[\s\S])*""#;
pub(crate) const SINGLE_QUOTED: &str = r"'(?:[^'\\\n]|\\[\s\S])*'";
