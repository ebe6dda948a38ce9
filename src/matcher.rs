// WHY: one leftmost-first alternation over every term; term order decides overlaps

use regex_automata::{meta::Regex, util::syntax, Input};
use tracing::debug;

use crate::dictionary::TermDictionary;
use crate::error::EngineError;

/// Compiled union of all dictionary terms
#[derive(Debug)]
pub struct PatternMatcher {
    regex: Regex,
    dictionary: TermDictionary,
}

impl PatternMatcher {
    /// Compile the dictionary terms, in dictionary order and unescaped, into one
    /// case-insensitive pattern.
    pub fn new(dictionary: TermDictionary) -> Result<Self, EngineError> {
        if let Some(index) = dictionary.entries().position(|(term, _)| term.is_empty()) {
            return Err(EngineError::EmptyTerm { index });
        }

        let pattern = dictionary
            .entries()
            .map(|(term, _)| term)
            .collect::<Vec<_>>()
            .join("|");

        let regex = Regex::builder()
            .syntax(syntax::Config::new().case_insensitive(true))
            .build(&pattern)
            .map_err(|e| EngineError::MatchCompilation {
                message: e.to_string(),
            })?;

        debug!("Compiled term pattern with {} alternatives", dictionary.len());

        Ok(Self { regex, dictionary })
    }

    pub fn dictionary(&self) -> &TermDictionary {
        &self.dictionary
    }

    /// Whether any term occurs anywhere in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(Input::new(text))
    }

    /// Byte ranges of every non-overlapping match, left to right
    pub fn find_all(&self, text: &str) -> Vec<std::ops::Range<usize>> {
        self.regex.find_iter(text).map(|m| m.range()).collect()
    }

    /// Replace every match with its dictionary replacement.
    ///
    /// A match whose lowercase form is not a key (possible with Unicode case
    /// folding, e.g. the Kelvin sign matching `k`) is passed through as is.
    pub fn find_and_replace_all(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut last = 0;

        for m in self.regex.find_iter(text) {
            let matched = &text[m.range()];
            result.push_str(&text[last..m.start()]);
            match self.dictionary.lookup(matched) {
                Some(replacement) => result.push_str(replacement),
                None => result.push_str(matched),
            }
            last = m.end();
        }

        result.push_str(&text[last..]);
        result
    }
}
