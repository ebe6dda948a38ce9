// WHY: term-level document model so replacements respect word and sentence boundaries
// Serialization is lossless: every byte of the input is owned by exactly one field

use regex_automata::meta::Regex;

use super::ProseEngine;
use crate::error::EngineError;

/// Characters that end a sentence when found in a term's trailing punctuation
pub const END_PUNCTUATION: &[char] = &['.', '?', '!'];

/// Title abbreviations whose period does not end a sentence ("Dr. Smith")
pub const TITLE_ABBREVIATIONS: &[&str] = &["Dr.", "Mr.", "Mrs.", "Ms.", "Prof.", "Sr.", "Jr."];

const POSSESSIVE_SUFFIXES: &[&str] = &["'s", "\u{2019}s"];

/// One whitespace-delimited word with its punctuation split off
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Term {
    /// Leading punctuation such as an opening quote or parenthesis
    pub pre: String,
    /// The word itself; may contain inner punctuation ("he/she", "man-made")
    pub text: String,
    /// Possessive suffix kept apart so "men's" still matches "men"
    pub suffix: String,
    /// Trailing punctuation
    pub post: String,
    /// Whitespace that follows the term
    pub whitespace: String,
}

impl Term {
    fn from_chunk(chunk: &str, whitespace: &str) -> Self {
        let is_word_char = |c: char| c.is_alphanumeric();

        let Some(first) = chunk.find(is_word_char) else {
            // Pure punctuation ("--", "*") carries no word
            return Self {
                pre: chunk.to_string(),
                whitespace: whitespace.to_string(),
                ..Self::default()
            };
        };
        let last = chunk
            .char_indices()
            .rev()
            .find(|(_, c)| is_word_char(*c))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(chunk.len());

        let mut text = &chunk[first..last];
        let mut suffix = "";
        for possessive in POSSESSIVE_SUFFIXES {
            let Some(split) = text.len().checked_sub(possessive.len()) else {
                continue;
            };
            if split > 0 && text.is_char_boundary(split) && text[split..].eq_ignore_ascii_case(possessive) {
                suffix = &text[split..];
                text = &text[..split];
                break;
            }
        }

        Self {
            pre: chunk[..first].to_string(),
            text: text.to_string(),
            suffix: suffix.to_string(),
            post: chunk[last..].to_string(),
            whitespace: whitespace.to_string(),
        }
    }

    fn ends_sentence(&self) -> bool {
        if !self.post.contains(END_PUNCTUATION) {
            return false;
        }
        let word = format!("{}.", self.text);
        !(self.post.starts_with('.') && TITLE_ABBREVIATIONS.contains(&word.as_str()))
    }

    fn write_to(&self, out: &mut String) {
        out.push_str(&self.pre);
        out.push_str(&self.text);
        out.push_str(&self.suffix);
        out.push_str(&self.post);
        out.push_str(&self.whitespace);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    pub terms: Vec<Term>,
}

/// Parsed prose: leading whitespace followed by sentences of terms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub leading: String,
    pub sentences: Vec<Sentence>,
}

impl Document {
    pub fn term_count(&self) -> usize {
        self.sentences.iter().map(|s| s.terms.len()).sum()
    }
}

/// Built-in prose engine: whitespace tokenization, punctuation-aware terms,
/// sentence boundaries on end punctuation.
#[derive(Debug)]
pub struct TokenProseEngine {
    chunk: Regex,
}

impl TokenProseEngine {
    pub fn new() -> Result<Self, EngineError> {
        let chunk = Regex::new(r"\S+").map_err(|e| EngineError::MatchCompilation {
            message: e.to_string(),
        })?;
        Ok(Self { chunk })
    }
}

impl ProseEngine for TokenProseEngine {
    type Document = Document;

    fn parse(&self, text: &str) -> Document {
        let chunks: Vec<_> = self.chunk.find_iter(text).map(|m| m.range()).collect();

        let mut document = Document {
            leading: text[..chunks.first().map_or(text.len(), |r| r.start)].to_string(),
            sentences: Vec::new(),
        };
        let mut current = Sentence::default();

        for (i, range) in chunks.iter().enumerate() {
            let whitespace_end = chunks.get(i + 1).map_or(text.len(), |next| next.start);
            let term = Term::from_chunk(&text[range.clone()], &text[range.end..whitespace_end]);
            let ends = term.ends_sentence();
            current.terms.push(term);
            if ends {
                document.sentences.push(std::mem::take(&mut current));
            }
        }
        if !current.terms.is_empty() {
            document.sentences.push(current);
        }

        document
    }

    fn replace_term(&self, mut document: Document, term: &str, replacement: &str) -> Document {
        let needle: Vec<String> = term.split_whitespace().map(str::to_lowercase).collect();
        let words: Vec<&str> = replacement.split_whitespace().collect();
        if needle.is_empty() || words.is_empty() {
            return document;
        }

        for sentence in &mut document.sentences {
            let mut i = 0;
            while i + needle.len() <= sentence.terms.len() {
                if !matches_at(&sentence.terms[i..i + needle.len()], &needle) {
                    i += 1;
                    continue;
                }

                let first = &sentence.terms[i];
                let last = &sentence.terms[i + needle.len() - 1];
                let case = Casing::of(&first.text);
                let count = words.len();

                let replaced: Vec<Term> = words
                    .iter()
                    .enumerate()
                    .map(|(j, word)| Term {
                        pre: if j == 0 { first.pre.clone() } else { String::new() },
                        text: case.apply(word, j == 0),
                        suffix: if j + 1 == count { last.suffix.clone() } else { String::new() },
                        post: if j + 1 == count { last.post.clone() } else { String::new() },
                        whitespace: if j + 1 == count { last.whitespace.clone() } else { " ".to_string() },
                    })
                    .collect();

                sentence.terms.splice(i..i + needle.len(), replaced);
                i += count;
            }
        }

        document
    }

    fn serialize(&self, document: &Document) -> String {
        let mut out = document.leading.clone();
        for term in document.sentences.iter().flat_map(|s| s.terms.iter()) {
            term.write_to(&mut out);
        }
        out
    }
}

/// Whole-term, case-insensitive match; inner words may not carry punctuation
fn matches_at(terms: &[Term], needle: &[String]) -> bool {
    let last = needle.len() - 1;
    terms.iter().zip(needle).enumerate().all(|(j, (term, word))| {
        term.text.to_lowercase() == *word
            && (j == 0 || term.pre.is_empty())
            && (j == last || (term.post.is_empty() && term.suffix.is_empty()))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Casing {
    Lower,
    Title,
    Upper,
}

impl Casing {
    fn of(word: &str) -> Self {
        let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
        if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
            Casing::Upper
        } else if letters.first().is_some_and(|c| c.is_uppercase()) {
            Casing::Title
        } else {
            Casing::Lower
        }
    }

    fn apply(self, word: &str, is_first: bool) -> String {
        match self {
            Casing::Upper => word.to_uppercase(),
            Casing::Title if is_first => {
                let mut chars = word.chars();
                match chars.next() {
                    Some(c) => c.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
            _ => word.to_string(),
        }
    }
}
