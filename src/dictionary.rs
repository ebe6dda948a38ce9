// WHY: single source of truth for banned terms; entry order drives matcher precedence

use std::collections::{HashMap, HashSet};

use crate::error::EngineError;

/// Banned terms and their replacements, in precedence order.
///
/// Earlier entries win when several terms match at the same position, so
/// longer terms that contain shorter ones ("he/she" and "he", "mankind" and
/// "man") are listed first. "man" precedes "men" so the prose path does not
/// rewrite the "a man" that the "men" replacement introduces.
pub const TERMS: &[(&str, &str)] = &[
    ("blacklist", "blocklist"),
    ("whitelist", "allowlist"),
    ("master", "primary"),
    ("slave", "secondary"),
    ("mankind", "humankind"),
    ("manpower", "workforce"),
    ("man-made", "artificial"),
    ("man-hours", "person-hours"),
    ("chairman", "chairperson"),
    ("policeman", "police officer"),
    ("fireman", "firefighter"),
    ("mailman", "mail carrier"),
    ("ladies and gentlemen", "everyone"),
    ("guys", "folks"),
    ("he/she", "they"),
    ("his/her", "their"),
    ("him/her", "them"),
    ("he", "they"),
    ("she", "they"),
    ("man", "individual"),
    ("men", "a person that identifies as an individual and maybe a man"),
    ("sanity check", "confidence check"),
    ("dummy value", "placeholder value"),
    ("grandfathered", "legacy"),
    ("crippled", "impaired"),
    ("tone deaf", "oblivious"),
    ("blind spot", "gap"),
    ("native feature", "built-in feature"),
    ("sex", "gender"),
];

/// Inclusive gender-identity labels substituted by the gender-option detector
pub const GENDER_OPTIONS: &[&str] = &[
    "male",
    "female",
    "non-binary",
    "genderqueer",
    "genderfluid",
    "agender",
    "bigender",
    "pangender",
    "androgyne",
    "demiboy",
    "demigirl",
    "neutrois",
    "two-spirit",
];

/// Immutable, ordered mapping from banned term to replacement
#[derive(Debug, Clone)]
pub struct TermDictionary {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
    gender_options: Vec<String>,
}

impl TermDictionary {
    /// Build a dictionary from ordered entries and validate its invariants
    pub fn new(entries: &[(&str, &str)], gender_options: &[&str]) -> Result<Self, EngineError> {
        let entries: Vec<(String, String)> = entries
            .iter()
            .map(|(term, replacement)| (term.to_string(), replacement.to_string()))
            .collect();
        let gender_options: Vec<String> = gender_options.iter().map(|o| o.to_string()).collect();

        let mut index = HashMap::with_capacity(entries.len());
        for (i, (term, replacement)) in entries.iter().enumerate() {
            if term.is_empty() {
                return Err(EngineError::EmptyTerm { index: i });
            }
            if *term != term.to_lowercase() {
                return Err(EngineError::NotLowercase { term: term.clone() });
            }
            if replacement.is_empty() {
                return Err(EngineError::EmptyReplacement { term: term.clone() });
            }
            if index.insert(term.clone(), i).is_some() {
                return Err(EngineError::DuplicateTerm { term: term.clone() });
            }
        }

        // WHY: one rewrite pass must be enough, so no replacement may be a key itself
        for (_, replacement) in &entries {
            if index.contains_key(&replacement.to_lowercase()) {
                return Err(EngineError::ReplacementIsTerm {
                    replacement: replacement.clone(),
                });
            }
        }

        if gender_options.is_empty() {
            return Err(EngineError::NoGenderOptions);
        }
        let mut seen = HashSet::new();
        for option in &gender_options {
            if !seen.insert(option.as_str()) {
                return Err(EngineError::DuplicateGenderOption {
                    option: option.clone(),
                });
            }
        }

        Ok(Self {
            entries,
            index,
            gender_options,
        })
    }

    /// The built-in dictionary
    pub fn builtin() -> Result<Self, EngineError> {
        Self::new(TERMS, GENDER_OPTIONS)
    }

    /// Case-insensitive lookup of a term's replacement
    pub fn lookup(&self, term: &str) -> Option<&str> {
        self.index
            .get(&term.to_lowercase())
            .map(|&i| self.entries[i].1.as_str())
    }

    /// Entries in precedence order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, r)| (t.as_str(), r.as_str()))
    }

    pub fn gender_options(&self) -> &[String] {
        &self.gender_options
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
