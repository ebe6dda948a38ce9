// WHY: second pass over rewritten text; any "gender"/"sex" substring replaces the whole blob

/// Prefix of the canonical option enumeration
pub const GENDER_OPTIONS_PREFIX: &str = "Gender options: ";

const TRIGGERS: &[&str] = &["gender", "sex"];

/// Detects gender prompts and expands them into the inclusive option list
#[derive(Debug, Clone)]
pub struct GenderOptionDetector {
    expansion: String,
}

impl GenderOptionDetector {
    pub fn new<S: AsRef<str>>(options: &[S]) -> Self {
        let joined = options
            .iter()
            .map(|o| o.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            expansion: format!("{GENDER_OPTIONS_PREFIX}{joined}"),
        }
    }

    /// Case-insensitive substring test, no word boundaries ("Essex" triggers too)
    pub fn triggers(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        TRIGGERS.iter().any(|t| lowered.contains(t))
    }

    /// Replace `text` wholesale with the option enumeration when it mentions gender
    pub fn detect_and_expand(&self, text: &str) -> String {
        if self.triggers(text) {
            self.expansion.clone()
        } else {
            text.to_string()
        }
    }
}
