use std::fmt;

use serde::Deserialize;

/// Why a value was wrapped in double quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteReason {
    /// The value starts with a YAML indicator character.
    LeadingIndicator(char),
    /// The value contains `:` followed by whitespace.
    ColonSpace,
    /// The value is a word YAML reads as a boolean or null.
    ReservedWord,
}

impl fmt::Display for QuoteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteReason::LeadingIndicator(c) => write!(f, "starts with indicator '{}'", c),
            QuoteReason::ColonSpace => write!(f, "contains ': '"),
            QuoteReason::ReservedWord => write!(f, "reserved word"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeReport {
    pub input: String,
    pub normalized: String,
    pub output: String,
    pub reason: Option<QuoteReason>,
    pub collapsed_newlines: bool,
}

/// How stdin is split into values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Lines,
    Whole,
}
