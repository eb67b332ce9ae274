//! Value patterns for query and path parameters.

use std::sync::LazyLock;

use regex::Regex;

/// Builds a regex that only matches the whole input.
fn full_match(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{pattern})$")).expect("value patterns are valid regexes")
}

static NUMBER: LazyLock<Regex> = LazyLock::new(|| full_match(r"[1-9]\d{0,8}"));
static LANGUAGE: LazyLock<Regex> = LazyLock::new(|| full_match(r"(?:en|nb|nn|,)+"));
static NON_EMPTY: LazyLock<Regex> = LazyLock::new(|| full_match(r".*\S.*"));
static FREE_TEXT: LazyLock<Regex> = LazyLock::new(|| full_match(r"[\w\-,\.: ]*\w[\w\-,\.: ]*"));
static STATUS: LazyLock<Regex> =
    LazyLock::new(|| full_match(r"(?i)CONCLUDED|ACTIVE|NOT[ +]*STARTED"));
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    full_match(r"\d{4}-\d{2}-\d{2}(?:T\d{2}:\d{2}:\d{2}(?:\.\d{1,6})?Z?)?")
});
static URL: LazyLock<Regex> = LazyLock::new(|| {
    full_match(r"https?://[-a-zA-Z0-9@:%._+~#=]{2,256}\.[a-z]{2,6}\b[-a-zA-Z0-9@:%_+.~#?&/=]*")
});
static ORGANIZATION_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| full_match(r"(?:\d+\.){3}\d+"));
static PERSON_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| full_match(r"[1-9]\d*|\d{4}-\d{4}-\d{4}-\d{3}[\dXx]"));
static BOOLEAN: LazyLock<Regex> = LazyLock::new(|| full_match(r"(?i)true|false"));

/// Validation pattern attached to a parameter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePattern {
    /// Positive integer without leading zeros, at most nine digits.
    Number,
    /// Comma separated list of `en`, `nb` and `nn`.
    Language,
    /// Anything containing a non-whitespace character.
    NonEmpty,
    /// Search text: letters, digits, dash, comma, period, colon and spaces.
    FreeText,
    /// Project status, case insensitive.
    Status,
    /// ISO date, optionally with time.
    Date,
    /// Absolute http(s) URL.
    Url,
    /// Cristin organization identifier such as `185.90.0.0`.
    OrganizationIdentifier,
    /// Cristin person number or ORCID.
    PersonIdentifier,
    /// `true` or `false`.
    Boolean,
}

impl ValuePattern {
    pub fn regex(self) -> &'static Regex {
        match self {
            ValuePattern::Number => &NUMBER,
            ValuePattern::Language => &LANGUAGE,
            ValuePattern::NonEmpty => &NON_EMPTY,
            ValuePattern::FreeText => &FREE_TEXT,
            ValuePattern::Status => &STATUS,
            ValuePattern::Date => &DATE,
            ValuePattern::Url => &URL,
            ValuePattern::OrganizationIdentifier => &ORGANIZATION_IDENTIFIER,
            ValuePattern::PersonIdentifier => &PERSON_IDENTIFIER,
            ValuePattern::Boolean => &BOOLEAN,
        }
    }

    /// True when the whole value matches.
    pub fn matches(self, value: &str) -> bool {
        self.regex().is_match(value)
    }
}
