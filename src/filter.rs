//! Predicate filtering of a token list.
//!
//! `filter` never fails outright: a pattern that won't compile, or a length
//! that won't parse, comes back in `FilterOutcome::error` with empty results
//! and zeroed counts (other than `total`).
use clap::ValueEnum;
use fxhash::FxHashSet;
use regex::RegexBuilder;
use std::fmt;
use thiserror::Error;

/// What a filter tests each token for
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, ValueEnum)]
pub enum FilterKind {
    /// The token contains the value
    #[default]
    Contains,
    /// The token begins with the value
    #[value(alias = "startsWith")]
    StartsWith,
    /// The token ends with the value
    #[value(alias = "endsWith")]
    EndsWith,
    /// The token is the value
    Exact,
    /// The value, as a regular expression, matches somewhere in the token
    Regex,
    /// The token has exactly the value's number of characters
    #[value(alias = "lengthEquals")]
    #[value(alias = "length")]
    LengthEquals,
    /// The token has more characters than the value
    #[value(alias = "lengthGreater")]
    LengthGreater,
    /// The token has fewer characters than the value
    #[value(alias = "lengthLess")]
    LengthLess,
}

impl FilterKind {
    /// Does this kind compare token lengths against a number?
    #[must_use]
    pub fn is_length(self) -> bool {
        matches!(self, FilterKind::LengthEquals | FilterKind::LengthGreater | FilterKind::LengthLess)
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::Contains => "contains",
            FilterKind::StartsWith => "startsWith",
            FilterKind::EndsWith => "endsWith",
            FilterKind::Exact => "exact",
            FilterKind::Regex => "regex",
            FilterKind::LengthEquals => "lengthEquals",
            FilterKind::LengthGreater => "lengthGreater",
            FilterKind::LengthLess => "lengthLess",
        };
        f.write_str(name)
    }
}

/// A filter rule
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSpec {
    /// Which test to apply
    pub kind: FilterKind,
    /// The text, pattern or number the test uses
    pub value: String,
    /// When false, tokens and `value` are compared without regard to case
    pub case_sensitive: bool,
    /// When true, the result is the tokens that *don't* match
    pub invert: bool,
}

/// Why a filter couldn't run. The `Display` text is shown to the user as is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// `FilterKind::Regex` with a value that isn't a valid pattern
    #[error("Invalid regex pattern")]
    InvalidRegexPattern,
    /// A length kind with a value that isn't an integer
    #[error("Invalid length value")]
    InvalidLengthValue,
}

/// The result of `filter`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOutcome<'data> {
    /// Tokens satisfying the test, in input order, duplicates kept
    pub matched: Vec<&'data str>,
    /// `matched`, or with `invert` the tokens not in `matched`
    pub filtered: Vec<&'data str>,
    /// The number of input tokens
    pub total: usize,
    /// `matched.len()`
    pub matched_count: usize,
    /// `filtered.len()`
    pub filtered_count: usize,
    /// Set when the filter value couldn't be used
    pub error: Option<FilterError>,
}

impl<'data> FilterOutcome<'data> {
    fn new(tokens: &[&'data str], matched: Vec<&'data str>, invert: bool) -> Self {
        let filtered = if invert {
            let matched: FxHashSet<&str> = matched.iter().copied().collect();
            tokens.iter().copied().filter(|t| !matched.contains(t)).collect()
        } else {
            matched.clone()
        };
        FilterOutcome {
            total: tokens.len(),
            matched_count: matched.len(),
            filtered_count: filtered.len(),
            matched,
            filtered,
            error: None,
        }
    }

    fn failed(tokens: &[&'data str], error: FilterError) -> Self {
        tracing::debug!(%error, tokens = tokens.len(), "filter value rejected");
        FilterOutcome { total: tokens.len(), error: Some(error), ..FilterOutcome::default() }
    }
}

/// Applies `spec` to `tokens`.
#[must_use]
pub fn filter<'data>(tokens: &[&'data str], spec: &FilterSpec) -> FilterOutcome<'data> {
    if tokens.is_empty() {
        return FilterOutcome::default();
    }
    if !spec.kind.is_length() && spec.value.trim().is_empty() {
        return FilterOutcome::new(tokens, Vec::new(), spec.invert);
    }

    let matched = match spec.kind {
        FilterKind::Regex => {
            let Ok(regex) =
                RegexBuilder::new(&spec.value).case_insensitive(!spec.case_sensitive).build()
            else {
                return FilterOutcome::failed(tokens, FilterError::InvalidRegexPattern);
            };
            keep(tokens, |token| regex.is_match(token))
        }
        FilterKind::LengthEquals | FilterKind::LengthGreater | FilterKind::LengthLess => {
            let Some(wanted) = parse_int(&spec.value) else {
                return FilterOutcome::failed(tokens, FilterError::InvalidLengthValue);
            };
            let wanted = i128::from(wanted);
            keep(tokens, |token| {
                // A `usize` always fits in an `i128`
                let length = i128::try_from(token.chars().count()).unwrap_or(i128::MAX);
                match spec.kind {
                    FilterKind::LengthEquals => length == wanted,
                    FilterKind::LengthGreater => length > wanted,
                    _ => length < wanted,
                }
            })
        }
        FilterKind::Contains | FilterKind::StartsWith | FilterKind::EndsWith | FilterKind::Exact => {
            let needle = fold(&spec.value, spec.case_sensitive);
            keep(tokens, |token| {
                let token = fold(token, spec.case_sensitive);
                match spec.kind {
                    FilterKind::Contains => token.contains(needle.as_str()),
                    FilterKind::StartsWith => token.starts_with(needle.as_str()),
                    FilterKind::EndsWith => token.ends_with(needle.as_str()),
                    _ => token == needle,
                }
            })
        }
    };

    let outcome = FilterOutcome::new(tokens, matched, spec.invert);
    tracing::debug!(
        kind = %spec.kind,
        total = outcome.total,
        matched = outcome.matched_count,
        filtered = outcome.filtered_count,
        "filtered list"
    );
    outcome
}

fn keep<'data>(tokens: &[&'data str], mut wanted: impl FnMut(&str) -> bool) -> Vec<&'data str> {
    tokens.iter().copied().filter(|token| wanted(token)).collect()
}

fn fold(s: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        s.to_owned()
    } else {
        s.to_lowercase()
    }
}

/// Reads a leading decimal integer the way a browser's `parseInt` does: leading
/// whitespace and one sign are skipped, digits are read up to the first
/// non-digit, and anything after that is ignored. Returns `None` if there are no
/// digits. Values too large for an `i64` saturate.
fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude = unsigned[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
