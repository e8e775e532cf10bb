//! Month-name removal
//!
//! Filings are full of dates, and "May" would otherwise be counted as the modal
//! verb. The filter replaces each matching word with a single space before the
//! document is uppercased.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

static MAY_ANY_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bmay\b").unwrap());

static MAY_EXACT_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:May|MAY)\b").unwrap());

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonthFilter {
    /// Drop "may" in any letter case
    #[default]
    IgnoreCase,
    /// Drop only `May` and `MAY`, keeping the lowercase verb
    ExactCase,
    Disabled,
}

impl MonthFilter {
    pub fn apply<'a>(self, text: &'a str) -> Cow<'a, str> {
        match self {
            MonthFilter::IgnoreCase => MAY_ANY_CASE.replace_all(text, " "),
            MonthFilter::ExactCase => MAY_EXACT_CASE.replace_all(text, " "),
            MonthFilter::Disabled => Cow::Borrowed(text),
        }
    }
}

impl std::str::FromStr for MonthFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore-case" => Ok(MonthFilter::IgnoreCase),
            "exact-case" => Ok(MonthFilter::ExactCase),
            "disabled" => Ok(MonthFilter::Disabled),
            other => Err(format!(
                "unknown month filter '{other}' (expected ignore-case, exact-case or disabled)"
            )),
        }
    }
}
