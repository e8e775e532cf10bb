//! Character and number counts over a prepared document
//!
//! Letters and digits are counted in the ASCII range only. Numbers are counted after
//! separators between digits are removed (`1,000.50` becomes one number) and the
//! remaining ASCII punctuation is turned into spaces.

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[-+(]?[$€£]?[-+(]?\d+\)?\b").unwrap());

/// Count of `A`-`Z` characters
pub fn count_alphabetic(text: &str) -> u64 {
    text.bytes().filter(u8::is_ascii_uppercase).count() as u64
}

/// Count of `0`-`9` characters
pub fn count_digits(text: &str) -> u64 {
    text.bytes().filter(u8::is_ascii_digit).count() as u64
}

/// Count of number tokens
pub fn count_numbers(text: &str) -> u64 {
    let cleaned = blank_punctuation(&strip_digit_separators(text));
    NUMBER_REGEX.find_iter(&cleaned).count() as u64
}

/// Remove `.` and `,` wherever both neighbours are ASCII digits
pub fn strip_digit_separators(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let between_digits = matches!(c, '.' | ',')
            && previous.is_some_and(|p| p.is_ascii_digit())
            && chars.peek().is_some_and(char::is_ascii_digit);
        if !between_digits {
            out.push(c);
        }
        previous = Some(c);
    }
    out
}

/// Replace every ASCII punctuation character with a space
pub fn blank_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
        .collect()
}
