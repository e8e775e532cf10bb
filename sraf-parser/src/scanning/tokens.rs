//! Word tokens
//!
//! A token is a maximal run of word characters (letters, digits, underscore).
//! Everything else separates tokens and is dropped; logos reports those spans as
//! errors, which are filtered out.
use logos::Logos;

#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    #[regex(r"\w+")]
    Word,
}

/// Iterate over the word tokens of `source`, borrowing each slice
pub fn words(source: &str) -> impl Iterator<Item = &str> + '_ {
    let mut lexer = Token::lexer(source);
    std::iter::from_fn(move || loop {
        match lexer.next()? {
            Ok(Token::Word) => return Some(lexer.slice()),
            Err(()) => continue,
        }
    })
}

/// A token counts toward the statistics only if it is longer than one character and
/// is not made of digits alone. Lexicon membership is checked by the caller.
pub fn is_candidate(word: &str) -> bool {
    let mut chars = word.chars();
    let long_enough = chars.next().is_some() && chars.next().is_some();
    long_enough && !word.chars().all(char::is_numeric)
}
