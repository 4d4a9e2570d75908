//! Locale-aware, case-insensitive string ordering
//!
//! Approximates the root collation used by browsers for `localeCompare`:
//! accents and case only break ties, and characters are grouped by class
//! (whitespace, punctuation, symbols, digits, letters) before comparing
//! code points within a class.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Character class, in collation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Symbol,
    Digit,
    Letter,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_whitespace() {
            CharClass::Whitespace
        } else if c.is_ascii_punctuation() {
            if matches!(c, '`' | '^' | '+' | '<' | '=' | '>' | '|' | '~' | '$') {
                CharClass::Symbol
            } else {
                CharClass::Punctuation
            }
        } else if c.is_numeric() {
            CharClass::Digit
        } else if c.is_alphabetic() {
            CharClass::Letter
        } else {
            CharClass::Symbol
        }
    }
}

/// Precomputed sort key for a string
///
/// Keys compare by primary weights first (base characters with accents and
/// case removed), then by the lowercased string itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<(CharClass, char)>,
    tertiary: String,
}

impl CollationKey {
    pub fn new(s: &str) -> Self {
        let tertiary = s.to_lowercase();
        let primary = tertiary
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .map(|c| (CharClass::of(c), c))
            .collect();

        Self { primary, tertiary }
    }
}

/// Compare two strings the way the glossary sorts titles
pub fn compare(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}
