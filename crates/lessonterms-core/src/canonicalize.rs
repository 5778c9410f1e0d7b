//! Term normalization and tokenization.
//!
//! Metadata tags are typed by hand over many years, so the same concept shows
//! up as `"Cost Overrun"`, `"cost-overrun"` and `" cost_overrun! "`. The
//! normalizer folds those variants onto one exact term:
//! 1. NFC Unicode normalization
//! 2. Lowercasing
//! 3. Underscores, hyphens and whitespace become word separators
//! 4. Every other character outside `[a-z0-9]` is dropped
//! 5. Separator runs collapse to one space; no leading/trailing space
//!
//! Word characters are ASCII only. NFC runs first so that precomposed and
//! decomposed spellings of the same text drop the same characters.
//!
//! The tokenizer then splits a normalized term into `[a-z0-9]+` runs and
//! drops single-character tokens.

use unicode_normalization::UnicodeNormalization;

/// Tokens shorter than this (in chars) are discarded as noise.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Normalizes a raw metadata string into a term.
///
/// The result may be empty; callers must drop empty terms before counting.
/// `normalize_term(normalize_term(x)) == normalize_term(x)` for every `x`.
#[must_use]
pub fn normalize_term(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for c in raw.nfc().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push(' ');
            }
            pending_separator = false;
            out.push(c);
        } else if c.is_whitespace() || c == '_' || c == '-' {
            pending_separator = true;
        }
    }

    out
}

/// Splits a term into its `[a-z0-9]+` tokens, dropping 1-char tokens.
///
/// Normalizes first, so raw and pre-normalized input yield the same tokens.
#[must_use]
pub fn tokenize(term: &str) -> Vec<String> {
    normalize_term(term)
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_owned)
        .collect()
}
