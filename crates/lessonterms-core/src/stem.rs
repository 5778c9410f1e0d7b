//! Stemming capability and stem sets.
//!
//! Stemming is an injected capability: the ranker never reaches for a global
//! stemmer, it is handed a [`Stemmer`]. Tests use [`IdentityStemmer`] or a
//! closure; production callers use [`PorterStemmer`] (Snowball English,
//! behind the default `porter` feature).

use std::collections::BTreeSet;
use std::fmt;

use crate::canonicalize::tokenize;

/// Reduces a single token to its root form.
///
/// # Contract
///
/// - Deterministic: the same token always yields the same stem.
/// - Side-effect free.
/// - May return an empty string, which the stem-set builder discards.
pub trait Stemmer: Send + Sync {
    /// Stem one lowercase token.
    fn stem(&self, token: &str) -> String;

    /// Stable identifier used in logs.
    fn id(&self) -> &str {
        "custom"
    }
}

impl<F> Stemmer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn stem(&self, token: &str) -> String {
        self(token)
    }
}

/// Returns every token unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityStemmer;

impl Stemmer for IdentityStemmer {
    fn stem(&self, token: &str) -> String {
        token.to_owned()
    }

    fn id(&self) -> &str {
        "identity"
    }
}

/// Snowball English (Porter2) stemmer backed by `rust-stemmers`.
#[cfg(feature = "porter")]
pub struct PorterStemmer {
    inner: rust_stemmers::Stemmer,
}

#[cfg(feature = "porter")]
impl PorterStemmer {
    /// Creates an English stemmer.
    #[must_use]
    pub fn english() -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(rust_stemmers::Algorithm::English),
        }
    }
}

#[cfg(feature = "porter")]
impl Default for PorterStemmer {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(feature = "porter")]
impl fmt::Debug for PorterStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PorterStemmer").finish_non_exhaustive()
    }
}

#[cfg(feature = "porter")]
impl Stemmer for PorterStemmer {
    fn stem(&self, token: &str) -> String {
        self.inner.stem(token).into_owned()
    }

    fn id(&self) -> &str {
        "snowball-english"
    }
}

/// The set of stems derived from one term.
///
/// Backed by an ordered set so iteration order, and therefore greedy overlap
/// matching, is deterministic. Duplicate stems collapse.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StemSet(BTreeSet<String>);

impl StemSet {
    /// Tokenizes `term`, stems each token, drops empty stems.
    #[must_use]
    pub fn build(term: &str, stemmer: &dyn Stemmer) -> Self {
        tokenize(term)
            .iter()
            .map(|token| stemmer.stem(token))
            .filter(|stem| !stem.is_empty())
            .collect()
    }

    /// Number of distinct stems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no stems. Empty sets never match anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `stem` is in the set.
    #[must_use]
    pub fn contains(&self, stem: &str) -> bool {
        self.0.contains(stem)
    }

    /// Stems in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for StemSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for StemSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_owned).collect())
    }
}

impl fmt::Debug for StemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_stem_set_collapses_duplicates() {
        let set = StemSet::build("delay delay Delay", &IdentityStemmer);
        assert_eq!(set.len(), 1);
        assert!(set.contains("delay"));
    }

    #[test]
    fn stem_set_uses_normalized_tokens() {
        let set = StemSet::build("Cost-Overrun", &IdentityStemmer);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["cost", "overrun"]);
    }

    #[test]
    fn closures_are_stemmers() {
        let truncating = |token: &str| token.chars().take(4).collect::<String>();
        let set = StemSet::build("scheduling schedules", &truncating);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["sche"]);
        assert_eq!(truncating.id(), "custom");
    }

    #[test]
    fn empty_stems_are_discarded() {
        let drop_all = |_: &str| String::new();
        assert!(StemSet::build("budget timeline", &drop_all).is_empty());
    }

    #[test]
    fn single_char_terms_have_empty_stem_sets() {
        assert!(StemSet::build("a", &IdentityStemmer).is_empty());
        assert!(StemSet::build("", &IdentityStemmer).is_empty());
    }

    #[cfg(feature = "porter")]
    #[test]
    fn porter_stemmer_reduces_inflections() {
        let stemmer = PorterStemmer::english();
        assert_eq!(stemmer.stem("delays"), stemmer.stem("delay"));
        assert_eq!(stemmer.stem("overruns"), "overrun");
        let a = StemSet::build("Schedule Delays", &stemmer);
        let b = StemSet::build("schedule delay", &stemmer);
        assert_eq!(a, b);
    }
}
