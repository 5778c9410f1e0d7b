//! Fuzzy close-match detection between stem sets.
//!
//! Two stems *root-match* when they are equal, or when both are at least
//! `min_affix_len` chars long and one is a prefix of the other
//! (`"schedul"` / `"schedule"`). Overlap between two stem sets is a greedy
//! one-to-one matching: each stem of the first set claims the first unused
//! root-matching stem of the second.
//!
//! The decision is then:
//!
//! ```text
//! union      = |A| + |B| - overlap
//! similarity = overlap / union
//! close      = similarity >= threshold
//!           || (overlap > 0 && overlap == min(|A|,|B|)
//!               && max(|A|,|B|) <= min(|A|,|B|) + max_size_skew)
//! ```
//!
//! The greedy matching is not a maximum bipartite matching and can undercount
//! overlap on adversarial prefix chains. The first set iterated is always the
//! lexically smaller one, which makes the relation exactly symmetric.

use lessonterms_core::config::{
    DEFAULT_CLOSE_MATCH_THRESHOLD, DEFAULT_MAX_SIZE_SKEW, DEFAULT_MIN_AFFIX_LEN, TrackerConfig,
};
use lessonterms_core::stem::StemSet;
use serde::{Deserialize, Serialize};

/// Constants of the close-match rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityRule {
    /// Minimum `overlap / union` for a close match. Default: 0.5.
    pub threshold: f64,
    /// Minimum stem length for prefix root matching. Default: 4.
    pub min_affix_len: usize,
    /// Extra stems tolerated by the size-skew fallback. Default: 1.
    pub max_size_skew: usize,
}

impl Default for SimilarityRule {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CLOSE_MATCH_THRESHOLD,
            min_affix_len: DEFAULT_MIN_AFFIX_LEN,
            max_size_skew: DEFAULT_MAX_SIZE_SKEW,
        }
    }
}

impl From<&TrackerConfig> for SimilarityRule {
    fn from(config: &TrackerConfig) -> Self {
        Self {
            threshold: config.close_match_threshold,
            min_affix_len: config.min_affix_len,
            max_size_skew: config.max_size_skew,
        }
    }
}

/// Overlap statistics for a pair of stem sets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Similarity {
    /// Greedy one-to-one root-match count.
    pub intersection: usize,
    /// `|A| + |B| - intersection`.
    pub union: usize,
    /// `intersection / union`, or 0.0 when either set is empty.
    pub ratio: f64,
}

impl SimilarityRule {
    /// Whether two stems share a root.
    #[must_use]
    pub fn roots_match(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        a.chars().count() >= self.min_affix_len
            && b.chars().count() >= self.min_affix_len
            && (a.starts_with(b) || b.starts_with(a))
    }

    /// Greedy one-to-one overlap count between two stem sets.
    #[must_use]
    pub fn greedy_overlap(&self, a: &StemSet, b: &StemSet) -> usize {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let candidates: Vec<&str> = second.iter().collect();
        let mut used = vec![false; candidates.len()];
        let mut overlap = 0;

        for stem in first.iter() {
            let claimed = candidates
                .iter()
                .enumerate()
                .find(|&(idx, other)| !used[idx] && self.roots_match(stem, other))
                .map(|(idx, _)| idx);
            if let Some(idx) = claimed {
                used[idx] = true;
                overlap += 1;
            }
        }

        overlap
    }

    /// Overlap statistics for `a` and `b`.
    #[must_use]
    pub fn similarity(&self, a: &StemSet, b: &StemSet) -> Similarity {
        if a.is_empty() || b.is_empty() {
            return Similarity {
                intersection: 0,
                union: a.len() + b.len(),
                ratio: 0.0,
            };
        }
        let intersection = self.greedy_overlap(a, b);
        let union = a.len() + b.len() - intersection;
        #[allow(clippy::cast_precision_loss)]
        let ratio = intersection as f64 / union as f64;
        Similarity {
            intersection,
            union,
            ratio,
        }
    }

    /// Whether `a` and `b` are near-duplicates.
    #[must_use]
    pub fn is_close_match(&self, a: &StemSet, b: &StemSet) -> bool {
        if a.is_empty() || b.is_empty() {
            return false;
        }
        let sim = self.similarity(a, b);
        if sim.ratio >= self.threshold {
            return true;
        }

        let smaller = a.len().min(b.len());
        let larger = a.len().max(b.len());
        sim.intersection > 0
            && sim.intersection == smaller
            && larger <= smaller + self.max_size_skew
    }
}

/// [`SimilarityRule::is_close_match`] with the default constants.
#[must_use]
pub fn is_close_match(a: &StemSet, b: &StemSet) -> bool {
    SimilarityRule::default().is_close_match(a, b)
}

/// [`SimilarityRule::roots_match`] with the default constants.
#[must_use]
pub fn roots_match(a: &str, b: &str) -> bool {
    SimilarityRule::default().roots_match(a, b)
}
