//! Exact + fuzzy frequency ranking of metadata terms.
//!
//! For every distinct normalized term the ranker reports how often it occurs
//! verbatim (`exact_count`) and how many occurrences of *other* distinct
//! terms are close matches to it (`close_count`). Entries are ordered by
//! exact count, then close count (both descending), then term ascending.
//!
//! Comparison is O(n²) over distinct terms. Each unordered pair is tested
//! once and credited to both sides, which is sound because the close-match
//! relation is symmetric.

use std::collections::BTreeMap;

use lessonterms_core::canonicalize::normalize_term;
use lessonterms_core::stem::{StemSet, Stemmer};
use lessonterms_core::types::RankedTerm;
use tracing::{debug, instrument};

use crate::similarity::SimilarityRule;

/// Ranked entries plus the counts the tracker reports as metrics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankOutcome {
    /// At most `limit` entries in ranking order.
    pub entries: Vec<RankedTerm>,
    /// Distinct non-empty normalized terms seen.
    pub distinct_terms: usize,
    /// Unordered pairs of distinct terms judged a close match.
    pub close_pairs: usize,
}

/// Ranks `terms` with the default close-match rule.
///
/// Inputs are normalized (idempotently) and empty terms are dropped, so raw
/// extracted strings can be passed directly.
#[must_use]
pub fn rank_metadata_terms<I, S>(terms: I, limit: usize, stemmer: &dyn Stemmer) -> Vec<RankedTerm>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    rank_metadata_terms_with(terms, limit, stemmer, &SimilarityRule::default()).entries
}

/// Ranks `terms` with an explicit close-match rule.
#[instrument(skip_all, fields(limit, stemmer_id = stemmer.id()))]
pub fn rank_metadata_terms_with<I, S>(
    terms: I,
    limit: usize,
    stemmer: &dyn Stemmer,
    rule: &SimilarityRule,
) -> RankOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let exact_counts = count_exact(terms);
    let distinct_terms = exact_counts.len();
    if distinct_terms == 0 || limit == 0 {
        return RankOutcome {
            entries: Vec::new(),
            distinct_terms,
            close_pairs: 0,
        };
    }

    let distinct: Vec<(String, usize)> = exact_counts.into_iter().collect();
    let stem_sets: Vec<StemSet> = distinct
        .iter()
        .map(|(term, _)| StemSet::build(term, stemmer))
        .collect();

    let mut close_counts = vec![0_usize; distinct.len()];
    let mut close_pairs = 0;
    for i in 0..distinct.len() {
        for j in (i + 1)..distinct.len() {
            if rule.is_close_match(&stem_sets[i], &stem_sets[j]) {
                close_counts[i] += distinct[j].1;
                close_counts[j] += distinct[i].1;
                close_pairs += 1;
            }
        }
    }

    let mut entries: Vec<RankedTerm> = distinct
        .into_iter()
        .zip(close_counts)
        .map(|((term, exact), close)| RankedTerm::new(term, exact, close))
        .collect();
    entries.sort_by(RankedTerm::cmp_for_ranking);
    entries.truncate(limit);

    debug!(
        distinct_terms,
        close_pairs,
        returned = entries.len(),
        "ranked metadata terms"
    );

    RankOutcome {
        entries,
        distinct_terms,
        close_pairs,
    }
}

/// Occurrences per distinct non-empty normalized term.
fn count_exact<I, S>(terms: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = BTreeMap::new();
    for raw in terms {
        let term = normalize_term(raw.as_ref());
        if term.is_empty() {
            continue;
        }
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}
