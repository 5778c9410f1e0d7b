use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::MetadataValue;

// ---------------------------------------------------------------------------
// Data-source types
// ---------------------------------------------------------------------------

/// Opaque identifier of a lessons-learned record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(pub String);

impl LessonId {
    /// Creates an id from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LessonId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for LessonId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One row returned by the metadata fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataRow {
    /// Lesson the metadata belongs to, when the source reports it.
    #[serde(default)]
    pub lesson_id: Option<LessonId>,
    /// The raw, arbitrarily nested metadata payload.
    #[serde(default)]
    pub metadata: MetadataValue,
}

impl MetadataRow {
    /// Row without a lesson id.
    #[must_use]
    pub fn new(metadata: impl Into<MetadataValue>) -> Self {
        Self {
            lesson_id: None,
            metadata: metadata.into(),
        }
    }

    /// Attaches the owning lesson id.
    #[must_use]
    pub fn with_lesson_id(mut self, id: impl Into<LessonId>) -> Self {
        self.lesson_id = Some(id.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One entry of the ranked common-terms list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankedTerm {
    /// Normalized, non-empty term.
    pub term: String,
    /// Raw extracted terms normalizing to exactly `term`.
    pub exact_count: usize,
    /// Sum of exact counts of every other distinct term judged a close match.
    pub close_count: usize,
    /// `exact_count + close_count`. Informational; not a sort key.
    pub total_count: usize,
}

impl RankedTerm {
    /// Builds an entry and derives `total_count`.
    #[must_use]
    pub fn new(term: impl Into<String>, exact_count: usize, close_count: usize) -> Self {
        Self {
            term: term.into(),
            exact_count,
            close_count,
            total_count: exact_count + close_count,
        }
    }

    /// Ranking order: exact count desc, close count desc, term asc.
    #[must_use]
    pub fn cmp_for_ranking(&self, other: &Self) -> std::cmp::Ordering {
        other
            .exact_count
            .cmp(&self.exact_count)
            .then(other.close_count.cmp(&self.close_count))
            .then_with(|| self.term.cmp(&other.term))
    }
}

/// Diagnostics from one ranking call.
///
/// Populated by the term tracker and handed to the configured observer.
/// Latencies are in milliseconds (f64 for sub-millisecond precision).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingMetrics {
    /// Trimmed project type the call ran for.
    pub project_type_id: String,
    /// Requested result limit.
    pub limit: usize,
    /// Shared lessons found for the project type.
    pub lesson_count: usize,
    /// Metadata rows returned for those lessons.
    pub row_count: usize,
    /// Raw strings extracted from all rows (before filtering empties).
    pub raw_term_count: usize,
    /// Distinct non-empty normalized terms.
    pub distinct_term_count: usize,
    /// Unordered pairs of distinct terms judged a close match.
    pub close_pair_count: usize,
    /// Entries returned.
    pub returned: usize,
    /// Time spent fetching lesson ids.
    pub fetch_ids_ms: f64,
    /// Time spent fetching metadata rows.
    pub fetch_metadata_ms: f64,
    /// Time spent extracting and ranking.
    pub rank_ms: f64,
    /// Why the pipeline stopped early, if it did.
    pub skip_reason: Option<String>,
}
