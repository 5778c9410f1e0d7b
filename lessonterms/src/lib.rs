//! # lessonterms
//!
//! Ranked "most common terms" for lessons-learned metadata, per project type.
//!
//! Every lessons-learned record carries free-text metadata tags typed by
//! different people over many years. lessonterms pulls the tags of all
//! shared lessons for a project type, flattens nested tag values, folds case
//! and punctuation variants onto one exact term, and ranks terms by how often
//! they occur exactly and how often near-duplicates of them occur.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lessonterms::prelude::*;
//!
//! asupersync::test_utils::run_test_with_cx(|cx| async move {
//!     let store = InMemoryLessonStore::new()
//!         .add_lesson(LessonRecord::shared("ll-1", "construction", MetadataValue::tags(["Cost Overrun"])))
//!         .add_lesson(LessonRecord::shared("ll-2", "construction", MetadataValue::tags(["cost", "permits"])));
//!
//!     let tracker = TermTracker::from_sync(store, Arc::new(PorterStemmer::english()));
//!     let top = tracker.top_terms(&cx, "construction", 10).await.expect("rank");
//!
//!     for entry in &top {
//!         println!("{}: {} exact, {} close", entry.term, entry.exact_count, entry.close_count);
//!     }
//! });
//! ```
//!
//! # Pipeline
//!
//! ```text
//!  project type ─► shared lesson ids ─► metadata rows ─► extract leaves
//!                                                             │
//!                                                        normalize
//!                                                             │
//!                                           stem sets ─► close-match pairs
//!                                                             │
//!                                        exact + close counts ─► top K
//! ```
//!
//! ## Crate Layout
//!
//! | Crate | Purpose |
//! |-------|---------|
//! | [`lessonterms-core`](core) | Value model, extraction, normalization, stemming, traits, errors, config |
//! | [`lessonterms-rank`](rank) | Similarity rule, ranker, [`TermTracker`] |
//!
//! # Feature Flags
//!
//! | Feature  | Description                                         |
//! |----------|-----------------------------------------------------|
//! | `porter` | Snowball English [`PorterStemmer`] (default)        |
//!
//! # Async Runtime
//!
//! Data-source calls take an asupersync `&Cx` as their first parameter. The
//! library never creates its own runtime.

// ─── Sub-crate module aliases ───────────────────────────────────────────────

/// Value model, text pipeline, traits, errors, and config.
pub use lessonterms_core as core;
/// Similarity, ranking, and orchestration.
pub use lessonterms_rank as rank;

/// Capability context for structured concurrency (from asupersync).
pub use asupersync::Cx;

// ─── Core types ─────────────────────────────────────────────────────────────

pub use lessonterms_core::config::TrackerConfig;
pub use lessonterms_core::error::{TermError, TermResult};
pub use lessonterms_core::types::{LessonId, MetadataRow, RankedTerm, RankingMetrics};
pub use lessonterms_core::value::{MetadataValue, Scalar};

// Text pipeline
pub use lessonterms_core::canonicalize::{normalize_term, tokenize};
pub use lessonterms_core::extract::{extract, extract_into};
#[cfg(feature = "porter")]
pub use lessonterms_core::stem::PorterStemmer;
pub use lessonterms_core::stem::{IdentityStemmer, StemSet, Stemmer};

// Traits
pub use lessonterms_core::traits::{
    LessonSource, NoOpRankingObserver, RankingObserver, SharedRankingObserver, SyncLessonSource,
    SyncLessonSourceAdapter, TermFuture,
};

// ─── Ranking ────────────────────────────────────────────────────────────────

pub use lessonterms_rank::{
    RankOutcome, Similarity, SimilarityRule, TermTracker, is_close_match, rank_metadata_terms,
    rank_metadata_terms_with,
};

// ─── In-memory store ────────────────────────────────────────────────────────

mod lesson_store;
pub use lesson_store::{InMemoryLessonStore, LessonRecord};

// ─── Prelude ────────────────────────────────────────────────────────────────

/// Convenience re-exports for common usage.
pub mod prelude {
    #[cfg(feature = "porter")]
    pub use crate::PorterStemmer;
    pub use crate::{
        IdentityStemmer, InMemoryLessonStore, LessonRecord, LessonSource, MetadataValue,
        RankedTerm, Stemmer, TermError, TermResult, TermTracker, TrackerConfig,
    };
}
