//! Core types, traits, and text pipeline for the lessonterms term tracker.
//!
//! This crate defines the metadata value model ([`MetadataValue`]), the term
//! extractor, normalizer and tokenizer, the injected stemming capability
//! ([`Stemmer`], [`StemSet`]), the datastore and telemetry interfaces
//! ([`LessonSource`], [`RankingObserver`]), result types ([`RankedTerm`],
//! [`RankingMetrics`]), configuration, and the error type ([`TermError`]).
//!
//! It is depended on by every other crate in the workspace.

pub mod canonicalize;
pub mod config;
pub mod error;
pub mod extract;
pub mod stem;
pub mod tracing_config;
pub mod traits;
pub mod types;
pub mod value;

pub use asupersync::Cx;
pub use canonicalize::{MIN_TOKEN_CHARS, normalize_term, tokenize};
pub use config::{
    DEFAULT_CLOSE_MATCH_THRESHOLD, DEFAULT_LIMIT, DEFAULT_MAX_SIZE_SKEW, DEFAULT_MIN_AFFIX_LEN,
    TrackerConfig,
};
pub use error::{TermError, TermResult};
pub use extract::{extract, extract_into};
#[cfg(feature = "porter")]
pub use stem::PorterStemmer;
pub use stem::{IdentityStemmer, StemSet, Stemmer};
pub use traits::{
    LessonSource, NoOpRankingObserver, RankingObserver, SharedRankingObserver, SyncLessonSource,
    SyncLessonSourceAdapter, TermFuture,
};
pub use types::{LessonId, MetadataRow, RankedTerm, RankingMetrics};
pub use value::{MetadataValue, Scalar};
