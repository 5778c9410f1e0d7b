//! Similarity, ranking, and orchestration for lessonterms.
//!
//! - [`similarity`]: greedy stem-root overlap and the close-match rule.
//! - [`ranker`]: exact + close frequency ranking over extracted terms.
//! - [`tracker`]: [`TermTracker`], which fetches shared lessons for a project
//!   type and ranks their metadata terms.

pub mod ranker;
pub mod similarity;
pub mod tracker;

pub use ranker::{RankOutcome, rank_metadata_terms, rank_metadata_terms_with};
pub use similarity::{Similarity, SimilarityRule, is_close_match, roots_match};
pub use tracker::TermTracker;
