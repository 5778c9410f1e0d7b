//! Span names shared by the tracker's pipeline phases.
//!
//! The library never installs a subscriber. Consumers filter on these names,
//! for example:
//! ```text
//! RUST_LOG=lessonterms=debug
//! ```

/// Span names used across the pipeline.
pub mod span_names {
    /// Root span for one project-type ranking call.
    pub const TOP_TERMS: &str = "lessonterms::top_terms";
    /// Lesson-id lookup.
    pub const FETCH_LESSON_IDS: &str = "lessonterms::fetch_lesson_ids";
    /// Metadata row fetch.
    pub const FETCH_METADATA: &str = "lessonterms::fetch_metadata";
    /// Exact/close counting and sorting.
    pub const RANK: &str = "lessonterms::rank";
}
