//! Project-type term tracker.
//!
//! [`TermTracker`] answers "what are the most common metadata terms among
//! shared lessons of this project type?":
//!
//! 1. Trim the project type id; empty → empty result, no query.
//! 2. Fetch ids of lessons of that type with no owning organization.
//! 3. No ids → empty result, metadata fetch skipped.
//! 4. Fetch metadata rows, extract every leaf string.
//! 5. Rank and return the top `limit` entries.
//!
//! The two fetches run sequentially. Data-source errors are returned exactly
//! as the source produced them; there is no retry and no partial result.

use std::sync::Arc;
use std::time::Instant;

use asupersync::Cx;
use tracing::{Instrument, debug, debug_span, info_span};

use lessonterms_core::config::TrackerConfig;
use lessonterms_core::error::TermResult;
use lessonterms_core::extract::extract_into;
use lessonterms_core::stem::Stemmer;
use lessonterms_core::tracing_config::span_names;
use lessonterms_core::traits::{
    LessonSource, SharedRankingObserver, SyncLessonSource, SyncLessonSourceAdapter,
};
use lessonterms_core::types::{RankedTerm, RankingMetrics};

use crate::ranker::rank_metadata_terms_with;
use crate::similarity::SimilarityRule;

/// Ranks common metadata terms for a project type.
///
/// Holds only shared handles and immutable configuration, so one tracker can
/// serve concurrent calls for different project types.
///
/// # Usage
///
/// ```rust,ignore
/// let tracker = TermTracker::new(source, Arc::new(PorterStemmer::english()))
///     .with_config(TrackerConfig::default().with_env_overrides())?;
///
/// let top = tracker.top_terms(&cx, "construction", 10).await?;
/// for entry in &top {
///     println!("{} ({} exact, {} close)", entry.term, entry.exact_count, entry.close_count);
/// }
/// ```
pub struct TermTracker {
    source: Arc<dyn LessonSource>,
    stemmer: Arc<dyn Stemmer>,
    config: TrackerConfig,
    rule: SimilarityRule,
    observer: Option<SharedRankingObserver>,
}

impl TermTracker {
    /// Create a tracker with the default configuration.
    #[must_use]
    pub fn new(source: Arc<dyn LessonSource>, stemmer: Arc<dyn Stemmer>) -> Self {
        let config = TrackerConfig::default();
        Self {
            source,
            stemmer,
            rule: SimilarityRule::from(&config),
            config,
            observer: None,
        }
    }

    /// Create a tracker over a blocking lesson source.
    #[must_use]
    pub fn from_sync<T: SyncLessonSource + 'static>(source: T, stemmer: Arc<dyn Stemmer>) -> Self {
        Self::new(Arc::new(SyncLessonSourceAdapter(source)), stemmer)
    }

    /// Replace the configuration.
    ///
    /// # Errors
    ///
    /// Returns `TermError::InvalidConfig` if `config` fails validation.
    pub fn with_config(mut self, config: TrackerConfig) -> TermResult<Self> {
        config.validate()?;
        self.rule = SimilarityRule::from(&config);
        self.config = config;
        Ok(self)
    }

    /// Attach a telemetry observer.
    #[must_use]
    pub fn with_observer(mut self, observer: SharedRankingObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Top terms using `TrackerConfig::default_limit`.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by the lesson source.
    pub async fn top_terms_default(
        &self,
        cx: &Cx,
        project_type_id: &str,
    ) -> TermResult<Vec<RankedTerm>> {
        self.top_terms(cx, project_type_id, self.config.default_limit)
            .await
    }

    /// Top `limit` terms for `project_type_id`.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by the lesson source.
    pub async fn top_terms(
        &self,
        cx: &Cx,
        project_type_id: &str,
        limit: usize,
    ) -> TermResult<Vec<RankedTerm>> {
        let (entries, _) = self.top_terms_collect(cx, project_type_id, limit).await?;
        Ok(entries)
    }

    /// Top `limit` terms plus per-call diagnostics.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by the lesson source, unchanged.
    pub async fn top_terms_collect(
        &self,
        cx: &Cx,
        project_type_id: &str,
        limit: usize,
    ) -> TermResult<(Vec<RankedTerm>, RankingMetrics)> {
        let project_type_id = project_type_id.trim();
        let span = info_span!(
            span_names::TOP_TERMS,
            project_type_id,
            limit,
            source_id = self.source.id()
        );
        self.collect(cx, project_type_id, limit).instrument(span).await
    }

    async fn collect(
        &self,
        cx: &Cx,
        project_type_id: &str,
        limit: usize,
    ) -> TermResult<(Vec<RankedTerm>, RankingMetrics)> {
        let mut metrics = RankingMetrics {
            project_type_id: project_type_id.to_owned(),
            limit,
            ..RankingMetrics::default()
        };

        if project_type_id.is_empty() {
            debug!("empty project type id, skipping lookup");
            metrics.skip_reason = Some("empty_project_type_id".to_owned());
            self.export_metrics(&metrics);
            return Ok((Vec::new(), metrics));
        }

        let fetch_start = Instant::now();
        let lesson_ids = self
            .observe(
                self.source
                    .lesson_ids_for_project_type(cx, project_type_id)
                    .instrument(debug_span!(span_names::FETCH_LESSON_IDS))
                    .await,
            )?;
        metrics.fetch_ids_ms = fetch_start.elapsed().as_secs_f64() * 1000.0;
        metrics.lesson_count = lesson_ids.len();

        if lesson_ids.is_empty() {
            debug!("no shared lessons for project type, skipping metadata fetch");
            metrics.skip_reason = Some("no_lessons".to_owned());
            self.export_metrics(&metrics);
            return Ok((Vec::new(), metrics));
        }

        let fetch_start = Instant::now();
        let rows = self.observe(
            self.source
                .metadata_for_lessons(cx, &lesson_ids)
                .instrument(debug_span!(
                    span_names::FETCH_METADATA,
                    lesson_count = lesson_ids.len()
                ))
                .await,
        )?;
        metrics.fetch_metadata_ms = fetch_start.elapsed().as_secs_f64() * 1000.0;
        metrics.row_count = rows.len();
        debug!(
            lesson_count = metrics.lesson_count,
            row_count = metrics.row_count,
            "fetched lesson metadata"
        );

        let rank_start = Instant::now();
        let outcome = debug_span!(span_names::RANK).in_scope(|| {
            let mut raw_terms = Vec::new();
            for row in &rows {
                extract_into(&row.metadata, &mut raw_terms);
            }
            metrics.raw_term_count = raw_terms.len();
            rank_metadata_terms_with(&raw_terms, limit, self.stemmer.as_ref(), &self.rule)
        });
        metrics.rank_ms = rank_start.elapsed().as_secs_f64() * 1000.0;
        metrics.distinct_term_count = outcome.distinct_terms;
        metrics.close_pair_count = outcome.close_pairs;
        metrics.returned = outcome.entries.len();

        self.export_metrics(&metrics);
        Ok((outcome.entries, metrics))
    }

    /// Reports `result`'s error to the observer and hands `result` back.
    fn observe<T>(&self, result: TermResult<T>) -> TermResult<T> {
        if let Err(err) = &result {
            tracing::warn!(error = %err, "lesson source failed");
            if let Some(observer) = &self.observer {
                observer.on_error(err);
            }
        }
        result
    }

    fn export_metrics(&self, metrics: &RankingMetrics) {
        if let Some(observer) = &self.observer {
            observer.on_ranking_completed(metrics);
        }
    }
}

impl std::fmt::Debug for TermTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermTracker")
            .field("source", &self.source.id())
            .field("stemmer", &self.stemmer.id())
            .field("config", &self.config)
            .field("observer", &self.observer)
            .finish()
    }
}
