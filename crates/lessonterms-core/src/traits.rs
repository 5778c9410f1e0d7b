//! Collaborator traits for the term tracker.
//!
//! - [`LessonSource`]: the lessons datastore (lesson ids by project type,
//!   metadata rows by lesson id).
//! - [`SyncLessonSource`] + [`SyncLessonSourceAdapter`]: bridge for blocking
//!   clients.
//! - [`RankingObserver`]: telemetry sink for ranking calls.
//!
//! Async operations are boxed futures so the traits stay dyn-compatible
//! (`Arc<dyn LessonSource>`).

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use asupersync::Cx;

use crate::error::{TermError, TermResult};
use crate::types::{LessonId, MetadataRow, RankingMetrics};

/// Boxed future carrying a `TermResult<T>`.
pub type TermFuture<'a, T> = Pin<Box<dyn Future<Output = TermResult<T>> + Send + 'a>>;

// ─── Lesson Source ──────────────────────────────────────────────────────────

/// Read access to the lessons-learned datastore.
///
/// # Contract
///
/// - `lesson_ids_for_project_type` returns only lessons of the given project
///   type that have **no owning organization** (shared lessons).
/// - `metadata_for_lessons` returns the metadata payloads for the given ids,
///   in any order.
/// - Failures are reported as `TermError` and are propagated to the caller of
///   the tracker unchanged. Retry and backoff are the implementor's concern.
pub trait LessonSource: Send + Sync {
    /// Ids of shared lessons belonging to `project_type_id`.
    ///
    /// # Errors
    ///
    /// Returns `TermError` on transport or query failure.
    fn lesson_ids_for_project_type<'a>(
        &'a self,
        cx: &'a Cx,
        project_type_id: &'a str,
    ) -> TermFuture<'a, Vec<LessonId>>;

    /// Metadata rows for the given lessons.
    ///
    /// # Errors
    ///
    /// Returns `TermError` on transport or query failure.
    fn metadata_for_lessons<'a>(
        &'a self,
        cx: &'a Cx,
        lesson_ids: &'a [LessonId],
    ) -> TermFuture<'a, Vec<MetadataRow>>;

    /// Stable identifier used in logs and error messages.
    fn id(&self) -> &str;
}

/// Blocking variant of [`LessonSource`].
///
/// Wrap an implementor in [`SyncLessonSourceAdapter`] to use it wherever a
/// [`LessonSource`] is expected.
pub trait SyncLessonSource: Send + Sync {
    /// Ids of shared lessons belonging to `project_type_id`.
    ///
    /// # Errors
    ///
    /// Returns `TermError` on lookup failure.
    fn lesson_ids_for_project_type_sync(&self, project_type_id: &str)
    -> TermResult<Vec<LessonId>>;

    /// Metadata rows for the given lessons.
    ///
    /// # Errors
    ///
    /// Returns `TermError` on lookup failure.
    fn metadata_for_lessons_sync(&self, lesson_ids: &[LessonId]) -> TermResult<Vec<MetadataRow>>;

    /// Stable identifier used in logs and error messages.
    fn id(&self) -> &str;
}

/// Adapts a [`SyncLessonSource`] into an async [`LessonSource`].
pub struct SyncLessonSourceAdapter<T: SyncLessonSource>(pub T);

impl<T: SyncLessonSource + 'static> LessonSource for SyncLessonSourceAdapter<T> {
    fn lesson_ids_for_project_type<'a>(
        &'a self,
        _cx: &'a Cx,
        project_type_id: &'a str,
    ) -> TermFuture<'a, Vec<LessonId>> {
        Box::pin(async move { self.0.lesson_ids_for_project_type_sync(project_type_id) })
    }

    fn metadata_for_lessons<'a>(
        &'a self,
        _cx: &'a Cx,
        lesson_ids: &'a [LessonId],
    ) -> TermFuture<'a, Vec<MetadataRow>> {
        Box::pin(async move { self.0.metadata_for_lessons_sync(lesson_ids) })
    }

    fn id(&self) -> &str {
        self.0.id()
    }
}

// ─── Ranking Observer ───────────────────────────────────────────────────────

/// Telemetry sink for ranking calls.
///
/// Callbacks run inline on the ranking path and must not block.
pub trait RankingObserver: fmt::Debug + Send + Sync {
    /// Called after a ranking call returns successfully.
    fn on_ranking_completed(&self, metrics: &RankingMetrics);

    /// Called when a ranking call fails. The error is still returned to the
    /// caller afterwards.
    fn on_error(&self, error: &TermError);
}

/// Shared handle for dynamic observers.
pub type SharedRankingObserver = Arc<dyn RankingObserver>;

/// Observer that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpRankingObserver;

impl RankingObserver for NoOpRankingObserver {
    fn on_ranking_completed(&self, _: &RankingMetrics) {}

    fn on_error(&self, _: &TermError) {}
}
