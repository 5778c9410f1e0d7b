//! In-memory lesson store.
//!
//! [`InMemoryLessonStore`] holds lessons-learned records in insertion order
//! and serves them through [`SyncLessonSource`]. It applies the same scoping
//! rule as the production datastore query: only lessons with **no owning
//! organization** are visible to the term tracker.
//!
//! # Example
//!
//! ```rust,ignore
//! use lessonterms::{InMemoryLessonStore, LessonRecord, MetadataValue};
//!
//! let store = InMemoryLessonStore::new()
//!     .add_lesson(LessonRecord::shared("ll-1", "construction", MetadataValue::tags(["permits"])))
//!     .add_lesson(
//!         LessonRecord::shared("ll-2", "construction", MetadataValue::tags(["permit delays"]))
//!             .owned_by("org-7"),
//!     );
//! ```

use std::collections::HashSet;
use std::path::Path;

use lessonterms_core::error::{TermError, TermResult};
use lessonterms_core::traits::SyncLessonSource;
use lessonterms_core::types::{LessonId, MetadataRow};
use lessonterms_core::value::MetadataValue;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One lessons-learned record as stored by the portal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonRecord {
    /// Record id.
    pub id: LessonId,
    /// Project type the lesson was captured under.
    pub project_type_id: String,
    /// Owning organization; `None` for shared lessons.
    #[serde(default)]
    pub organization_id: Option<String>,
    /// Free-form metadata tags.
    #[serde(default)]
    pub metadata: MetadataValue,
}

impl LessonRecord {
    /// A shared (organization-less) lesson.
    #[must_use]
    pub fn shared(
        id: impl Into<LessonId>,
        project_type_id: impl Into<String>,
        metadata: impl Into<MetadataValue>,
    ) -> Self {
        Self {
            id: id.into(),
            project_type_id: project_type_id.into(),
            organization_id: None,
            metadata: metadata.into(),
        }
    }

    /// Marks the lesson as owned by `organization_id`.
    #[must_use]
    pub fn owned_by(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    /// Whether the lesson has no owning organization.
    #[must_use]
    pub const fn is_shared(&self) -> bool {
        self.organization_id.is_none()
    }
}

/// Lesson records held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLessonStore {
    lessons: Vec<LessonRecord>,
}

impl InMemoryLessonStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one record.
    #[must_use]
    pub fn add_lesson(mut self, lesson: LessonRecord) -> Self {
        self.lessons.push(lesson);
        self
    }

    /// Adds many records.
    #[must_use]
    pub fn add_lessons(mut self, lessons: impl IntoIterator<Item = LessonRecord>) -> Self {
        self.lessons.extend(lessons);
        self
    }

    /// Parses a JSON array of lesson records.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::MetadataDecode`] if `json` is not an array of
    /// records.
    pub fn from_json_str(json: &str) -> TermResult<Self> {
        let lessons: Vec<LessonRecord> =
            serde_json::from_str(json).map_err(|e| TermError::MetadataDecode {
                detail: e.to_string(),
            })?;
        debug!(lesson_count = lessons.len(), "loaded lesson fixture");
        Ok(Self { lessons })
    }

    /// Reads and parses a JSON file of lesson records.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::Io`] if the file cannot be read, or
    /// [`TermError::MetadataDecode`] if it cannot be parsed.
    pub fn from_json_file(path: &Path) -> TermResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Number of records, shared or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

impl SyncLessonSource for InMemoryLessonStore {
    fn lesson_ids_for_project_type_sync(
        &self,
        project_type_id: &str,
    ) -> TermResult<Vec<LessonId>> {
        Ok(self
            .lessons
            .iter()
            .filter(|lesson| lesson.is_shared() && lesson.project_type_id == project_type_id)
            .map(|lesson| lesson.id.clone())
            .collect())
    }

    fn metadata_for_lessons_sync(&self, lesson_ids: &[LessonId]) -> TermResult<Vec<MetadataRow>> {
        let wanted: HashSet<&LessonId> = lesson_ids.iter().collect();
        Ok(self
            .lessons
            .iter()
            .filter(|lesson| wanted.contains(&lesson.id))
            .map(|lesson| MetadataRow {
                lesson_id: Some(lesson.id.clone()),
                metadata: lesson.metadata.clone(),
            })
            .collect())
    }

    fn id(&self) -> &'static str {
        "in-memory"
    }
}
