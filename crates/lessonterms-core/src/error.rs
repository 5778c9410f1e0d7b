/// Unified error type for the lessonterms pipeline.
///
/// The ranking pipeline itself is infallible: empty inputs produce empty
/// results rather than errors. Failures come from the lesson data source,
/// from invalid configuration, or from decoding stored metadata. Data-source
/// errors are handed back to the caller exactly as the source produced them.
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    /// The lesson data source failed (transport, query, or permission error).
    #[error("Data source {source_name} failed: {source}. The ranking call was aborted; no partial result is produced.")]
    DataSource {
        /// Identifier of the source that failed.
        source_name: String,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A configuration value is invalid.
    #[error("Invalid config: {field} = \"{value}\": {reason}")]
    InvalidConfig {
        /// Which config field.
        field: String,
        /// The invalid value.
        value: String,
        /// Why it is invalid.
        reason: String,
    },

    /// Stored lesson metadata could not be decoded into a value tree.
    #[error("Failed to decode lesson metadata: {detail}. Check that the payload is a JSON document.")]
    MetadataDecode {
        /// What went wrong.
        detail: String,
    },

    /// Wraps `std::io::Error` for fixture and config file access.
    #[error("I/O error: {0}. Check the path and file permissions.")]
    Io(#[from] std::io::Error),
}

impl TermError {
    /// Wraps an arbitrary collaborator error as a [`TermError::DataSource`].
    pub fn data_source(
        source_name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::DataSource {
            source_name: source_name.into(),
            source: source.into(),
        }
    }
}

/// Convenience alias used throughout the lessonterms crates.
pub type TermResult<T> = Result<T, TermError>;
