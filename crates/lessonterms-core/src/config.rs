//! Configuration for the term tracker.
//!
//! [`TrackerConfig`] holds the result limit and the three constants of the
//! close-match rule. The defaults reproduce the reference behavior; changing
//! them changes which terms are merged, so golden outputs only hold for the
//! defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TermError, TermResult};

/// Default number of ranked entries returned.
pub const DEFAULT_LIMIT: usize = 10;
/// Default Jaccard ratio at or above which two stem sets are a close match.
pub const DEFAULT_CLOSE_MATCH_THRESHOLD: f64 = 0.5;
/// Default minimum stem length (in chars) for prefix root matching.
pub const DEFAULT_MIN_AFFIX_LEN: usize = 4;
/// Default maximum extra stems allowed by the size-skew fallback.
pub const DEFAULT_MAX_SIZE_SKEW: usize = 1;

/// Configuration for ranking and close-match detection.
///
/// # Environment Variable Overrides
///
/// | Variable                            | Field                   | Default |
/// |-------------------------------------|-------------------------|---------|
/// | `LESSONTERMS_DEFAULT_LIMIT`         | `default_limit`         | `10`    |
/// | `LESSONTERMS_CLOSE_MATCH_THRESHOLD` | `close_match_threshold` | `0.5`   |
/// | `LESSONTERMS_MIN_AFFIX_LEN`         | `min_affix_len`         | `4`     |
/// | `LESSONTERMS_MAX_SIZE_SKEW`         | `max_size_skew`         | `1`     |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Entries returned when the caller does not pass a limit.
    pub default_limit: usize,

    /// Stem-set similarity (intersection / union) needed for a close match.
    pub close_match_threshold: f64,

    /// Two different stems root-match only if both are at least this long
    /// and one is a prefix of the other.
    pub min_affix_len: usize,

    /// Size-skew fallback: the larger stem set may exceed the fully absorbed
    /// smaller one by at most this many stems.
    pub max_size_skew: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            close_match_threshold: DEFAULT_CLOSE_MATCH_THRESHOLD,
            min_affix_len: DEFAULT_MIN_AFFIX_LEN,
            max_size_skew: DEFAULT_MAX_SIZE_SKEW,
        }
    }
}

impl TrackerConfig {
    /// Load overrides from environment variables.
    ///
    /// Only overrides fields for which environment variables are set.
    /// Invalid values are ignored (current values are kept).
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("LESSONTERMS_DEFAULT_LIMIT")
            && let Ok(limit) = val.parse::<usize>()
        {
            self.default_limit = limit;
        }
        if let Ok(val) = std::env::var("LESSONTERMS_CLOSE_MATCH_THRESHOLD")
            && let Ok(threshold) = val.parse::<f64>()
            && threshold > 0.0
            && threshold <= 1.0
        {
            self.close_match_threshold = threshold;
        }
        if let Ok(val) = std::env::var("LESSONTERMS_MIN_AFFIX_LEN")
            && let Ok(len) = val.parse::<usize>()
            && len > 0
        {
            self.min_affix_len = len;
        }
        if let Ok(val) = std::env::var("LESSONTERMS_MAX_SIZE_SKEW")
            && let Ok(skew) = val.parse::<usize>()
        {
            self.max_size_skew = skew;
        }
        self
    }

    /// Load a TOML config file, falling back to defaults.
    ///
    /// Missing files yield defaults silently; unparsable files yield defaults
    /// with a warning. Keys absent from the file keep their defaults.
    #[must_use]
    pub fn from_toml_file(path: &Path) -> Self {
        std::fs::read_to_string(path).map_or_else(
            |_| Self::default(),
            |contents| match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "failed to parse tracker config, using defaults"
                    );
                    Self::default()
                }
            },
        )
    }

    /// Checks that every field is in range.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> TermResult<()> {
        if !(self.close_match_threshold > 0.0 && self.close_match_threshold <= 1.0) {
            return Err(TermError::InvalidConfig {
                field: "close_match_threshold".to_owned(),
                value: self.close_match_threshold.to_string(),
                reason: "must be in (0, 1]".to_owned(),
            });
        }
        if self.min_affix_len == 0 {
            return Err(TermError::InvalidConfig {
                field: "min_affix_len".to_owned(),
                value: "0".to_owned(),
                reason: "prefix matching needs at least one character".to_owned(),
            });
        }
        Ok(())
    }
}
