//! Nested metadata value model.
//!
//! Lesson metadata has no fixed schema. Historical rows hold plain strings,
//! arrays of tags, or keyed objects whose values are themselves tags. The
//! closed [`MetadataValue`] sum type covers every shape a JSON payload can
//! take, so the extractor can walk it structurally.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A leaf value inside a metadata tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Free text.
    Text(String),
    /// A JSON number, kept in its original textual precision.
    Number(serde_json::Number),
    /// A boolean flag.
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write_number(f, number),
            Self::Bool(flag) => write!(f, "{flag}"),
        }
    }
}

/// Integral floats render without a fractional part (`1.0` → `"1"`), so
/// they cannot collide with a different integer once the dot is stripped.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn write_number(f: &mut fmt::Formatter<'_>, number: &serde_json::Number) -> fmt::Result {
    // Largest magnitude at which every f64 is an exact integer.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    if !number.is_f64() {
        return write!(f, "{number}");
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() <= MAX_EXACT => {
            let integral = value as i64;
            write!(f, "{integral}")
        }
        _ => write!(f, "{number}"),
    }
}

/// An arbitrarily nested metadata value attached to one lesson.
///
/// Mapping entries keep their source order. Keys are structural only and are
/// never treated as terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum MetadataValue {
    /// Absent value (`null`).
    #[default]
    Null,
    /// A single leaf.
    Scalar(Scalar),
    /// An ordered list.
    Sequence(Vec<MetadataValue>),
    /// A keyed map.
    Mapping(Vec<(String, MetadataValue)>),
}

impl MetadataValue {
    /// Convenience constructor for a text leaf.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(text.into()))
    }

    /// Builds a sequence of text leaves.
    #[must_use]
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Sequence(tags.into_iter().map(Self::text).collect())
    }

    /// Returns `true` for [`MetadataValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Number of scalar leaves in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Null => 0,
            Self::Scalar(_) => 1,
            Self::Sequence(items) => items.iter().map(Self::leaf_count).sum(),
            Self::Mapping(entries) => entries.iter().map(|(_, v)| v.leaf_count()).sum(),
        }
    }

    /// Parses a JSON document into a value tree.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::MetadataDecode`](crate::TermError::MetadataDecode)
    /// when `json` is not valid JSON.
    pub fn from_json_str(json: &str) -> crate::TermResult<Self> {
        serde_json::from_str::<serde_json::Value>(json)
            .map(Self::from)
            .map_err(|e| crate::TermError::MetadataDecode {
                detail: e.to_string(),
            })
    }
}

impl From<serde_json::Value> for MetadataValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Scalar(Scalar::Bool(flag)),
            Value::Number(number) => Self::Scalar(Scalar::Number(number)),
            Value::String(text) => Self::Scalar(Scalar::Text(text)),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<MetadataValue> for serde_json::Value {
    fn from(value: MetadataValue) -> Self {
        match value {
            MetadataValue::Null => Self::Null,
            MetadataValue::Scalar(Scalar::Text(text)) => Self::String(text),
            MetadataValue::Scalar(Scalar::Number(number)) => Self::Number(number),
            MetadataValue::Scalar(Scalar::Bool(flag)) => Self::Bool(flag),
            MetadataValue::Sequence(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            MetadataValue::Mapping(entries) => {
                Self::Object(entries.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for MetadataValue {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl From<bool> for MetadataValue {
    fn from(flag: bool) -> Self {
        Self::Scalar(Scalar::Bool(flag))
    }
}

impl From<i64> for MetadataValue {
    fn from(n: i64) -> Self {
        Self::Scalar(Scalar::Number(n.into()))
    }
}
