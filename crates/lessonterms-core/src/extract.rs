//! Term extraction from nested metadata values.
//!
//! Every scalar leaf contributes exactly one raw string, in depth-first
//! source order. Mapping keys are skipped; `null` contributes nothing.

use crate::value::MetadataValue;

/// Flattens `value` into its raw leaf strings.
#[must_use]
pub fn extract(value: &MetadataValue) -> Vec<String> {
    let mut out = Vec::with_capacity(value.leaf_count());
    extract_into(value, &mut out);
    out
}

/// Appends the raw leaf strings of `value` to `out`.
pub fn extract_into(value: &MetadataValue, out: &mut Vec<String>) {
    match value {
        MetadataValue::Null => {}
        MetadataValue::Scalar(scalar) => out.push(scalar.to_string()),
        MetadataValue::Sequence(items) => {
            for item in items {
                extract_into(item, out);
            }
        }
        MetadataValue::Mapping(entries) => {
            for (_, item) in entries {
                extract_into(item, out);
            }
        }
    }
}
