//! Type-aware, stable, directional sorting
//!
//! Descending order is the ascending comparator with its result reversed,
//! never a second comparator, so the two directions cannot diverge in
//! tie-breaking. Sorting uses `sort_by`, which is stable: records that
//! compare equal keep the store's iteration order.

use crate::core::field::FieldValue;
use crate::core::record::Record;
use crate::resolver::ResolverRegistry;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// The record attribute a sort is keyed by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// The timestamp attribute; missing timestamps sort earliest
    OccurredAt,
    /// The bounded numeric attribute; missing scores compare as zero
    Score,
    /// A free-text field; missing values compare as the empty string
    Text(String),
    /// The resolved display name of a reference slot
    Reference(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        // Lists open on newest-first
        SortSpec {
            key: SortKey::OccurredAt,
            direction: SortDirection::Descending,
        }
    }
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        SortSpec { key, direction }
    }
}

/// Extract the comparison value for `key` from a record
fn sort_value<R: Record>(record: &R, key: &SortKey, resolvers: &ResolverRegistry) -> FieldValue {
    match key {
        SortKey::OccurredAt => FieldValue::from(record.occurred_at()),
        SortKey::Score => record.score_value(),
        SortKey::Text(name) => {
            FieldValue::from(record.text_field(name).map(|s| s.to_string()))
        }
        SortKey::Reference(slot) => FieldValue::from(
            record
                .reference(slot)
                .and_then(|id| resolvers.display_name(slot, id)),
        ),
    }
}

/// Ascending comparison of two values under the given key's typing rules
fn compare_ascending(key: &SortKey, a: &FieldValue, b: &FieldValue) -> Ordering {
    match key {
        SortKey::OccurredAt => a.timestamp_or_min().cmp(&b.timestamp_or_min()),
        SortKey::Score => a.number_or_zero().total_cmp(&b.number_or_zero()),
        SortKey::Text(_) | SortKey::Reference(_) => {
            // Case-insensitive code-point order; consistent for RTL scripts
            a.text_or_empty()
                .to_lowercase()
                .cmp(&b.text_or_empty().to_lowercase())
        }
    }
}

/// Stable in-place sort of `records` under `spec`
pub fn sort_records<R: Record>(records: &mut [R], spec: &SortSpec, resolvers: &ResolverRegistry) {
    records.sort_by(|a, b| {
        let ord = compare_ascending(
            &spec.key,
            &sort_value(a, &spec.key, resolvers),
            &sort_value(b, &spec.key, resolvers),
        );
        match spec.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}
