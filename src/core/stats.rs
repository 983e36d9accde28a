//! Aggregate statistics over the filtered record set
//!
//! Statistics always describe the whole filtered set, not the visible page.
//! Every filtered record lands in exactly one bucket of each distribution;
//! unresolvable references and missing timestamps go to the reserved
//! `"unknown"` bucket instead of being dropped, so bucket sums always equal
//! the filtered total.

use crate::core::record::Record;
use crate::resolver::ResolverRegistry;
use indexmap::IndexMap;

/// Reserved bucket for records whose grouping key cannot be derived
pub const UNKNOWN_BUCKET: &str = "unknown";

/// Counts, average and grouped distributions over one filtered set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatisticsSnapshot {
    /// Count of filtered records
    pub total: usize,

    /// Mean score rounded to one decimal; `None` when no record carries a
    /// score. Unscored records are excluded from numerator and denominator.
    pub average_score: Option<f64>,

    /// Count grouped by the resolved display name of the chosen reference
    pub by_reference: IndexMap<String, usize>,

    /// Count grouped by calendar period (`YYYY-MM`) of the timestamp
    pub by_period: IndexMap<String, usize>,
}

/// Derive statistics for `records`, grouping references through the
/// `reference_slot` directory
pub fn aggregate<R: Record>(
    records: &[R],
    reference_slot: &str,
    resolvers: &ResolverRegistry,
) -> StatisticsSnapshot {
    let mut by_reference: IndexMap<String, usize> = IndexMap::new();
    let mut by_period: IndexMap<String, usize> = IndexMap::new();
    let mut score_sum = 0u64;
    let mut scored = 0usize;

    for record in records {
        if let Some(score) = record.bounded_score() {
            score_sum += u64::from(score);
            scored += 1;
        }

        let name = record
            .reference(reference_slot)
            .and_then(|id| resolvers.display_name(reference_slot, id))
            .unwrap_or_else(|| UNKNOWN_BUCKET.to_string());
        *by_reference.entry(name).or_insert(0) += 1;

        let period = record
            .occurred_at()
            .map(|at| at.format("%Y-%m").to_string())
            .unwrap_or_else(|| UNKNOWN_BUCKET.to_string());
        *by_period.entry(period).or_insert(0) += 1;
    }

    let average_score = (scored > 0).then(|| {
        let mean = score_sum as f64 / scored as f64;
        (mean * 10.0).round() / 10.0
    });

    StatisticsSnapshot {
        total: records.len(),
        average_score,
        by_reference,
        by_period,
    }
}
