//! Pure filter evaluators for metric records.
//!
//! Two evaluators cooperate: one for ordinary breakdown dimensions and one
//! for the reporting window, whose wildcard semantics differ. A record is
//! included only if it passes both.

use crate::core::{FilterSelection, FilterValue, MetricRecord, ALL};
use crate::metric::MetricKind;

/// Whether a record passes every relevant breakdown dimension.
///
/// Wildcard selection means "show the breakdown", so the literal "ALL"
/// summary rows are excluded; those only feed total-count computation.
/// An explicit selection passes exactly the listed values. A record that is
/// missing a relevant dimension entirely never passes.
pub fn dimension_match(
    record: &MetricRecord,
    dimensions: &[&str],
    selection: &FilterSelection,
) -> bool {
    dimensions.iter().all(|dimension| {
        let Some(value) = record.dimension(dimension) else {
            return false;
        };
        match selection.get(dimension) {
            FilterValue::All => value != ALL,
            FilterValue::Values(selected) => selected.iter().any(|s| s == value),
        }
    })
}

/// Whether a record matches the selected reporting window.
///
/// Metrics without a time dimension always match. Selecting the wildcard
/// matches every record, which is how all-time totals are computed;
/// otherwise an exact match is required.
pub fn time_period_match(
    has_time_period: bool,
    record_period: Option<&str>,
    selected_period: &str,
) -> bool {
    if !has_time_period || selected_period == ALL {
        return true;
    }
    record_period == Some(selected_period)
}

/// Apply both evaluators over a record collection, preserving order.
pub fn filtered_subset<'a>(
    records: &'a [MetricRecord],
    metric: MetricKind,
    selection: &FilterSelection,
    selected_period: &str,
) -> Vec<&'a MetricRecord> {
    records
        .iter()
        .filter(|record| {
            dimension_match(record, metric.dimensions(), selection)
                && time_period_match(
                    metric.has_time_period(),
                    record.time_period(),
                    selected_period,
                )
        })
        .collect()
}
