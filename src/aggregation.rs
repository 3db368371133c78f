//! Grouping and summing of filtered record subsets.
//!
//! The aggregator turns a filtered subset into one entry per distinct
//! accessor value, with counts summed per group and proportions derived
//! against the "ALL" baseline total rather than the sum of displayed groups.

use crate::core::{AggregatedEntry, Error, FilterSelection, FilterValue, MetricRecord, Result, ALL};
use crate::filters;
use crate::metric::MetricKind;
use std::collections::HashMap;

/// Sum the baseline total: records where every breakdown dimension is the
/// "ALL" summary value and the time period matches the selection.
///
/// The result set is typically a single row. An empty result set means the
/// backend data is malformed and is surfaced as a hard error, never
/// silently treated as zero.
pub fn total_count(
    records: &[MetricRecord],
    metric: MetricKind,
    selected_period: &str,
) -> Result<u64> {
    let baseline: Vec<&MetricRecord> = records
        .iter()
        .filter(|record| {
            metric
                .dimensions()
                .iter()
                .all(|dimension| record.dimension(dimension) == Some(ALL))
                && filters::time_period_match(
                    metric.has_time_period(),
                    record.time_period(),
                    selected_period,
                )
        })
        .collect();

    if baseline.is_empty() {
        return Err(Error::MissingTotalRow {
            metric: metric.to_string(),
            time_period: selected_period.to_string(),
        });
    }
    Ok(baseline.iter().map(|record| record.count).sum())
}

/// Integer-rounded percentage, formatted as a plain string with no decimal
/// places. The exact format is preserved from the dashboard contract.
pub fn population_proportion(count: u64, total: u64) -> String {
    if total == 0 {
        return "0".to_string();
    }
    let pct = (count as f64 * 100.0 / total as f64).round() as i64;
    pct.to_string()
}

/// Group a filtered subset by the accessor value and sum counts per group.
///
/// Entries come out in first-encounter order; callers must not read meaning
/// into it beyond display. Each entry carries the non-accessor dimensions of
/// the first record seen in its group as display metadata.
pub fn aggregate(filtered: &[&MetricRecord], accessor: &str) -> Vec<AggregatedEntry> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<AggregatedEntry> = Vec::new();

    for record in filtered {
        let Some(value) = record.dimension(accessor) else {
            continue;
        };
        match index.get(value) {
            Some(&position) => entries[position].count += record.count,
            None => {
                let mut dimensions = record.dimensions.clone();
                dimensions.remove(accessor);
                index.insert(value.to_string(), entries.len());
                entries.push(AggregatedEntry {
                    accessor: accessor.to_string(),
                    value: value.to_string(),
                    count: record.count,
                    population_proportion: String::new(),
                    dimensions,
                });
            }
        }
    }
    entries
}

/// Resolve what each metric dimension means for this view.
///
/// A view breaks down along its accessor and totals along everything else:
/// untouched non-accessor dimensions are pinned to their literal "ALL"
/// summary rows, while an untouched accessor gets the wildcard breakdown.
/// Dimensions the user set explicitly are passed through unchanged.
pub fn effective_selection(
    metric: MetricKind,
    selection: &FilterSelection,
    accessor: &str,
) -> FilterSelection {
    let mut effective = selection.clone();
    for dimension in metric.dimensions() {
        if !selection.is_set(dimension) {
            let default = if *dimension == accessor {
                FilterValue::All
            } else {
                FilterValue::values([ALL])
            };
            effective.set(*dimension, default);
        }
    }
    effective
}

/// Full pipeline for one view: filter, compute the baseline total, group,
/// and derive proportions.
///
/// An empty filtered subset yields an empty series; only a missing baseline
/// row is an error.
pub fn aggregated_series(
    records: &[MetricRecord],
    metric: MetricKind,
    selection: &FilterSelection,
    selected_period: &str,
    accessor: &str,
) -> Result<Vec<AggregatedEntry>> {
    metric.validate_accessor(accessor)?;
    let total = total_count(records, metric, selected_period)?;
    let selection = effective_selection(metric, selection, accessor);
    let filtered = filters::filtered_subset(records, metric, &selection, selected_period);
    log::debug!(
        "aggregating {} of {} records by {} (total {})",
        filtered.len(),
        records.len(),
        accessor,
        total
    );

    let mut series = aggregate(&filtered, accessor);
    for entry in &mut series {
        entry.population_proportion = population_proportion(entry.count, total);
    }
    Ok(series)
}
