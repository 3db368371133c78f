//! Export-ready dataset shaping.
//!
//! Reshapes an aggregated series into labeled rows for the download
//! collaborator. No file writing or zipping happens here.

pub mod labels;

pub use labels::{title_case, LabelResolver};

use crate::core::AggregatedEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single export row. The field name is part of the download contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRow {
    #[serde(rename = "Count")]
    pub count: u64,
}

/// Labeled tabular dataset handed to the download/zip collaborator.
/// Rows and labels are parallel lists in series order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadableDataset {
    pub title: String,
    /// Column heading for the label column, from the per-accessor title
    /// lookup.
    pub column_label: String,
    pub rows: Vec<CountRow>,
    pub labels: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Reshape a series into a downloadable dataset, resolving labels through
/// the tenant's resolver.
pub fn downloadable_dataset(
    series: &[AggregatedEntry],
    accessor: &str,
    title: impl Into<String>,
    resolver: &LabelResolver,
) -> DownloadableDataset {
    let rows = series
        .iter()
        .map(|entry| CountRow { count: entry.count })
        .collect();
    let labels = series
        .iter()
        .map(|entry| resolver.label(accessor, &entry.value))
        .collect();
    DownloadableDataset {
        title: title.into(),
        column_label: resolver.title(accessor),
        rows,
        labels,
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn entry(value: &str, count: u64, proportion: &str) -> AggregatedEntry {
        AggregatedEntry {
            accessor: "gender".to_string(),
            value: value.to_string(),
            count,
            population_proportion: proportion.to_string(),
            dimensions: BTreeMap::new(),
        }
    }

    #[test]
    fn dataset_preserves_series_order() {
        let series = vec![entry("MALE", 70, "70"), entry("FEMALE", 30, "30")];
        let dataset = downloadable_dataset(
            &series,
            "gender",
            "Releases by gender",
            &LabelResolver::new(),
        );
        assert_eq!(dataset.rows.len(), 2);
        assert_eq!(dataset.rows[0].count, 70);
        assert_eq!(dataset.labels, vec!["Male", "Female"]);
        assert_eq!(dataset.column_label, "Gender");
        assert_eq!(dataset.title, "Releases by gender");
    }

    #[test]
    fn unmapped_labels_fall_back_to_raw_values() {
        let series = vec![entry("D7", 12, "40")];
        let dataset =
            downloadable_dataset(&series, "district", "By district", &LabelResolver::new());
        assert_eq!(dataset.labels, vec!["D7"]);
        assert_eq!(dataset.column_label, "District");
    }
}
