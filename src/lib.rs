// Export modules for library usage
pub mod aggregation;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod export;
pub mod filters;
pub mod io;
pub mod metric;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    AggregatedEntry, Error, FilterSelection, FilterValue, MetricRecord, Result, ALL, TIME_PERIOD,
};

pub use crate::aggregation::{aggregate, aggregated_series, population_proportion, total_count};

pub use crate::config::{load_config, TenantConfig};

pub use crate::export::{downloadable_dataset, DownloadableDataset, LabelResolver};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::metric::MetricKind;

pub use crate::store::{DashboardStore, FilterState, RecordStore};
