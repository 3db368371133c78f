pub mod errors;
pub mod types;

pub use errors::{Error, Result};
pub use types::{
    AggregatedEntry, FilterSelection, FilterValue, MetricRecord, ALL, TIME_PERIOD,
};
