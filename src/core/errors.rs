//! Shared error types for the pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for popmetrics operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No record matched the all-"ALL" baseline used for total-count
    /// computation. This is a data-integrity problem upstream, never a
    /// normal empty-result case, so it is surfaced rather than defaulted.
    #[error("missing total row for metric {metric}: no record has \"ALL\" in every breakdown dimension for time period {time_period}")]
    MissingTotalRow { metric: String, time_period: String },

    /// Tenant configuration failed schema validation.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Accessor is not a dimension of the requested metric.
    #[error("unknown accessor {accessor} for metric {metric}")]
    UnknownAccessor { metric: String, accessor: String },

    /// Metric name did not match any known metric kind.
    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    /// Record collection could not be read.
    #[error("failed to read records from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record collection could not be parsed.
    #[error("failed to parse records from {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
