//! Loading record collections.
//!
//! Collections arrive as flat JSON arrays, one per metric per tenant, the
//! same shape the backend API serves.

use crate::core::{Error, MetricRecord, Result};
use std::fs;
use std::path::Path;

pub fn parse_records(json: &str) -> std::result::Result<Vec<MetricRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn load_records(path: &Path) -> Result<Vec<MetricRecord>> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(&contents).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
