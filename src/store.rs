//! Record store, filter state, and memoized derived views.
//!
//! The pipeline is pure and synchronous; this module adds the reactive
//! shell around it. Derived series are recomputed on read and memoized on
//! (store version, selection, time period, accessor), so repeated reads
//! under unchanged state are cache hits.

use crate::aggregation;
use crate::core::{AggregatedEntry, FilterSelection, MetricRecord, Result, ALL};
use crate::metric::MetricKind;
use im::HashMap;

/// The full unfiltered record collection for one metric, immutable per
/// fetch. Replaced wholesale on refetch or tenant switch; the version
/// counter distinguishes fetches for memoization.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<MetricRecord>,
    version: u64,
}

impl RecordStore {
    pub fn new(records: Vec<MetricRecord>) -> Self {
        Self {
            records,
            version: 0,
        }
    }

    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn replace(&mut self, records: Vec<MetricRecord>) {
        self.records = records;
        self.version += 1;
    }
}

/// Current user filter choices. Persists across reads; reset on
/// navigation or tenant change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterState {
    pub selection: FilterSelection,
    pub time_period: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selection: FilterSelection::new(),
            time_period: ALL.to_string(),
        }
    }
}

impl FilterState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SeriesKey {
    version: u64,
    selection: FilterSelection,
    time_period: String,
    accessor: String,
}

/// One metric's records plus filter state, with pull-based memoization of
/// the aggregated series.
#[derive(Debug, Clone)]
pub struct DashboardStore {
    metric: MetricKind,
    store: RecordStore,
    filters: FilterState,
    series_cache: HashMap<SeriesKey, Vec<AggregatedEntry>>,
    hits: usize,
    misses: usize,
}

impl DashboardStore {
    pub fn new(metric: MetricKind, records: Vec<MetricRecord>) -> Self {
        Self {
            metric,
            store: RecordStore::new(records),
            filters: FilterState::default(),
            series_cache: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn metric(&self) -> MetricKind {
        self.metric
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn set_filter(&mut self, dimension: impl Into<String>, value: crate::core::FilterValue) {
        self.filters.selection.set(dimension, value);
    }

    pub fn set_time_period(&mut self, period: impl Into<String>) {
        self.filters.time_period = period.into();
    }

    /// New fetch: swap the collection and drop every derived view.
    pub fn replace_records(&mut self, records: Vec<MetricRecord>) {
        self.store.replace(records);
        self.series_cache = HashMap::new();
    }

    /// Tenant switch: records, filters, and derived views all go.
    pub fn reset(&mut self, records: Vec<MetricRecord>) {
        self.replace_records(records);
        self.filters.reset();
    }

    /// The aggregated series for the current state, grouped by `accessor`.
    /// Recomputed on read, memoized until records or filters change.
    pub fn series(&mut self, accessor: &str) -> Result<Vec<AggregatedEntry>> {
        self.metric.validate_accessor(accessor)?;
        let key = SeriesKey {
            version: self.store.version(),
            selection: self.filters.selection.clone(),
            time_period: self.filters.time_period.clone(),
            accessor: accessor.to_string(),
        };
        if let Some(series) = self.series_cache.get(&key) {
            self.hits += 1;
            return Ok(series.clone());
        }

        let series = aggregation::aggregated_series(
            self.store.records(),
            self.metric,
            &self.filters.selection,
            &self.filters.time_period,
            accessor,
        )?;
        self.misses += 1;
        self.series_cache.insert(key, series.clone());
        Ok(series)
    }

    /// (hits, misses) over the lifetime of this store, for diagnostics.
    pub fn cache_stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }
}
