use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel dimension value meaning "unfiltered total along this dimension".
pub const ALL: &str = "ALL";

/// Dimension key under which a record's reporting window is stored.
pub const TIME_PERIOD: &str = "timePeriod";

/// One row of backend metric data: a count of people matching a specific
/// combination of dimension values for a specific reporting window.
///
/// The wire shape is a flat JSON object; every key except `count` is treated
/// as a dimension with a string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub count: u64,
    #[serde(flatten)]
    pub dimensions: BTreeMap<String, String>,
}

impl MetricRecord {
    pub fn new(count: u64) -> Self {
        Self {
            count,
            dimensions: BTreeMap::new(),
        }
    }

    /// Builder-style helper used heavily in tests and fixtures.
    pub fn with_dimension(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimensions.insert(name.into(), value.into());
        self
    }

    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions.get(name).map(String::as_str)
    }

    pub fn time_period(&self) -> Option<&str> {
        self.dimension(TIME_PERIOD)
    }
}

/// User selection for a single dimension: either the wildcard (show the
/// breakdown) or an explicit set of values.
///
/// On the wire this is either the string `"ALL"`, a single value string, or
/// an array of value strings, matching what the dashboard sends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterValue {
    Values(Vec<String>),
    All,
}

impl FilterValue {
    pub fn values(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::Values(values.into_iter().map(Into::into).collect())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl Serialize for FilterValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str(ALL),
            Self::Values(values) => values.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FilterValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(String),
            Many(Vec<String>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::One(value) if value == ALL => Self::All,
            Raw::One(value) => Self::Values(vec![value]),
            Raw::Many(values) if values.iter().all(|v| v == ALL) && !values.is_empty() => Self::All,
            Raw::Many(values) => Self::Values(values),
        })
    }
}

/// The current filter choices, one entry per dimension the user has touched.
/// Dimensions with no entry behave as the wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSelection {
    entries: BTreeMap<String, FilterValue>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, dimension: impl Into<String>, value: FilterValue) {
        self.entries.insert(dimension.into(), value);
    }

    pub fn with(mut self, dimension: impl Into<String>, value: FilterValue) -> Self {
        self.set(dimension, value);
        self
    }

    /// Missing entries are the wildcard: an untouched dimension shows its
    /// breakdown rather than filtering anything out.
    pub fn get(&self, dimension: &str) -> &FilterValue {
        self.entries.get(dimension).unwrap_or(&FilterValue::All)
    }

    pub fn is_set(&self, dimension: &str) -> bool {
        self.entries.contains_key(dimension)
    }

    /// Dimensions the user has touched, in sorted order.
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One row of a chart-ready series: a distinct accessor value with its summed
/// count and derived share of the baseline total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedEntry {
    /// Name of the grouping accessor this row belongs to.
    pub accessor: String,
    /// Value of the grouping accessor for this row.
    pub value: String,
    /// Summed count across all records in the group.
    pub count: u64,
    /// Integer-rounded percentage of the baseline total, as a plain string.
    /// The string format is load-bearing for downstream chart tooltips.
    pub population_proportion: String,
    /// Dimension values copied from the first record seen in the group.
    /// Display metadata only; not aggregated.
    pub dimensions: BTreeMap<String, String>,
}

/// Serializes flat like the records it came from: the accessor value under
/// the accessor's own name, alongside count, populationProportion, and the
/// representative dimensions.
impl Serialize for AggregatedEntry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.dimensions.len() + 3))?;
        map.serialize_entry(&self.accessor, &self.value)?;
        map.serialize_entry("count", &self.count)?;
        map.serialize_entry("populationProportion", &self.population_proportion)?;
        for (name, value) in &self.dimensions {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
