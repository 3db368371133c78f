//! Metric kinds and the dimensions each one carries.
//!
//! Each kind supplies its own dimension list, accessor set, and whether it
//! has a reporting-window dimension. Dispatch is by plain matching on the
//! enum; there is no shared base type.

use crate::core::{Error, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    /// Point-in-time incarcerated population, broken down by demographics,
    /// facility, and legal status. No reporting-window dimension.
    PopulationSnapshot,
    /// Admissions to incarceration over a reporting window.
    Admissions,
    /// People under community supervision over a reporting window.
    Supervision,
    /// Releases from incarceration over a reporting window.
    Releases,
}

impl MetricKind {
    pub const ALL_KINDS: [MetricKind; 4] = [
        MetricKind::PopulationSnapshot,
        MetricKind::Admissions,
        MetricKind::Supervision,
        MetricKind::Releases,
    ];

    /// Breakdown dimensions for this metric, excluding the time period.
    pub fn dimensions(&self) -> &'static [&'static str] {
        match self {
            Self::PopulationSnapshot => &["gender", "ageGroup", "facility", "legalStatus"],
            Self::Admissions => &["gender", "ageGroup", "admissionReason"],
            Self::Supervision => &["gender", "ageGroup", "supervisionLevel", "district"],
            Self::Releases => &["gender", "ageGroup", "district"],
        }
    }

    /// Whether records of this metric carry a `timePeriod` dimension.
    /// Snapshots are point-in-time and have none.
    pub fn has_time_period(&self) -> bool {
        !matches!(self, Self::PopulationSnapshot)
    }

    /// Any breakdown dimension can serve as the grouping accessor.
    pub fn accessors(&self) -> &'static [&'static str] {
        self.dimensions()
    }

    pub fn validate_accessor(&self, accessor: &str) -> Result<()> {
        if self.accessors().contains(&accessor) {
            Ok(())
        } else {
            Err(Error::UnknownAccessor {
                metric: self.to_string(),
                accessor: accessor.to_string(),
            })
        }
    }

    pub fn has_dimension(&self, dimension: &str) -> bool {
        self.dimensions().contains(&dimension)
    }

    fn name(&self) -> &'static str {
        match self {
            Self::PopulationSnapshot => "population-snapshot",
            Self::Admissions => "admissions",
            Self::Supervision => "supervision",
            Self::Releases => "releases",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL_KINDS
            .iter()
            .find(|kind| kind.name() == s)
            .copied()
            .ok_or_else(|| Error::UnknownMetric(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_has_no_time_period() {
        assert!(!MetricKind::PopulationSnapshot.has_time_period());
        assert!(MetricKind::Admissions.has_time_period());
    }

    #[test]
    fn accessor_validation() {
        assert!(MetricKind::Supervision
            .validate_accessor("supervisionLevel")
            .is_ok());
        let err = MetricKind::Releases
            .validate_accessor("facility")
            .unwrap_err();
        assert!(matches!(err, Error::UnknownAccessor { .. }));
    }

    #[test]
    fn parse_round_trips_every_kind() {
        for kind in MetricKind::ALL_KINDS {
            assert_eq!(kind.to_string().parse::<MetricKind>().unwrap(), kind);
        }
        assert!("prison-weather".parse::<MetricKind>().is_err());
    }
}
