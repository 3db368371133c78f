//! Per-tenant declarative configuration.
//!
//! Each tenant (state) ships a TOML file selecting which metric sections
//! are enabled, which dimensions each section exposes, and label/title
//! overrides. Loaded once at startup and validated against the enumerated
//! metric/dimension schema; validation collects every problem before
//! failing.

use crate::core::{Error, Result, ALL};
use crate::export::LabelResolver;
use crate::metric::MetricKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One enabled dashboard section: a metric plus the dimensions the tenant
/// exposes for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionConfig {
    pub metric: MetricKind,

    /// Dimensions shown for this section. Empty means all of the metric's
    /// dimensions.
    #[serde(default)]
    pub enabled_dimensions: Vec<String>,
}

impl SectionConfig {
    /// The dimensions this section actually exposes.
    pub fn dimensions(&self) -> Vec<&str> {
        if self.enabled_dimensions.is_empty() {
            self.metric.dimensions().to_vec()
        } else {
            self.enabled_dimensions.iter().map(String::as_str).collect()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantConfig {
    /// Display name, e.g. "Demo State".
    pub name: String,

    /// Tenant code, e.g. "US_DM".
    pub code: String,

    #[serde(default)]
    pub sections: Vec<SectionConfig>,

    /// Reporting window selected before the user touches anything.
    #[serde(default = "default_time_period")]
    pub default_time_period: String,

    /// Label overrides: accessor -> raw value -> display label.
    #[serde(default)]
    pub labels: HashMap<String, HashMap<String, String>>,

    /// Export title overrides: accessor -> column title.
    #[serde(default)]
    pub titles: HashMap<String, String>,
}

fn default_time_period() -> String {
    ALL.to_string()
}

impl TenantConfig {
    /// Check every section against the enumerated schema, collecting all
    /// problems instead of failing at the first one.
    pub fn validate(&self) -> Result<()> {
        let mut problems: Vec<String> = Vec::new();

        if self.code.is_empty() {
            problems.push("tenant code must not be empty".to_string());
        }
        if self.sections.is_empty() {
            problems.push("at least one section must be enabled".to_string());
        }
        for section in &self.sections {
            for dimension in &section.enabled_dimensions {
                if !section.metric.has_dimension(dimension) {
                    problems.push(format!(
                        "section {}: unknown dimension {}",
                        section.metric, dimension
                    ));
                }
            }
        }
        for accessor in self.labels.keys().chain(self.titles.keys()) {
            let known = MetricKind::ALL_KINDS
                .iter()
                .any(|kind| kind.has_dimension(accessor));
            if !known {
                problems.push(format!("label override for unknown dimension {accessor}"));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::Configuration(problems.join("; ")))
        }
    }

    pub fn section(&self, metric: MetricKind) -> Option<&SectionConfig> {
        self.sections.iter().find(|s| s.metric == metric)
    }

    /// Build a label resolver with this tenant's overrides applied.
    pub fn label_resolver(&self) -> LabelResolver {
        let mut resolver = LabelResolver::new();
        for (accessor, values) in &self.labels {
            for (raw, label) in values {
                resolver.override_label(accessor.clone(), raw.clone(), label.clone());
            }
        }
        for (accessor, title) in &self.titles {
            resolver.override_title(accessor.clone(), title.clone());
        }
        resolver
    }
}

/// Parse and validate a tenant config from TOML text.
pub fn parse_config(contents: &str) -> Result<TenantConfig> {
    let config: TenantConfig = toml::from_str(contents)
        .map_err(|e| Error::Configuration(format!("failed to parse tenant config: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Load a tenant config file once at startup.
pub fn load_config(path: &Path) -> Result<TenantConfig> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&contents)?;
    log::debug!("loaded tenant config {} from {}", config.code, path.display());
    Ok(config)
}
