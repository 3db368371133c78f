use crate::config::{self, TenantConfig};
use crate::core::{FilterSelection, FilterValue, ALL, TIME_PERIOD};
use crate::io::output::{create_writer, OutputFormat};
use crate::io::records::load_records;
use crate::metric::MetricKind;
use crate::store::DashboardStore;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

pub struct AggregateConfig {
    pub records: PathBuf,
    pub metric: MetricKind,
    pub accessor: String,
    pub filters: Vec<String>,
    pub time_period: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Parse `dimension=value[,value...]` filter arguments. The value `ALL`
/// selects the wildcard breakdown for that dimension.
pub fn parse_filters(args: &[String]) -> Result<FilterSelection> {
    let mut selection = FilterSelection::new();
    for arg in args {
        let Some((dimension, values)) = arg.split_once('=') else {
            bail!("invalid filter {arg:?}: expected dimension=value[,value...]");
        };
        if dimension.is_empty() || values.is_empty() {
            bail!("invalid filter {arg:?}: empty dimension or value");
        }
        let value = if values == ALL {
            FilterValue::All
        } else {
            FilterValue::values(values.split(','))
        };
        selection.set(dimension, value);
    }
    Ok(selection)
}

/// Reject filters naming dimensions the metric does not have. A typo would
/// otherwise be dropped on the floor and return the unfiltered breakdown.
pub fn validate_filter_dimensions(metric: MetricKind, selection: &FilterSelection) -> Result<()> {
    for dimension in selection.dimensions() {
        if dimension == TIME_PERIOD {
            bail!("{TIME_PERIOD} is not a breakdown dimension; use --time-period instead");
        }
        if !metric.has_dimension(dimension) {
            bail!(
                "unknown dimension {} for metric {}; expected one of: {}",
                dimension,
                metric,
                metric.dimensions().join(", ")
            );
        }
    }
    Ok(())
}

/// The reporting window for this run. An explicitly passed window always
/// wins, even when it is ALL; only an absent flag falls back to the
/// tenant's configured default.
pub fn resolve_time_period(requested: Option<String>, tenant: Option<&TenantConfig>) -> String {
    match requested {
        Some(period) => period,
        None => tenant
            .map(|t| t.default_time_period.clone())
            .unwrap_or_else(|| ALL.to_string()),
    }
}

/// Load the tenant config if one was given and check the requested view
/// against it.
pub fn load_tenant(
    path: Option<&PathBuf>,
    metric: MetricKind,
    accessor: &str,
) -> Result<Option<TenantConfig>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let tenant = config::load_config(path)?;
    if let Some(section) = tenant.section(metric) {
        if !section.dimensions().contains(&accessor) {
            bail!(
                "accessor {} is not enabled for metric {} in tenant {}",
                accessor,
                metric,
                tenant.code
            );
        }
    } else {
        log::warn!("tenant {} has no section for metric {}", tenant.code, metric);
    }
    Ok(Some(tenant))
}

pub fn run(cfg: AggregateConfig) -> Result<()> {
    let tenant = load_tenant(cfg.config.as_ref(), cfg.metric, &cfg.accessor)?;
    let records = load_records(&cfg.records)?;

    let selection = parse_filters(&cfg.filters)?;
    validate_filter_dimensions(cfg.metric, &selection)?;

    let mut store = DashboardStore::new(cfg.metric, records);
    for dimension in selection.dimensions() {
        store.set_filter(dimension, selection.get(dimension).clone());
    }
    store.set_time_period(resolve_time_period(cfg.time_period, tenant.as_ref()));

    let series = store
        .series(&cfg.accessor)
        .with_context(|| format!("aggregating {} by {}", cfg.metric, cfg.accessor))?;

    let mut writer = create_writer(cfg.format, cfg.output)?;
    writer.write_series(&series)
}
