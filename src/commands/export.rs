use super::aggregate::{
    load_tenant, parse_filters, resolve_time_period, validate_filter_dimensions,
};
use crate::aggregation;
use crate::export::{downloadable_dataset, LabelResolver};
use crate::io::output::{create_writer, OutputFormat};
use crate::io::records::load_records;
use crate::metric::MetricKind;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct ExportConfig {
    pub records: PathBuf,
    pub metric: MetricKind,
    pub accessor: String,
    pub filters: Vec<String>,
    pub time_period: Option<String>,
    pub title: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn run(cfg: ExportConfig) -> Result<()> {
    let tenant = load_tenant(cfg.config.as_ref(), cfg.metric, &cfg.accessor)?;
    let records = load_records(&cfg.records)?;
    let selection = parse_filters(&cfg.filters)?;
    validate_filter_dimensions(cfg.metric, &selection)?;

    let period = resolve_time_period(cfg.time_period, tenant.as_ref());

    let series = aggregation::aggregated_series(
        &records,
        cfg.metric,
        &selection,
        &period,
        &cfg.accessor,
    )
    .with_context(|| format!("aggregating {} by {}", cfg.metric, cfg.accessor))?;

    let resolver = tenant
        .as_ref()
        .map(|t| t.label_resolver())
        .unwrap_or_else(LabelResolver::new);
    let title = cfg
        .title
        .unwrap_or_else(|| format!("{} by {}", cfg.metric, resolver.title(&cfg.accessor)));
    let dataset = downloadable_dataset(&series, &cfg.accessor, title, &resolver);

    let mut writer = create_writer(cfg.format, cfg.output)?;
    writer.write_dataset(&dataset)
}
