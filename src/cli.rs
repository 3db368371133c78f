use crate::io::output::OutputFormat;
use crate::metric::MetricKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "popmetrics")]
#[command(about = "Filter, aggregate, and export justice population metrics", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate a record collection into a chart-ready series
    Aggregate {
        /// JSON file holding the record collection
        records: PathBuf,

        /// Metric the records belong to
        #[arg(short, long, value_enum)]
        metric: MetricKind,

        /// Dimension to group by
        #[arg(short, long)]
        accessor: String,

        /// Filters as dimension=value[,value...]; ALL selects the breakdown
        #[arg(short, long = "filter")]
        filters: Vec<String>,

        /// Reporting window to select; ALL for all-time totals. Defaults to
        /// the tenant's configured window, or ALL without one
        #[arg(short, long)]
        time_period: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tenant configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Produce a labeled downloadable dataset from a record collection
    Export {
        /// JSON file holding the record collection
        records: PathBuf,

        /// Metric the records belong to
        #[arg(short, long, value_enum)]
        metric: MetricKind,

        /// Dimension to group by
        #[arg(short, long)]
        accessor: String,

        /// Filters as dimension=value[,value...]; ALL selects the breakdown
        #[arg(short, long = "filter")]
        filters: Vec<String>,

        /// Reporting window to select; ALL for all-time totals. Defaults to
        /// the tenant's configured window, or ALL without one
        #[arg(short, long)]
        time_period: Option<String>,

        /// Export title (defaults to "<metric> by <accessor title>")
        #[arg(long)]
        title: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "csv")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tenant configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a tenant configuration file
    ValidateConfig {
        /// Tenant configuration file
        config: PathBuf,
    },
}
