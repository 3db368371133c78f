use anyhow::Result;
use clap::Parser;
use popmetrics::cli::{Cli, Commands};
use popmetrics::commands;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Aggregate {
            records,
            metric,
            accessor,
            filters,
            time_period,
            format,
            output,
            config,
        } => commands::aggregate::run(commands::aggregate::AggregateConfig {
            records,
            metric,
            accessor,
            filters,
            time_period,
            format,
            output,
            config,
        }),
        Commands::Export {
            records,
            metric,
            accessor,
            filters,
            time_period,
            title,
            format,
            output,
            config,
        } => commands::export::run(commands::export::ExportConfig {
            records,
            metric,
            accessor,
            filters,
            time_period,
            title,
            format,
            output,
            config,
        }),
        Commands::ValidateConfig { config } => commands::validate_config(&config),
    }
}
