use crate::core::AggregatedEntry;
use crate::export::DownloadableDataset;
use colored::*;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
    Terminal,
}

pub trait OutputWriter {
    fn write_series(&mut self, series: &[AggregatedEntry]) -> anyhow::Result<()>;
    fn write_dataset(&mut self, dataset: &DownloadableDataset) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_series(&mut self, series: &[AggregatedEntry]) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(series)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }

    fn write_dataset(&mut self, dataset: &DownloadableDataset) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(dataset)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

pub struct CsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn escape(field: &str) -> String {
        if field.contains([',', '"', '\n']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

impl<W: Write> OutputWriter for CsvWriter<W> {
    fn write_series(&mut self, series: &[AggregatedEntry]) -> anyhow::Result<()> {
        let header = series
            .first()
            .map(|entry| entry.accessor.as_str())
            .unwrap_or("value");
        writeln!(self.writer, "{header},count,populationProportion")?;
        for entry in series {
            writeln!(
                self.writer,
                "{},{},{}",
                Self::escape(&entry.value),
                entry.count,
                entry.population_proportion
            )?;
        }
        Ok(())
    }

    fn write_dataset(&mut self, dataset: &DownloadableDataset) -> anyhow::Result<()> {
        writeln!(self.writer, "{},Count", Self::escape(&dataset.column_label))?;
        for (label, row) in dataset.labels.iter().zip(&dataset.rows) {
            writeln!(self.writer, "{},{}", Self::escape(label), row.count)?;
        }
        Ok(())
    }
}

pub struct TerminalWriter;

impl TerminalWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for TerminalWriter {
    fn write_series(&mut self, series: &[AggregatedEntry]) -> anyhow::Result<()> {
        if series.is_empty() {
            println!("{}", "No records match the current filters.".yellow());
            return Ok(());
        }
        println!(
            "{:<24} {:>10} {:>8}",
            "Value".bold(),
            "Count".bold(),
            "%".bold()
        );
        for entry in series {
            println!(
                "{:<24} {:>10} {:>8}",
                entry.value, entry.count, entry.population_proportion
            );
        }
        Ok(())
    }

    fn write_dataset(&mut self, dataset: &DownloadableDataset) -> anyhow::Result<()> {
        println!("{}", dataset.title.bold());
        println!("{:<24} {:>10}", dataset.column_label.bold(), "Count".bold());
        for (label, row) in dataset.labels.iter().zip(&dataset.rows) {
            println!("{:<24} {:>10}", label, row.count);
        }
        Ok(())
    }
}

/// Writer for the chosen format, to a file when `output` is given and
/// stdout otherwise.
pub fn create_writer(
    format: OutputFormat,
    output: Option<PathBuf>,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    let writer: Box<dyn OutputWriter> = match (format, output) {
        (OutputFormat::Json, Some(path)) => Box::new(JsonWriter::new(File::create(path)?)),
        (OutputFormat::Json, None) => Box::new(JsonWriter::new(std::io::stdout())),
        (OutputFormat::Csv, Some(path)) => Box::new(CsvWriter::new(File::create(path)?)),
        (OutputFormat::Csv, None) => Box::new(CsvWriter::new(std::io::stdout())),
        (OutputFormat::Terminal, _) => Box::new(TerminalWriter::new()),
    };
    Ok(writer)
}
