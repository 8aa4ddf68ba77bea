//! Command-line converter from a ledger CSV to a statement of cash flows.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cashflow_core::Pipeline;
use cashflow_core::classify::ClassificationRules;
use cashflow_core::ingest::ReportingPeriod;
use cashflow_shared::AppConfig;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Excel workbook
    Xlsx,
    /// Plain CSV table
    Csv,
    /// Statement as pretty-printed JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "cashflow-convert",
    version,
    about = "Convert a ledger CSV into a statement of cash flows"
)]
struct Cli {
    /// Input CSV (defaults to stdin)
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = Format::Xlsx)]
    format: Format,

    /// Classification rules JSON, overriding configuration
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Reporting period start for balance-sheet input
    #[arg(long)]
    period_start: Option<String>,

    /// Reporting period end for balance-sheet input
    #[arg(long)]
    period_end: Option<String>,
}

impl Cli {
    fn pipeline(&self, config: &AppConfig) -> Result<Pipeline> {
        let rules_path = self
            .rules
            .as_ref()
            .or(config.classification.rules_path.as_ref());
        let rules = match rules_path {
            Some(path) => ClassificationRules::from_file(path)
                .with_context(|| format!("Failed to load rules from {}", path.display()))?,
            None => ClassificationRules::default(),
        };

        let mut period = ReportingPeriod::from(&config.reporting);
        if let Some(start) = &self.period_start {
            period.start.clone_from(start);
        }
        if let Some(end) = &self.period_end {
            period.end.clone_from(end);
        }

        Ok(Pipeline::new(period, rules))
    }
}

fn convert(pipeline: &Pipeline, input: &[u8], format: Format) -> Result<Vec<u8>> {
    let output = match format {
        Format::Xlsx => pipeline.convert_to_xlsx(input)?,
        Format::Csv => pipeline.convert_to_csv(input)?,
        Format::Json => {
            let statement = pipeline.statement_from_csv(input)?;
            let mut json = serde_json::to_vec_pretty(&statement)?;
            json.push(b'\n');
            json
        }
    };
    Ok(output)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays clean for the rendered output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cashflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    let pipeline = cli.pipeline(&config)?;

    let mut input = Vec::new();
    match &cli.input {
        Some(path) => File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?
            .read_to_end(&mut input)?,
        None => io::stdin().read_to_end(&mut input)?,
    };

    let output = convert(&pipeline, &input, cli.format)?;

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    writer.write_all(&output)?;
    writer.flush()?;

    info!(format = ?cli.format, size = output.len(), "Statement written");
    Ok(())
}
