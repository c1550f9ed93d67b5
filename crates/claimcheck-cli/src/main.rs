mod audit;
mod display;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use claimcheck_rules::Rulebook;
use claimcheck_store::TableFormat;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "claimcheck")]
#[command(about = "Audit claim survey narratives and roll up pass rates by institution")]
#[command(version)]
struct Cli {
    /// Case table to audit (.csv or .parquet)
    input: PathBuf,

    /// Directory for the result tables [default: 判定结果_<input stem> beside the input]
    #[arg(short, long, env = "CLAIMCHECK_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Encoding of the result tables
    #[arg(short, long, env = "CLAIMCHECK_FORMAT", value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Print the institution summary as JSON instead of a table
    #[arg(long)]
    summary_json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Parquet,
}

impl From<OutputFormat> for TableFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => TableFormat::Csv,
            OutputFormat::Parquet => TableFormat::Parquet,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!("claimcheck v{}", env!("CARGO_PKG_VERSION"));

    let rulebook = Rulebook::standard().context("building rulebook")?;
    let output_dir = cli
        .output_dir
        .unwrap_or_else(|| audit::default_output_dir(&cli.input));

    let stats = audit::run_audit_pipeline(&rulebook, &cli.input, &output_dir, cli.format.into())?;

    if cli.summary_json {
        println!("{}", serde_json::to_string_pretty(&stats.summary)?);
    } else {
        display::print_stats(&stats);
        display::print_summary(&stats.summary)?;
    }
    Ok(())
}
