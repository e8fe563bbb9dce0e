use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

use benchtab::writer::OutputFormat;
use benchtab::{convert, ConvertOptions};

#[derive(Parser)]
#[command(
    version,
    about = "Converts dlinear benchmark JSON results into per-family CSV tables",
    long_about = "Reads a Google Benchmark JSON document, decodes each record's \
                  encoded name, merges the soplex and qsoptex runs of every \
                  problem instance and writes one table per problem family \
                  (LP, SMT, Sloane-Stufken)."
)]
struct Cli {
    /// Path to the benchmark results JSON file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Base output path; family tables get an lp_/smt_/ss_ prefix
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Output table format
    #[arg(long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Skip records with undecodable names instead of aborting
    #[arg(long)]
    lenient: bool,

    /// Decode legacy four-component names, recovering assertion counts
    /// from the .smt2 files in this directory
    #[arg(long, value_name = "SMT2_DIR")]
    legacy_names: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start_time = Instant::now();
    let opts = ConvertOptions {
        input: cli.input,
        output: cli.output,
        format: cli.format,
        lenient: cli.lenient,
        legacy_smt2_dir: cli.legacy_names,
    };

    convert(&opts).context("Conversion failed")?;

    info!("Conversion complete in {:?}", start_time.elapsed());
    Ok(())
}
