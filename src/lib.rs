//lib.rs
pub mod classify;
pub mod decode;
pub mod loader;
pub mod merge;
pub mod writer;

use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::classify::Family;
use crate::decode::{NameGrammar, Smt2AssertionCounter};
use crate::merge::Tables;
use crate::writer::OutputFormat;

/// Placeholder for a numeric slot no solver has filled in yet.
pub const SENTINEL_NUMERIC: f64 = -1.0;
/// Placeholder for a result slot no solver has filled in yet.
pub const SENTINEL_RESULT: &str = "/";

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Malformed benchmark document: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Could not decode benchmark name '{name}': {reason}")]
    Decode { name: String, reason: String },

    #[error("I/O failure on {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub(crate) fn decode(name: &str, reason: impl Into<String>) -> Self {
        ConvertError::Decode {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    /// Skip undecodable records instead of aborting the whole run.
    pub lenient: bool,
    /// When set, names use the legacy four-component grammar and assertion
    /// counts are recovered from the .smt2 files in this directory.
    pub legacy_smt2_dir: Option<PathBuf>,
}

impl ConvertOptions {
    pub fn new<P: Into<PathBuf>>(input: P, output: P) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            format: OutputFormat::Csv,
            lenient: false,
            legacy_smt2_dir: None,
        }
    }
}

/// Runs the full conversion: load the JSON results document, classify and
/// decode every record, merge the per-solver runs, write one table per
/// non-empty family.
pub fn convert(opts: &ConvertOptions) -> Result<(), ConvertError> {
    let records = loader::load_benchmarks(&opts.input)?;
    info!("Loaded {} benchmark records from {:?}", records.len(), opts.input);

    let grammar = match &opts.legacy_smt2_dir {
        Some(dir) => NameGrammar::Legacy(Smt2AssertionCounter::new(dir)),
        None => NameGrammar::Canonical,
    };

    let mut tables = Tables::default();
    for record in &records {
        let family = Family::classify(classify::filename_of(&record.name));
        match grammar.decode(record, family) {
            Ok(decoded) => tables.table_mut(family).merge(decoded),
            Err(e) if opts.lenient => warn!("Skipping record: {}", e),
            Err(e) => return Err(e),
        }
    }

    writer::write_tables(&tables, &opts.output, opts.format)
}
