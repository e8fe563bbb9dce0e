//decode/mod.rs
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::debug;

use crate::classify::{filename_of, Family, SMT2_SUFFIX};
use crate::loader::RawRecord;
use crate::{ConvertError, SENTINEL_NUMERIC};

/// The five integers encoded in a Sloane-Stufken filename stem
/// (`s1-k1-s2-k2-t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StufkenParams {
    pub s1: u64,
    pub k1: u64,
    pub s2: u64,
    pub k2: u64,
    pub t: u64,
}

/// A benchmark record with its name field fully decoded.
#[derive(Debug, Clone)]
pub struct DecodedRecord {
    pub family: Family,
    pub file: String,
    pub solver: String,
    pub precision: f64,
    pub actual_precision: f64,
    pub assertions: u64,
    pub result: String,
    pub real_time: f64,
    pub cpu_time: f64,
    pub time_unit: String,
    pub iterations: u64,
    /// Present only for Sloane-Stufken records.
    pub params: Option<StufkenParams>,
}

/// Which revision of the name encoding to parse. The canonical grammar embeds
/// the assertion count and actual precision in the name; the legacy one has
/// only four components and recovers the assertion count from the problem
/// file itself.
pub enum NameGrammar {
    Canonical,
    Legacy(Smt2AssertionCounter),
}

impl NameGrammar {
    pub fn decode(&self, record: &RawRecord, family: Family) -> Result<DecodedRecord, ConvertError> {
        match self {
            NameGrammar::Canonical => decode_canonical(record, family),
            NameGrammar::Legacy(counter) => decode_legacy(record, family, counter),
        }
    }
}

/// Opaque collaborator of the legacy grammar: maps a problem file name to its
/// assertion count.
pub trait AssertionCounter {
    fn assertions(&self, file_name: &str) -> Result<u64, ConvertError>;
}

/// Counts `(assert ...)` forms in an .smt2 file under a fixed directory.
pub struct Smt2AssertionCounter {
    smt2_dir: PathBuf,
}

impl Smt2AssertionCounter {
    pub fn new<P: AsRef<Path>>(smt2_dir: P) -> Self {
        Self {
            smt2_dir: smt2_dir.as_ref().to_path_buf(),
        }
    }
}

impl AssertionCounter for Smt2AssertionCounter {
    fn assertions(&self, file_name: &str) -> Result<u64, ConvertError> {
        let path = self.smt2_dir.join(file_name);
        let file = File::open(&path).map_err(|e| ConvertError::io(&path, e))?;
        let mut count = 0;
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| ConvertError::io(&path, e))?;
            if line.trim_start().starts_with("(assert") {
                count += 1;
            }
        }
        debug!("Counted {} assertions in {:?}", count, path);
        Ok(count)
    }
}

fn decode_canonical(record: &RawRecord, family: Family) -> Result<DecodedRecord, ConvertError> {
    let name = record.name.as_str();
    let (path, solver, precision, actual_precision, assertions, result) = name
        .split(',')
        .collect_tuple()
        .ok_or_else(|| ConvertError::decode(name, "expected 6 comma-separated components"))?;

    let file = clean_file(path, family);
    build_record(
        record,
        family,
        file,
        solver,
        parse_f64(name, "precision", precision)?,
        parse_f64(name, "actualPrecision", actual_precision)?,
        parse_u64(name, "assertions", assertions)?,
        result,
    )
}

fn decode_legacy(
    record: &RawRecord,
    family: Family,
    counter: &impl AssertionCounter,
) -> Result<DecodedRecord, ConvertError> {
    let name = record.name.as_str();
    let (path, solver, precision, result) = name
        .split(',')
        .collect_tuple()
        .ok_or_else(|| ConvertError::decode(name, "expected 4 comma-separated components"))?;

    let assertions = counter.assertions(filename_of(path))?;
    let file = clean_file(path, family);
    build_record(
        record,
        family,
        file,
        solver,
        parse_f64(name, "precision", precision)?,
        SENTINEL_NUMERIC,
        assertions,
        result,
    )
}

fn build_record(
    record: &RawRecord,
    family: Family,
    file: String,
    solver: &str,
    precision: f64,
    actual_precision: f64,
    assertions: u64,
    result: &str,
) -> Result<DecodedRecord, ConvertError> {
    let params = match family {
        Family::SloaneStufken => Some(parse_stufken_stem(&record.name, &file)?),
        _ => None,
    };

    Ok(DecodedRecord {
        family,
        file,
        solver: solver.to_string(),
        precision,
        actual_precision,
        assertions,
        result: result.to_string(),
        real_time: round3(record.real_time),
        cpu_time: round3(record.cpu_time),
        time_unit: record.time_unit.clone(),
        iterations: record.iterations,
        params,
    })
}

/// Strips the path, the family prefix and the .smt2 suffix from the file
/// component of a name.
fn clean_file(path: &str, family: Family) -> String {
    let mut file = path.rsplit('/').next().unwrap_or(path);
    if let Some(prefix) = family.file_prefix() {
        file = file.strip_prefix(prefix).unwrap_or(file);
    }
    file.trim_end_matches(SMT2_SUFFIX).to_string()
}

/// Splits a cleaned Sloane-Stufken stem into exactly five integers.
fn parse_stufken_stem(name: &str, stem: &str) -> Result<StufkenParams, ConvertError> {
    let (s1, k1, s2, k2, t) = stem
        .split('-')
        .map(|tok| tok.parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ConvertError::decode(name, "non-integer token in Sloane-Stufken stem"))?
        .into_iter()
        .collect_tuple()
        .ok_or_else(|| {
            ConvertError::decode(name, "Sloane-Stufken stem must split into exactly 5 integers")
        })?;

    Ok(StufkenParams { s1, k1, s2, k2, t })
}

fn parse_f64(name: &str, field: &str, token: &str) -> Result<f64, ConvertError> {
    token
        .parse()
        .map_err(|_| ConvertError::decode(name, format!("{} is not a number: '{}'", field, token)))
}

fn parse_u64(name: &str, field: &str, token: &str) -> Result<u64, ConvertError> {
    token
        .parse()
        .map_err(|_| ConvertError::decode(name, format!("{} is not an integer: '{}'", field, token)))
}

/// Rounds a timing value to 3 decimal places for output.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
