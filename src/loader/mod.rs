//loader/mod.rs
use std::fs;
use std::path::Path;

use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;

use crate::ConvertError;

/// One entry of the Google Benchmark `benchmarks` array. Bookkeeping fields
/// the converter never looks at (`family_index`, `run_name`, `repetitions`,
/// `threads`, ...) are ignored on deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub name: String,
    pub real_time: f64,
    pub cpu_time: f64,
    pub time_unit: String,
    pub iterations: u64,
}

/// Reads the benchmark results document and extracts its `benchmarks` array.
/// A document without the key yields an empty vector; anything that is not a
/// JSON object is a format error.
pub fn load_benchmarks<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>, ConvertError> {
    let text = fs::read_to_string(path.as_ref())
        .map_err(|e| ConvertError::io(path.as_ref(), e))?;

    let document: Value = serde_json::from_str(&text)?;
    if !document.is_object() {
        return Err(serde_json::Error::custom("top-level value is not an object").into());
    }

    match document.get("benchmarks") {
        Some(benchmarks) => Ok(serde_json::from_value(benchmarks.clone())?),
        None => Ok(Vec::new()),
    }
}
