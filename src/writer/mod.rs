//writer/mod.rs
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::{error, info};

use crate::classify::Family;
use crate::merge::{MergedRow, Tables};
use crate::ConvertError;

/// Supported table formats. Anything else is rejected by clap before the
/// input is even opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
}

const SHARED_COLUMNS: [&str; 5] = ["file", "assertions", "precision", "timeUnit", "iterations"];
const STUFKEN_COLUMNS: [&str; 5] = ["s1", "k1", "s2", "k2", "t"];
const SLOT_COLUMNS: [&str; 6] = [
    "actualPrecisionS",
    "timeS",
    "resultS",
    "actualPrecisionQ",
    "timeQ",
    "resultQ",
];

/// Writes every non-empty family table beside the base output path. Families
/// are independent: a failure on one is logged and the remaining tables are
/// still attempted, with the first error reported at the end.
pub fn write_tables(tables: &Tables, output: &Path, format: OutputFormat) -> Result<(), ConvertError> {
    let OutputFormat::Csv = format;

    let mut first_error = None;
    for family in Family::ALL {
        let table = tables.table(family);
        if table.is_empty() {
            continue;
        }
        let path = family_output_path(output, family);
        match write_csv(table.rows(), family, &path) {
            Ok(()) => info!("Wrote {} rows to {:?}", table.len(), path),
            Err(e) => {
                error!("Failed to write {:?} table: {}", family, e);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Derives a family's output path by prepending its short prefix to the base
/// file name, keeping the directory: `out.csv` becomes `lp_out.csv`.
pub fn family_output_path(output: &Path, family: Family) -> PathBuf {
    let base = output
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("benchmarks.csv");
    output.with_file_name(format!("{}_{}", family.output_prefix(), base))
}

fn write_csv(rows: &[MergedRow], family: Family, path: &Path) -> Result<(), ConvertError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;

    writer.write_record(columns(family)).map_err(|e| csv_error(path, e))?;
    for row in rows {
        writer.write_record(fields(row, family)).map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| ConvertError::io(path, e))?;
    Ok(())
}

fn columns(family: Family) -> Vec<&'static str> {
    let mut cols = vec![SHARED_COLUMNS[0]];
    if family == Family::SloaneStufken {
        cols.extend(STUFKEN_COLUMNS);
    }
    cols.extend(&SHARED_COLUMNS[1..]);
    cols.extend(SLOT_COLUMNS);
    cols
}

fn fields(row: &MergedRow, family: Family) -> Vec<String> {
    let mut out = vec![row.file.clone()];
    if family == Family::SloaneStufken {
        // Decoding guarantees params for this family.
        if let Some(p) = row.params {
            out.extend([p.s1, p.k1, p.s2, p.k2, p.t].map(|v| v.to_string()));
        }
    }
    out.extend([
        row.assertions.to_string(),
        row.precision.to_string(),
        row.time_unit.clone(),
        row.iterations.to_string(),
        row.soplex.actual_precision.to_string(),
        row.soplex.time.to_string(),
        row.soplex.result.clone(),
        row.qsoptex.actual_precision.to_string(),
        row.qsoptex.time.to_string(),
        row.qsoptex.result.clone(),
    ]);
    out
}

fn csv_error(path: &Path, e: csv::Error) -> ConvertError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => ConvertError::io(path, io),
        other => ConvertError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::Other, format!("{:?}", other)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::StufkenParams;
    use crate::merge::SolverSlot;

    #[test]
    fn family_prefix_lands_in_the_file_name() {
        let out = Path::new("results/out.csv");
        assert_eq!(family_output_path(out, Family::Lp), Path::new("results/lp_out.csv"));
        assert_eq!(family_output_path(out, Family::Smt), Path::new("results/smt_out.csv"));
        assert_eq!(
            family_output_path(out, Family::SloaneStufken),
            Path::new("results/ss_out.csv")
        );
    }

    #[test]
    fn stufken_columns_sit_between_file_and_assertions() {
        assert_eq!(
            columns(Family::SloaneStufken),
            [
                "file", "s1", "k1", "s2", "k2", "t", "assertions", "precision", "timeUnit",
                "iterations", "actualPrecisionS", "timeS", "resultS", "actualPrecisionQ",
                "timeQ", "resultQ"
            ]
        );
        assert_eq!(columns(Family::Lp).len(), 11);
    }

    #[test]
    fn sentinel_slots_render_as_minus_one_and_slash() {
        let row = MergedRow {
            file: "foo".to_string(),
            assertions: 5,
            precision: 0.1,
            time_unit: "ms".to_string(),
            iterations: 3,
            soplex: SolverSlot {
                actual_precision: 0.09,
                time: 1.111,
                result: "opt".to_string(),
            },
            qsoptex: SolverSlot::default(),
            params: None,
        };
        assert_eq!(
            fields(&row, Family::Lp),
            ["foo", "5", "0.1", "ms", "3", "0.09", "1.111", "opt", "-1", "-1", "/"]
        );
    }

    #[test]
    fn stufken_fields_carry_the_decoded_integers() {
        let row = MergedRow {
            file: "5-3-5-3-2".to_string(),
            assertions: 1,
            precision: 0.1,
            time_unit: "ms".to_string(),
            iterations: 1,
            soplex: SolverSlot::default(),
            qsoptex: SolverSlot::default(),
            params: Some(StufkenParams { s1: 5, k1: 3, s2: 5, k2: 3, t: 2 }),
        };
        let fields = fields(&row, Family::SloaneStufken);
        assert_eq!(&fields[1..6], ["5", "3", "5", "3", "2"]);
    }
}
