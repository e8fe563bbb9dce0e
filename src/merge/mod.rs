//merge/mod.rs
use std::collections::HashMap;

use log::warn;

use crate::classify::Family;
use crate::decode::{DecodedRecord, StufkenParams};
use crate::{SENTINEL_NUMERIC, SENTINEL_RESULT};

pub const SOLVER_SOPLEX: &str = "soplex";
pub const SOLVER_QSOPTEX: &str = "qsoptex";

/// Per-solver portion of a merged row. Starts out as sentinels until the
/// solver's run is seen.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverSlot {
    pub actual_precision: f64,
    pub time: f64,
    pub result: String,
}

impl Default for SolverSlot {
    fn default() -> Self {
        Self {
            actual_precision: SENTINEL_NUMERIC,
            time: SENTINEL_NUMERIC,
            result: SENTINEL_RESULT.to_string(),
        }
    }
}

/// One problem instance with the results of both solvers side by side.
#[derive(Debug, Clone)]
pub struct MergedRow {
    pub file: String,
    pub assertions: u64,
    pub precision: f64,
    pub time_unit: String,
    pub iterations: u64,
    pub soplex: SolverSlot,
    pub qsoptex: SolverSlot,
    /// Present only in the Sloane-Stufken table.
    pub params: Option<StufkenParams>,
}

/// Identifies one problem instance across solver runs. Precision is keyed by
/// its bit pattern so the key stays hashable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct InstanceKey {
    file: String,
    precision_bits: u64,
}

impl InstanceKey {
    fn of(record: &DecodedRecord) -> Self {
        Self {
            file: record.file.clone(),
            precision_bits: record.precision.to_bits(),
        }
    }
}

/// Rows of one family, in first-insertion order.
#[derive(Debug, Default)]
pub struct FamilyTable {
    rows: Vec<MergedRow>,
    index: HashMap<InstanceKey, usize>,
}

impl FamilyTable {
    /// Folds a decoded record into the table. The first record for an
    /// instance creates the row; every record only ever writes the slot of
    /// its own solver, so the other solver's fields survive untouched.
    pub fn merge(&mut self, record: DecodedRecord) {
        let key = InstanceKey::of(&record);
        let idx = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                self.rows.push(MergedRow {
                    file: record.file.clone(),
                    assertions: record.assertions,
                    precision: record.precision,
                    time_unit: record.time_unit.clone(),
                    iterations: record.iterations,
                    soplex: SolverSlot::default(),
                    qsoptex: SolverSlot::default(),
                    params: record.params,
                });
                self.index.insert(key, self.rows.len() - 1);
                self.rows.len() - 1
            }
        };

        let row = &mut self.rows[idx];
        let slot = match record.solver.as_str() {
            SOLVER_SOPLEX => &mut row.soplex,
            SOLVER_QSOPTEX => &mut row.qsoptex,
            other => {
                warn!("Ignoring run of unknown solver '{}' for '{}'", other, record.file);
                return;
            }
        };
        slot.actual_precision = record.actual_precision;
        slot.time = record.cpu_time;
        slot.result = record.result;
    }

    pub fn rows(&self) -> &[MergedRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// The three per-family collections, selected by an explicit enum key.
#[derive(Debug, Default)]
pub struct Tables {
    lp: FamilyTable,
    smt: FamilyTable,
    ss: FamilyTable,
}

impl Tables {
    pub fn table_mut(&mut self, family: Family) -> &mut FamilyTable {
        match family {
            Family::Lp => &mut self.lp,
            Family::Smt => &mut self.smt,
            Family::SloaneStufken => &mut self.ss,
        }
    }

    pub fn table(&self, family: Family) -> &FamilyTable {
        match family {
            Family::Lp => &self.lp,
            Family::Smt => &self.smt,
            Family::SloaneStufken => &self.ss,
        }
    }
}
