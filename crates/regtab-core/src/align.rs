//! Row alignment across runs
//!
//! Runs rarely share the same regressors. Alignment is an outer join keyed on
//! variable name: the row order is the order in which names are first seen
//! scanning runs left to right, and every row gets one slot per run.

use crate::extract::RunRecord;
use crate::ordered_map::OrderedMap;
use crate::regression::{ObservationCount, VariableEstimate};
use tracing::debug;

/// One cell position of a row
///
/// `Absent` means the run did not estimate the variable at all. It is not
/// the same thing as a zero estimate and renders as an empty cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot {
    Filled(VariableEstimate),
    Absent,
}

impl Slot {
    pub fn estimate(&self) -> Option<&VariableEstimate> {
        match self {
            Self::Filled(estimate) => Some(estimate),
            Self::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// One explanatory variable across all runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableRow<'a> {
    pub name: &'a str,
    pub slots: &'a [Slot],
}

/// Output of [`align`]
#[derive(Debug, Clone)]
pub struct AlignedTable {
    rows: OrderedMap<String, Vec<Slot>>,
    observations: Vec<ObservationCount>,
}

impl AlignedTable {
    /// Number of runs, i.e. data columns
    pub fn run_count(&self) -> usize {
        self.observations.len()
    }

    /// Rows in first-seen order
    pub fn rows(&self) -> impl Iterator<Item = VariableRow<'_>> {
        self.rows.iter().map(|(name, slots)| VariableRow {
            name: name.as_str(),
            slots: slots.as_slice(),
        })
    }

    pub fn row(&self, name: &str) -> Option<VariableRow<'_>> {
        let (name, slots) = self.rows.get_key_value(name)?;
        Some(VariableRow {
            name: name.as_str(),
            slots: slots.as_slice(),
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Observation counts, one per run
    pub fn observations(&self) -> &[ObservationCount] {
        &self.observations
    }
}

/// Align run records into rows
pub fn align(records: &[RunRecord]) -> AlignedTable {
    let mut union: OrderedMap<String, ()> = OrderedMap::new();
    for record in records {
        for variable in record.variables() {
            // re-inserting a seen name keeps its first position
            union.insert(variable.to_string(), ());
        }
    }

    let rows: OrderedMap<String, Vec<Slot>> = union
        .into_iter()
        .map(|(variable, ())| {
            let slots = records
                .iter()
                .map(|record| match record.get(variable.as_str()) {
                    Some(estimate) => Slot::Filled(*estimate),
                    None => Slot::Absent,
                })
                .collect();
            (variable, slots)
        })
        .collect();

    let observations = records.iter().map(RunRecord::observations).collect();

    debug!(runs = records.len(), rows = rows.len(), "Aligned runs");

    AlignedTable { rows, observations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegressionResult;
    use crate::extract::extract_all;

    fn records(runs: &[RegressionResult]) -> Vec<RunRecord> {
        extract_all(runs).unwrap()
    }

    #[test]
    fn test_first_seen_order() {
        let a = RegressionResult::new(10u64)
            .estimate("x1", 1.0, 0.1, 0.5)
            .estimate("x2", 2.0, 0.2, 0.5);
        let b = RegressionResult::new(20u64)
            .estimate("x2", 3.0, 0.3, 0.5)
            .estimate("x3", 4.0, 0.4, 0.5);

        let table = align(&records(&[a, b]));
        let names: Vec<_> = table.rows().map(|row| row.name).collect();
        assert_eq!(names, vec!["x1", "x2", "x3"]);

        let x1 = table.row("x1").unwrap();
        assert_eq!(x1.slots[0], Slot::Filled(VariableEstimate::new(1.0, 0.1, 0.5)));
        assert!(x1.slots[1].is_absent());

        let x3 = table.row("x3").unwrap();
        assert!(x3.slots[0].is_absent());
        assert_eq!(x3.slots[1].estimate().map(|e| e.coefficient), Some(4.0));
    }

    #[test]
    fn test_not_alphabetical() {
        let a = RegressionResult::new(1u64)
            .estimate("zeta", 1.0, 0.1, 0.5)
            .estimate("alpha", 1.0, 0.1, 0.5);
        let b = RegressionResult::new(1u64).estimate("beta", 1.0, 0.1, 0.5);

        let table = align(&records(&[a, b]));
        let names: Vec<_> = table.rows().map(|row| row.name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "beta"]);
    }

    #[test]
    fn test_slots_come_from_own_run() {
        let a = RegressionResult::new(1u64).estimate("x", 1.0, 0.1, 0.5);
        let b = RegressionResult::new(1u64).estimate("y", 5.0, 0.5, 0.5);
        let c = RegressionResult::new(1u64)
            .estimate("y", 7.0, 0.7, 0.5)
            .estimate("x", 3.0, 0.3, 0.5);

        let table = align(&records(&[a, b, c]));
        let x = table.row("x").unwrap();
        let coefficients: Vec<_> = x
            .slots
            .iter()
            .map(|slot| slot.estimate().map(|e| e.coefficient))
            .collect();
        assert_eq!(coefficients, vec![Some(1.0), None, Some(3.0)]);

        let y = table.row("y").unwrap();
        let coefficients: Vec<_> = y
            .slots
            .iter()
            .map(|slot| slot.estimate().map(|e| e.coefficient))
            .collect();
        assert_eq!(coefficients, vec![None, Some(5.0), Some(7.0)]);
    }

    #[test]
    fn test_slot_count_equals_run_count() {
        let runs: Vec<_> = (0..5u64)
            .map(|i| RegressionResult::new(i).estimate(format!("x{i}"), 1.0, 0.1, 0.5))
            .collect();

        let table = align(&records(&runs));
        assert_eq!(table.run_count(), 5);
        assert_eq!(table.row_count(), 5);
        assert!(table.rows().all(|row| row.slots.len() == 5));
    }

    #[test]
    fn test_observation_row_ignores_variables() {
        let a = RegressionResult::new(100u64).estimate("x1", 1.0, 0.1, 0.5);
        let b = RegressionResult::new(50.5);

        let table = align(&records(&[a, b]));
        assert_eq!(
            table.observations(),
            &[ObservationCount::Integer(100), ObservationCount::Float(50.5)]
        );
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_zero_estimate_is_not_absent() {
        let a = RegressionResult::new(1u64).estimate("x", 0.0, 0.0, 1.0);
        let table = align(&records(&[a]));
        let row = table.row("x").unwrap();
        assert!(!row.slots[0].is_absent());
    }
}
