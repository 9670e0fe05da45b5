//! Cell formatting
//!
//! Every slot turns into two cells: the coefficient line and the standard
//! error line underneath it.

use crate::align::{AlignedTable, Slot};
use crate::regression::VariableEstimate;

/// Decimal places for coefficients and standard errors
pub const PRECISION: usize = 2;

/// Significance tier of a p-value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Significance {
    NotSignificant,
    /// p < 0.10
    TenPercent,
    /// p < 0.05
    FivePercent,
    /// p < 0.01
    OnePercent,
}

impl Significance {
    /// Classify a p-value; thresholds are strict, so p = 0.05 is only `*`
    pub fn from_p_value(p_value: f64) -> Self {
        if p_value < 0.01 {
            Self::OnePercent
        } else if p_value < 0.05 {
            Self::FivePercent
        } else if p_value < 0.10 {
            Self::TenPercent
        } else {
            Self::NotSignificant
        }
    }

    pub fn stars(self) -> &'static str {
        match self {
            Self::NotSignificant => "",
            Self::TenPercent => "*",
            Self::FivePercent => "**",
            Self::OnePercent => "***",
        }
    }
}

/// The two display cells of one slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellPair {
    pub coefficient: String,
    pub standard_error: String,
}

impl CellPair {
    pub fn is_empty(&self) -> bool {
        self.coefficient.is_empty() && self.standard_error.is_empty()
    }
}

/// Fixed-point rendering shared by both cell kinds
pub fn round_fixed(value: f64) -> String {
    format!("{value:.prec$}", prec = PRECISION)
}

pub fn format_estimate(estimate: &VariableEstimate) -> CellPair {
    let stars = Significance::from_p_value(estimate.p_value).stars();
    CellPair {
        coefficient: format!("{}{stars}", round_fixed(estimate.coefficient)),
        standard_error: format!("({})", round_fixed(estimate.standard_error)),
    }
}

/// Absent slots become a pair of empty cells
pub fn format_slot(slot: &Slot) -> CellPair {
    match slot {
        Slot::Filled(estimate) => format_estimate(estimate),
        Slot::Absent => CellPair::default(),
    }
}

/// A variable row ready for emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRow {
    pub label: String,
    pub cells: Vec<CellPair>,
}

/// Fully formatted table: variable rows plus the observation row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedTable {
    pub rows: Vec<FormattedRow>,
    pub observations: Vec<String>,
}

impl FormattedTable {
    pub fn run_count(&self) -> usize {
        self.observations.len()
    }
}

pub fn format_table(table: &AlignedTable) -> FormattedTable {
    let rows = table
        .rows()
        .map(|row| FormattedRow {
            label: row.name.to_string(),
            cells: row.slots.iter().map(format_slot).collect(),
        })
        .collect();

    let observations = table
        .observations()
        .iter()
        .map(ToString::to_string)
        .collect();

    FormattedTable { rows, observations }
}
