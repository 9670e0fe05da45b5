//! Regression table synthesis for regtab
//!
//! Turns fitted regression results into a LaTeX table with one column per
//! run, aligning variables that differ from run to run.
//!
//! The pipeline runs in four steps:
//!
//! - [`extract`]: drop the intercept and key each run's estimates by name
//! - [`align`]: outer-join runs on variable name in first-seen order
//! - [`cell`]: round to two decimals and attach significance stars
//! - [`emit`]: assemble the LaTeX document and write it to disk
//!
//! # Example
//!
//! ```
//! use regtab_core::{RegressionResult, TableSpec, render};
//!
//! let spec = TableSpec::builder("Y")
//!     .run(RegressionResult::new(100u64).estimate("x1", 1.234, 0.5, 0.03))
//!     .run(
//!         RegressionResult::new(50u64)
//!             .estimate("x1", 2.0, 1.0, 0.2)
//!             .estimate("x2", -0.5, 0.1, 0.001),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let tex = render(&spec).unwrap();
//! assert!(tex.contains("\\detokenize{x1}}&1.23**&2.00\\\\"));
//! assert!(tex.contains("\\detokenize{x2}}&&-0.50***\\\\"));
//! ```

pub mod align;
pub mod cell;
pub mod emit;
pub mod error;
pub mod extract;
pub mod markup;
pub mod ordered_map;
pub mod regression;
pub mod spec;

pub use align::{AlignedTable, Slot, VariableRow, align};
pub use cell::{CellPair, FormattedRow, FormattedTable, Significance, format_table};
pub use emit::{render, synthesize, write_table};
pub use error::{Result, TableError};
pub use extract::{RunRecord, extract, extract_all};
pub use ordered_map::OrderedMap;
pub use regression::{FittedRegression, ObservationCount, RegressionResult, VariableEstimate};
pub use spec::{HeaderSpan, TableSpec, TableSpecBuilder};
