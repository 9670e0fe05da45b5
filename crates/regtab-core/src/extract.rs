//! Per-run estimate extraction

use crate::ordered_map::OrderedMap;
use crate::regression::{FittedRegression, ObservationCount, VariableEstimate};
use crate::{Result, TableError};
use tracing::debug;

/// Estimates of one run with the intercept removed, in the run's own order
#[derive(Debug, Clone)]
pub struct RunRecord {
    estimates: OrderedMap<String, VariableEstimate>,
    observations: ObservationCount,
}

impl RunRecord {
    pub fn estimates(&self) -> &OrderedMap<String, VariableEstimate> {
        &self.estimates
    }

    pub fn get(&self, variable: &str) -> Option<&VariableEstimate> {
        self.estimates.get(variable)
    }

    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.estimates.keys().map(String::as_str)
    }

    pub fn observations(&self) -> ObservationCount {
        self.observations
    }
}

/// Extract the record of run number `run` (0-based, used in errors)
///
/// Fails with [`TableError::ShapeMismatch`] before anything else is looked at
/// when the four sequences disagree in length.
pub fn extract<R: FittedRegression + ?Sized>(run: usize, fitted: &R) -> Result<RunRecord> {
    let names = fitted.variable_names();
    let coefficients = fitted.coefficients();
    let standard_errors = fitted.standard_errors();
    let p_values = fitted.p_values();

    let len = names.len();
    if coefficients.len() != len || standard_errors.len() != len || p_values.len() != len {
        return Err(TableError::ShapeMismatch {
            run,
            variables: len,
            coefficients: coefficients.len(),
            standard_errors: standard_errors.len(),
            p_values: p_values.len(),
        });
    }
    if len == 0 {
        return Err(TableError::MissingIntercept { run });
    }

    let observations = fitted.observations();
    if !observations.is_valid() {
        return Err(TableError::InvalidObservationCount {
            run,
            value: observations.as_f64(),
        });
    }

    let mut estimates = OrderedMap::new();
    let columns = names
        .iter()
        .zip(coefficients)
        .zip(standard_errors)
        .zip(p_values)
        .skip(1);
    for (((name, &coefficient), &standard_error), &p_value) in columns {
        let estimate = VariableEstimate::new(coefficient, standard_error, p_value);
        if estimates.insert(name.clone(), estimate).is_some() {
            return Err(TableError::DuplicateVariable {
                run,
                name: name.clone(),
            });
        }
    }

    debug!(run, variables = estimates.len(), %observations, "Extracted run");

    Ok(RunRecord {
        estimates,
        observations,
    })
}

/// Extract every run in display order
pub fn extract_all<R: FittedRegression>(runs: &[R]) -> Result<Vec<RunRecord>> {
    runs.iter()
        .enumerate()
        .map(|(run, fitted)| extract(run, fitted))
        .collect()
}
