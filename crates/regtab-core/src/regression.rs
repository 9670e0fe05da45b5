//! Fitted regression results
//!
//! The table pipeline never fits anything itself. Estimators hand their
//! output over either as a [`RegressionResult`] or through any type that
//! implements [`FittedRegression`].

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to the intercept by [`RegressionResult::new`]
pub const INTERCEPT: &str = "const";

/// Observation count reported by an estimator
///
/// Most estimators report an integer count, some report a float (weighted
/// samples, statsmodels' `nobs`). Both print without rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObservationCount {
    Integer(u64),
    Float(f64),
}

impl ObservationCount {
    /// A float count must be finite and non-negative
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Integer(_) => true,
            Self::Float(value) => value.is_finite() && *value >= 0.0,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Integer(n) => *n as f64,
            Self::Float(value) => *value,
        }
    }
}

impl fmt::Display for ObservationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

impl From<u64> for ObservationCount {
    fn from(n: u64) -> Self {
        Self::Integer(n)
    }
}

impl From<usize> for ObservationCount {
    fn from(n: usize) -> Self {
        Self::Integer(n as u64)
    }
}

impl From<f64> for ObservationCount {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Estimate of one explanatory variable in one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariableEstimate {
    pub coefficient: f64,
    pub standard_error: f64,
    pub p_value: f64,
}

impl VariableEstimate {
    pub fn new(coefficient: f64, standard_error: f64, p_value: f64) -> Self {
        Self {
            coefficient,
            standard_error,
            p_value,
        }
    }
}

/// Read-only view of a fitted regression
///
/// All four sequences are indexed consistently and their first entry is the
/// intercept.
pub trait FittedRegression {
    /// Explanatory variable names, intercept first
    fn variable_names(&self) -> &[String];

    /// Point estimates, intercept first
    fn coefficients(&self) -> &[f64];

    /// Standard errors, intercept first
    fn standard_errors(&self) -> &[f64];

    /// Two-sided p-values, intercept first
    fn p_values(&self) -> &[f64];

    /// Number of observations the model was fitted on
    fn observations(&self) -> ObservationCount;
}

/// Plain-data regression result, the form runs take when loaded from JSON
///
/// # Example
///
/// ```
/// use regtab_core::{FittedRegression, RegressionResult};
///
/// let run = RegressionResult::new(100u64)
///     .estimate("x1", 1.234, 0.5, 0.03)
///     .estimate("x2", -0.5, 0.1, 0.001);
///
/// assert_eq!(run.variable_names(), ["const", "x1", "x2"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub variables: Vec<String>,
    pub coefficients: Vec<f64>,
    pub standard_errors: Vec<f64>,
    pub p_values: Vec<f64>,
    pub observations: ObservationCount,
}

impl RegressionResult {
    /// Start a result whose intercept estimate is unknown
    ///
    /// The intercept never reaches the table, so it is recorded as NaN.
    pub fn new(observations: impl Into<ObservationCount>) -> Self {
        Self {
            variables: vec![INTERCEPT.to_string()],
            coefficients: vec![f64::NAN],
            standard_errors: vec![f64::NAN],
            p_values: vec![f64::NAN],
            observations: observations.into(),
        }
    }

    /// Overwrite the intercept estimate
    pub fn intercept(mut self, coefficient: f64, standard_error: f64, p_value: f64) -> Self {
        self.coefficients[0] = coefficient;
        self.standard_errors[0] = standard_error;
        self.p_values[0] = p_value;
        self
    }

    /// Append one explanatory variable
    pub fn estimate(
        mut self,
        name: impl Into<String>,
        coefficient: f64,
        standard_error: f64,
        p_value: f64,
    ) -> Self {
        self.variables.push(name.into());
        self.coefficients.push(coefficient);
        self.standard_errors.push(standard_error);
        self.p_values.push(p_value);
        self
    }

    /// Copy any fitted regression into plain data
    pub fn from_fitted<R: FittedRegression + ?Sized>(fitted: &R) -> Self {
        Self {
            variables: fitted.variable_names().to_vec(),
            coefficients: fitted.coefficients().to_vec(),
            standard_errors: fitted.standard_errors().to_vec(),
            p_values: fitted.p_values().to_vec(),
            observations: fitted.observations(),
        }
    }

    /// Decode a JSON array of results
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FittedRegression for RegressionResult {
    fn variable_names(&self) -> &[String] {
        &self.variables
    }

    fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    fn standard_errors(&self) -> &[f64] {
        &self.standard_errors
    }

    fn p_values(&self) -> &[f64] {
        &self.p_values
    }

    fn observations(&self) -> ObservationCount {
        self.observations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_intercept_first() {
        let run = RegressionResult::new(10u64)
            .intercept(0.3, 0.1, 0.02)
            .estimate("x1", 1.0, 0.2, 0.5);

        assert_eq!(run.variables, vec!["const", "x1"]);
        assert_eq!(run.coefficients, vec![0.3, 1.0]);
        assert_eq!(run.observations, ObservationCount::Integer(10));
    }

    #[test]
    fn test_observation_display() {
        assert_eq!(ObservationCount::Integer(100).to_string(), "100");
        assert_eq!(ObservationCount::Float(100.0).to_string(), "100");
        assert_eq!(ObservationCount::Float(99.5).to_string(), "99.5");
    }

    #[test]
    fn test_observation_validity() {
        assert!(ObservationCount::Integer(0).is_valid());
        assert!(ObservationCount::Float(12.5).is_valid());
        assert!(!ObservationCount::Float(-1.0).is_valid());
        assert!(!ObservationCount::Float(f64::NAN).is_valid());
        assert!(!ObservationCount::Float(f64::INFINITY).is_valid());
    }

    #[test]
    fn test_list_from_json() {
        let json = r#"[
            {
                "variables": ["const", "x1"],
                "coefficients": [0.1, 1.234],
                "standard_errors": [0.05, 0.5],
                "p_values": [0.04, 0.03],
                "observations": 100
            },
            {
                "variables": ["const", "x2"],
                "coefficients": [0.2, -0.5],
                "standard_errors": [0.1, 0.1],
                "p_values": [0.2, 0.001],
                "observations": 50.5
            }
        ]"#;

        let runs = RegressionResult::list_from_json(json).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].observations, ObservationCount::Integer(100));
        assert_eq!(runs[1].observations, ObservationCount::Float(50.5));
        assert_eq!(runs[1].variable_names(), ["const", "x2"]);
    }

    #[test]
    fn test_list_from_json_missing_observations() {
        let json = r#"[{"variables": ["const"], "coefficients": [0.1],
                        "standard_errors": [0.1], "p_values": [0.5]}]"#;
        assert!(RegressionResult::list_from_json(json).is_err());
    }
}
