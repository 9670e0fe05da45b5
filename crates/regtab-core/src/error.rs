//! Error types for regtab-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for regtab-core
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors raised while building or writing a regression table
#[derive(Error, Debug)]
pub enum TableError {
    /// The per-variable sequences of a run have different lengths
    #[error(
        "Run {run}: sequence lengths differ (variables={variables}, coefficients={coefficients}, standard_errors={standard_errors}, p_values={p_values})"
    )]
    ShapeMismatch {
        run: usize,
        variables: usize,
        coefficients: usize,
        standard_errors: usize,
        p_values: usize,
    },

    /// A run carries no entries at all, so there is no intercept to drop
    #[error("Run {run} has no intercept entry")]
    MissingIntercept { run: usize },

    /// The same variable name appears twice inside one run
    #[error("Run {run} lists variable '{name}' more than once")]
    DuplicateVariable { run: usize, name: String },

    /// Observation count is negative or not finite
    #[error("Run {run} has invalid observation count {value}")]
    InvalidObservationCount { run: usize, value: f64 },

    /// A variable name cannot be wrapped in `\detokenize`
    #[error("Variable name '{0}' has unbalanced braces")]
    UnbalancedBraces(String),

    /// No runs were supplied
    #[error("No regression runs supplied")]
    EmptyRunSet,

    /// The output base name is empty or contains path components
    #[error("Invalid base name '{0}'")]
    InvalidBaseName(String),

    /// The output directory could not be created
    #[error("Cannot create output directory '{}': {source}", path.display())]
    InvalidDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON decoding of regression results failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while writing the table
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TableError::ShapeMismatch {
            run: 1,
            variables: 3,
            coefficients: 3,
            standard_errors: 2,
            p_values: 3,
        };
        assert_eq!(
            err.to_string(),
            "Run 1: sequence lengths differ (variables=3, coefficients=3, standard_errors=2, p_values=3)"
        );

        let err = TableError::InvalidDirectory {
            path: PathBuf::from("/nope/out"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Cannot create output directory '/nope/out': denied");
    }
}
