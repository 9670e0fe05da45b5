//! Table request: what to render and where to put it

use crate::regression::{FittedRegression, RegressionResult};
use crate::{Result, TableError};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_CAPTION: &str = "Regression";
pub const DEFAULT_LABEL: &str = "tab:mainEmpirical";
pub const DEFAULT_BASE_NAME: &str = "regression";

/// Footnote placed under the table by [`TableSpecBuilder::significance_note`]
pub const SIGNIFICANCE_NOTE: &str = "Robust standard errors are in parenthesis. *, ** and *** denote statistical significance at the 10 percent, 5 percent and 1 percent level respectively.";

/// How many run columns the dependent-variable header spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderSpan {
    /// `floor(runs / 1.2)` columns after one empty column, as older tables
    /// were produced. One run spans zero columns.
    #[default]
    Legacy,
    /// Every run column
    AllRuns,
}

impl HeaderSpan {
    /// Columns spanned by `\multicolumn` for `runs` runs
    pub fn columns(self, runs: usize) -> usize {
        match self {
            Self::Legacy => (runs as f64 / 1.2).floor() as usize,
            Self::AllRuns => runs,
        }
    }
}

/// Everything the emitter needs
#[derive(Debug, Clone)]
pub struct TableSpec {
    dependent: String,
    runs: Vec<RegressionResult>,
    standalone: bool,
    directory: PathBuf,
    base_name: String,
    caption: String,
    label: String,
    header_span: HeaderSpan,
    note: Option<String>,
}

impl TableSpec {
    pub fn builder(dependent: impl Into<String>) -> TableSpecBuilder {
        TableSpecBuilder::new(dependent)
    }

    pub fn dependent(&self) -> &str {
        &self.dependent
    }

    pub fn runs(&self) -> &[RegressionResult] {
        &self.runs
    }

    pub fn standalone(&self) -> bool {
        self.standalone
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn header_span(&self) -> HeaderSpan {
        self.header_span
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// `<directory>/<base_name>.tex`
    pub fn output_path(&self) -> PathBuf {
        self.directory.join(format!("{}.tex", self.base_name))
    }

    pub fn validate(&self) -> Result<()> {
        if self.runs.is_empty() {
            return Err(TableError::EmptyRunSet);
        }

        let mut components = Path::new(&self.base_name).components();
        let single_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_name {
            return Err(TableError::InvalidBaseName(self.base_name.clone()));
        }

        Ok(())
    }
}

/// Builder for TableSpec
#[derive(Debug)]
pub struct TableSpecBuilder {
    dependent: String,
    runs: Vec<RegressionResult>,
    standalone: bool,
    directory: Option<PathBuf>,
    base_name: Option<String>,
    caption: Option<String>,
    label: Option<String>,
    header_span: HeaderSpan,
    note: Option<String>,
}

impl TableSpecBuilder {
    pub fn new(dependent: impl Into<String>) -> Self {
        Self {
            dependent: dependent.into(),
            runs: Vec::new(),
            standalone: false,
            directory: None,
            base_name: None,
            caption: None,
            label: None,
            header_span: HeaderSpan::default(),
            note: None,
        }
    }

    /// Append one run as the next column
    pub fn run(mut self, run: RegressionResult) -> Self {
        self.runs.push(run);
        self
    }

    /// Append runs in display order
    pub fn runs(mut self, runs: impl IntoIterator<Item = RegressionResult>) -> Self {
        self.runs.extend(runs);
        self
    }

    /// Append the output of any estimator
    pub fn fitted<R: FittedRegression + ?Sized>(self, fitted: &R) -> Self {
        self.run(RegressionResult::from_fitted(fitted))
    }

    /// Emit a complete document instead of an includable fragment
    pub fn standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// File name without the `.tex` extension
    pub fn base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = Some(base_name.into());
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn header_span(mut self, header_span: HeaderSpan) -> Self {
        self.header_span = header_span;
        self
    }

    /// Free-form footnote under the table
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Standard footnote explaining parentheses and stars
    pub fn significance_note(self) -> Self {
        self.note(SIGNIFICANCE_NOTE)
    }

    pub fn build(self) -> Result<TableSpec> {
        let spec = TableSpec {
            dependent: self.dependent,
            runs: self.runs,
            standalone: self.standalone,
            directory: self.directory.unwrap_or_else(|| PathBuf::from(".")),
            base_name: self
                .base_name
                .unwrap_or_else(|| DEFAULT_BASE_NAME.to_string()),
            caption: self.caption.unwrap_or_else(|| DEFAULT_CAPTION.to_string()),
            label: self.label.unwrap_or_else(|| DEFAULT_LABEL.to_string()),
            header_span: self.header_span,
            note: self.note,
        };

        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_run() -> RegressionResult {
        RegressionResult::new(10u64).estimate("x1", 1.0, 0.1, 0.5)
    }

    #[test]
    fn test_defaults() {
        let spec = TableSpec::builder("Y").run(one_run()).build().unwrap();

        assert_eq!(spec.dependent(), "Y");
        assert!(!spec.standalone());
        assert_eq!(spec.caption(), "Regression");
        assert_eq!(spec.label(), "tab:mainEmpirical");
        assert_eq!(spec.header_span(), HeaderSpan::Legacy);
        assert_eq!(spec.output_path(), Path::new(".").join("regression.tex"));
        assert!(spec.note().is_none());
    }

    #[test]
    fn test_output_path_uses_join() {
        let spec = TableSpec::builder("Y")
            .run(one_run())
            .directory(Path::new("out").join("tables"))
            .base_name("main")
            .build()
            .unwrap();

        assert_eq!(
            spec.output_path(),
            Path::new("out").join("tables").join("main.tex")
        );
    }

    #[test]
    fn test_empty_run_set_rejected() {
        let err = TableSpec::builder("Y").build().unwrap_err();
        assert!(matches!(err, TableError::EmptyRunSet));
    }

    #[test]
    fn test_invalid_base_name() {
        for name in ["", "a/b", "..", "/abs"] {
            let result = TableSpec::builder("Y").run(one_run()).base_name(name).build();
            assert!(
                matches!(result, Err(TableError::InvalidBaseName(_))),
                "base name {name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_legacy_span() {
        let spans: Vec<_> = (1..=10).map(|n| HeaderSpan::Legacy.columns(n)).collect();
        assert_eq!(spans, vec![0, 1, 2, 3, 4, 5, 5, 6, 7, 8]);
        assert_eq!(HeaderSpan::AllRuns.columns(7), 7);
    }

    #[test]
    fn test_significance_note() {
        let spec = TableSpec::builder("Y")
            .run(one_run())
            .significance_note()
            .build()
            .unwrap();
        assert_eq!(spec.note(), Some(SIGNIFICANCE_NOTE));
    }
}
