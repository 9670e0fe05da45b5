//! Fluent LaTeX builder
//!
//! [`LatexBuilder`] assembles a document line by line. It knows about
//! environments, tabular rows and indentation, nothing about regressions.

use crate::{Result, TableError};

/// A fluent builder for LaTeX source
///
/// # Examples
///
/// ```
/// use regtab_core::markup::LatexBuilder;
///
/// let tex = LatexBuilder::new()
///     .begin("center")
///     .line(1, r"\toprule")
///     .row(1, "", ["(1)", "(2)"])
///     .end("center")
///     .build();
///
/// assert_eq!(tex, "\\begin{center}\n\t\\toprule\n\t&(1)&(2)\\\\\n\\end{center}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct LatexBuilder {
    parts: Vec<String>,
}

impl LatexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add raw text with no trailing newline
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.parts.push(content.into());
        self
    }

    /// Add one line indented by `indent` tabs
    pub fn line(self, indent: usize, content: impl AsRef<str>) -> Self {
        let line = format!("{}{}\n", "\t".repeat(indent), content.as_ref());
        self.text(line)
    }

    pub fn blank_line(self) -> Self {
        self.text("\n")
    }

    /// `\begin{env}` at column zero
    pub fn begin(self, environment: &str) -> Self {
        self.line(0, format!("\\begin{{{environment}}}"))
    }

    /// `\end{env}` at column zero
    pub fn end(self, environment: &str) -> Self {
        self.line(0, format!("\\end{{{environment}}}"))
    }

    /// `\command[options]{argument}`, options omitted when empty
    pub fn command(self, indent: usize, name: &str, options: &str, argument: &str) -> Self {
        let line = if options.is_empty() {
            format!("\\{name}{{{argument}}}")
        } else {
            format!("\\{name}[{options}]{{{argument}}}")
        };
        self.line(indent, line)
    }

    /// A tabular row: `label&cell&cell\\`
    ///
    /// Each cell is preceded by its separator, so an empty cell still
    /// occupies its column.
    pub fn row<I, S>(self, indent: usize, label: &str, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut line = label.to_string();
        for cell in cells {
            line.push('&');
            line.push_str(cell.as_ref());
        }
        line.push_str("\\\\");
        self.line(indent, line)
    }

    /// Add content only when `condition` holds
    pub fn when(self, condition: bool, f: impl FnOnce(Self) -> Self) -> Self {
        if condition { f(self) } else { self }
    }

    pub fn build(self) -> String {
        self.parts.concat()
    }
}

/// Wrap a name so TeX prints it literally
///
/// `\detokenize` handles underscores, carets and the like but needs
/// balanced braces.
pub fn detokenize(name: &str) -> Result<String> {
    let mut depth = 0usize;
    for ch in name.chars() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| TableError::UnbalancedBraces(name.to_string()))?;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(TableError::UnbalancedBraces(name.to_string()));
    }
    Ok(format!("\\detokenize{{{name}}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_indent() {
        let tex = LatexBuilder::new().line(0, "a").line(2, "b").build();
        assert_eq!(tex, "a\n\t\tb\n");
    }

    #[test]
    fn test_command() {
        let tex = LatexBuilder::new()
            .command(0, "usepackage", "", "booktabs")
            .command(0, "usepackage", "T1", "fontenc")
            .build();
        assert_eq!(tex, "\\usepackage{booktabs}\n\\usepackage[T1]{fontenc}\n");
    }

    #[test]
    fn test_row_keeps_empty_cells() {
        let tex = LatexBuilder::new().row(0, "x", ["", "1.00", ""]).build();
        assert_eq!(tex, "x&&1.00&\\\\\n");
    }

    #[test]
    fn test_when() {
        let on = LatexBuilder::new().when(true, |b| b.text("yes")).build();
        let off = LatexBuilder::new().when(false, |b| b.text("yes")).build();
        assert_eq!(on, "yes");
        assert!(off.is_empty());
    }

    #[test]
    fn test_detokenize() {
        assert_eq!(detokenize("log_gdp").unwrap(), "\\detokenize{log_gdp}");
        assert_eq!(detokenize("a{b}").unwrap(), "\\detokenize{a{b}}");
        assert!(matches!(
            detokenize("a}b{"),
            Err(TableError::UnbalancedBraces(_))
        ));
        assert!(detokenize("a{").is_err());
    }
}
