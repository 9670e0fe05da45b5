//! LaTeX document emission

use crate::align::align;
use crate::cell::{FormattedTable, format_table};
use crate::extract::extract_all;
use crate::markup::{LatexBuilder, detokenize};
use crate::regression::FittedRegression;
use crate::spec::{HeaderSpan, TableSpec};
use crate::{Result, TableError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Packages loaded by a standalone document, in load order
pub const PACKAGES: &[(&str, &str)] = &[
    ("", "arev"),
    ("", "longtable"),
    ("", "setspace"),
    ("", "graphicx"),
    ("", "booktabs"),
    ("", "mathptmx"),
    ("", "multirow"),
    ("", "helvet"),
    ("", "dsfont"),
    ("", "soul"),
    ("utf8", "inputenc"),
    ("", "hyperref"),
    ("", "epstopdf"),
    ("", "subfig"),
    ("T1", "fontenc"),
    ("margin=0.2in", "geometry"),
    ("", "pdflscape"),
    ("", "tablefootnote"),
];

/// Label of the observation-count row
pub const OBSERVATIONS_LABEL: &str = "N";

/// Extract, align and format runs without emitting anything
pub fn synthesize<R: FittedRegression>(runs: &[R]) -> Result<FormattedTable> {
    if runs.is_empty() {
        return Err(TableError::EmptyRunSet);
    }
    let records = extract_all(runs)?;
    let aligned = align(&records);
    Ok(format_table(&aligned))
}

/// Render the LaTeX text for `spec`
///
/// The table is always wrapped in a balanced `landscape` environment, with or
/// without the standalone preamble. Older output opened it only alongside the
/// preamble and had four blank lines after `\begin{landscape}`.
pub fn render(spec: &TableSpec) -> Result<String> {
    let table = synthesize(spec.runs())?;
    emit(spec, &table)
}

/// Render `spec` and write it to `<directory>/<base_name>.tex`
///
/// The text goes to a temporary file in the target directory first and is
/// renamed over the destination, so a failed write leaves any previous file
/// untouched. An existing file keeps its permissions; a new one gets the
/// usual umask-filtered mode. Returns the path written.
pub fn write_table(spec: &TableSpec) -> Result<PathBuf> {
    let tex = render(spec)?;

    let directory = spec.directory();
    std::fs::create_dir_all(directory).map_err(|source| TableError::InvalidDirectory {
        path: directory.to_path_buf(),
        source,
    })?;

    let path = spec.output_path();
    let mut staging = staging_file(directory, &path)?;
    staging.write_all(tex.as_bytes())?;
    staging.flush()?;
    staging.persist(&path).map_err(|e| TableError::Io(e.error))?;

    info!(path = %path.display(), bytes = tex.len(), "Wrote regression table");
    Ok(path)
}

fn staging_file(directory: &Path, destination: &Path) -> Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".regtab-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let staging = builder.tempfile_in(directory)?;

    if let Ok(existing) = std::fs::metadata(destination) {
        staging.as_file().set_permissions(existing.permissions())?;
    }
    Ok(staging)
}

fn emit(spec: &TableSpec, table: &FormattedTable) -> Result<String> {
    let runs = table.run_count();

    let mut doc = LatexBuilder::new().when(spec.standalone(), |doc| {
        let doc = doc.command(0, "documentclass", "12pt", "article");
        PACKAGES
            .iter()
            .fold(doc, |doc, (options, package)| {
                doc.command(0, "usepackage", options, package)
            })
            .begin("document")
    });

    doc = doc
        .begin("landscape")
        .line(0, "\\begin{table}[]")
        .command(1, "caption", "", spec.caption())
        .command(1, "label", "", spec.label())
        .line(1, "\\begin{center}")
        .line(1, "\\scalebox{0.65}{")
        .blank_line()
        .line(1, format!("\\begin{{tabular}}{{l{}}}", "c".repeat(runs)))
        .line(2, "\\toprule")
        .line(1, header(spec.header_span(), runs, spec.dependent()))
        .row(1, "", (1..=runs).map(|i| format!("({i})")))
        .line(0, "\\midrule");

    for row in &table.rows {
        let label = format!("\\multirow{{2}}{{*}}{{{}}}", detokenize(&row.label)?);
        doc = doc
            .row(1, &label, row.cells.iter().map(|c| c.coefficient.as_str()))
            .row(1, "", row.cells.iter().map(|c| c.standard_error.as_str()));
    }

    let observations_label = format!(
        "\\multirow{{2}}{{*}}{{{}}}",
        detokenize(OBSERVATIONS_LABEL)?
    );
    let note = match spec.note() {
        Some(note) => format!("\t{{\\footnotesize {{{note}}}}}\n"),
        None => "\n".to_string(),
    };

    let tex = doc
        .line(1, "\\bottomrule")
        .row(1, &observations_label, &table.observations)
        .blank_line()
        .line(1, "\\bottomrule")
        .line(1, "\\end{tabular}}")
        .line(1, "\\end{center}")
        .line(1, "\\begin{singlespace}")
        .text(note)
        .line(1, "\\end{singlespace}")
        .end("table")
        .blank_line()
        .end("landscape")
        .when(spec.standalone(), |doc| doc.end("document"))
        .build();

    debug!(runs, rows = table.rows.len(), "Rendered table");
    Ok(tex)
}

fn header(span: HeaderSpan, runs: usize, dependent: &str) -> String {
    let columns = span.columns(runs);
    if columns == 0 {
        warn!(runs, "Dependent variable header spans no columns");
    }
    let lead = match span {
        HeaderSpan::Legacy => "&&",
        HeaderSpan::AllRuns => "&",
    };
    format!("{lead}\\multicolumn{{{columns}}}{{c}}{{\\emph{{{dependent}}}}}\\\\")
}
