//! Command-line interface for regtab

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use regtab_core::{FormattedTable, HeaderSpan, RegressionResult, TableSpec};
use regtab_utils::Config;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "regtab")]
#[command(about = "Render fitted regressions as a side-by-side LaTeX table", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the LaTeX table to <dir>/<name>.tex
    Render(RenderArgs),
    /// Print the aligned table to the terminal
    Preview {
        /// JSON file holding an array of regression results
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON file holding an array of regression results, one per column
    #[arg(short, long)]
    input: PathBuf,

    /// Dependent variable label shown above the run columns
    #[arg(short, long)]
    dependent: String,

    /// Output directory [env: REGTAB_OUTPUT_DIR]
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Output file name without the .tex extension
    #[arg(short, long)]
    name: Option<String>,

    /// Emit a complete document instead of an includable fragment
    #[arg(long)]
    standalone: bool,

    /// Columns spanned by the dependent variable header [default: legacy]
    #[arg(long, value_enum)]
    span: Option<Span>,

    /// Add the significance footnote under the table
    #[arg(long)]
    note: bool,

    #[arg(long)]
    caption: Option<String>,

    #[arg(long)]
    label: Option<String>,

    /// JSON config file applied before environment and flags
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Span {
    /// floor(runs / 1.2) columns
    Legacy,
    /// Every run column
    All,
}

impl From<Span> for HeaderSpan {
    fn from(span: Span) -> Self {
        match span {
            Span::Legacy => HeaderSpan::Legacy,
            Span::All => HeaderSpan::AllRuns,
        }
    }
}

fn load_runs(path: &Path) -> anyhow::Result<Vec<RegressionResult>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input {}", path.display()))?;
    let runs = RegressionResult::list_from_json(&content)
        .with_context(|| format!("Failed to decode regression results in {}", path.display()))?;
    info!(runs = runs.len(), input = %path.display(), "Loaded regression results");
    Ok(runs)
}

fn resolve_config(args: &RenderArgs) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?.with_process_env(),
        None => Config::from_env(),
    };

    if let Some(dir) = &args.dir {
        config.output_dir.clone_from(dir);
    }
    if let Some(name) = &args.name {
        config.base_name.clone_from(name);
    }
    config.standalone |= args.standalone;
    config.significance_note |= args.note;
    if let Some(span) = args.span {
        config.header_span = span.into();
    }
    if args.caption.is_some() {
        config.caption.clone_from(&args.caption);
    }
    if args.label.is_some() {
        config.label.clone_from(&args.label);
    }
    Ok(config)
}

fn build_spec(args: &RenderArgs, config: &Config, runs: Vec<RegressionResult>) -> anyhow::Result<TableSpec> {
    let mut builder = TableSpec::builder(&args.dependent)
        .runs(runs)
        .directory(&config.output_dir)
        .base_name(&config.base_name)
        .standalone(config.standalone)
        .header_span(config.header_span);

    if config.significance_note {
        builder = builder.significance_note();
    }
    if let Some(caption) = &config.caption {
        builder = builder.caption(caption);
    }
    if let Some(label) = &config.label {
        builder = builder.label(label);
    }

    builder.build().context("Invalid table request")
}

fn render(args: &RenderArgs) -> anyhow::Result<PathBuf> {
    let config = resolve_config(args)?;
    let runs = load_runs(&args.input)?;
    let spec = build_spec(args, &config, runs)?;
    regtab_core::write_table(&spec).context("Failed to write table")
}

fn preview_table(formatted: &FormattedTable) -> Table {
    let mut table = Table::new();

    let mut header = vec![String::new()];
    header.extend((1..=formatted.run_count()).map(|i| format!("({i})")));
    table.set_header(header);

    for row in &formatted.rows {
        let mut coefficients = vec![row.label.clone()];
        coefficients.extend(row.cells.iter().map(|c| c.coefficient.clone()));
        table.add_row(coefficients);

        let mut errors = vec![String::new()];
        errors.extend(row.cells.iter().map(|c| c.standard_error.clone()));
        table.add_row(errors);
    }

    let mut observations = vec![regtab_core::emit::OBSERVATIONS_LABEL.to_string()];
    observations.extend(formatted.observations.iter().cloned());
    table.add_row(observations);

    table
}

fn preview(input: &Path) -> anyhow::Result<Table> {
    let runs = load_runs(input)?;
    let formatted = regtab_core::synthesize(&runs).context("Failed to build table")?;
    Ok(preview_table(&formatted))
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    regtab_utils::init_tracing();

    let cli = Cli::parse();

    info!("Starting regtab");

    match cli.command {
        Commands::Render(args) => {
            let path = render(&args)?;
            println!("{}", path.display());
        }
        Commands::Preview { input } => {
            println!("{}", preview(&input)?);
        }
    }

    Ok(())
}
