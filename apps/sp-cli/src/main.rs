use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use sp_case::{CaseConfig, CaseError, GlobalParameter, PreparedCase, post_process, prepare_case};
use sp_report::{
    DerivedMetrics, MetricNames, ReportError, ReportExporter, ResultsTable, SimulationSnapshot,
};

#[derive(Parser)]
#[command(name = "sp-cli")]
#[command(about = "simpost CLI - simulation report export and case post-processing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export reports and final residuals from a simulation snapshot
    Export {
        /// Path to the snapshot file (.yaml, .yml or .json)
        snapshot_path: PathBuf,
        /// Output file (defaults to results.csv in the session directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Read an exported results table and print it with derived metrics
    Summary {
        /// Path to the results table
        results_path: PathBuf,
        /// Case config supplying the result names used for derived metrics
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Prepare a case directory and print the batch command
    Prepare(CaseArgs),
    /// Prepare a case, run the solver and post-process its results
    Run(CaseArgs),
}

#[derive(clap::Args)]
struct CaseArgs {
    /// Path to the case config YAML file
    config_path: PathBuf,
    /// Directory holding the base simulation file and static macros
    refs_dir: PathBuf,
    /// Directory the case directory is created in
    data_dir: PathBuf,
    /// Name of the case directory
    case_name: String,
    /// Global parameter override, NAME=VALUE (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE")]
    overrides: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Case(#[from] CaseError),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            snapshot_path,
            output,
        } => cmd_export(&snapshot_path, output.as_deref()),
        Commands::Summary {
            results_path,
            config,
        } => cmd_summary(&results_path, config.as_deref()),
        Commands::Prepare(args) => cmd_prepare(&args).map(|_| ()),
        Commands::Run(args) => cmd_run(&args),
    }
}

fn cmd_export(snapshot_path: &Path, output: Option<&Path>) -> CliResult<()> {
    let snapshot = SimulationSnapshot::load(snapshot_path)?;
    let exporter = ReportExporter::default();

    let summary = match output {
        Some(path) => exporter.try_export_to(&snapshot, path)?,
        None => exporter.try_export(&snapshot)?,
    };

    println!(
        "✓ Exported {} reports and {} residuals to {}",
        summary.report_rows,
        summary.monitor_rows,
        summary.path.display()
    );
    Ok(())
}

fn cmd_summary(results_path: &Path, config: Option<&Path>) -> CliResult<()> {
    let names = match config {
        Some(path) => CaseConfig::load(path)?.metrics,
        None => MetricNames::default(),
    };

    let (table, metrics) = post_process(results_path, &names)?;
    print_table(&table);
    note_missing_metrics(&metrics);
    Ok(())
}

fn cmd_prepare(args: &CaseArgs) -> CliResult<PreparedCase> {
    let config = CaseConfig::load(&args.config_path)?;
    let overrides = args
        .overrides
        .iter()
        .map(|s| s.parse::<GlobalParameter>())
        .collect::<Result<Vec<_>, _>>()?;

    let prepared = prepare_case(
        &config,
        &args.refs_dir,
        &args.data_dir,
        &args.case_name,
        &overrides,
    )?;

    println!("Prepared case: {}", prepared.layout.case_dir.display());
    println!("Parameters:");
    for p in &prepared.parameters {
        println!("  {} = {}", p.name, sp_core::format_real(p.value));
    }
    println!("Batch command:\n  {}", prepared.command);
    Ok(prepared)
}

fn cmd_run(args: &CaseArgs) -> CliResult<()> {
    let prepared = cmd_prepare(args)?;
    let outcome = sp_case::run_case(&prepared)?;

    println!(
        "\n✓ Case {} finished in {:.1}s ({} - {})",
        outcome.case_name,
        outcome.elapsed_s,
        outcome.started_at.format("%H:%M"),
        outcome.finished_at.format("%H:%M")
    );
    print_table(&outcome.table);
    note_missing_metrics(&outcome.metrics);
    Ok(())
}

fn print_table(table: &ResultsTable) {
    if table.is_empty() {
        println!("No results found");
        return;
    }

    let width = table
        .entries()
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(0);

    println!("\nResults:");
    for entry in table.entries() {
        println!(
            "  {:<width$}  {} {}",
            entry.name,
            entry.value,
            entry.unit,
            width = width
        );
    }
}

fn note_missing_metrics(metrics: &DerivedMetrics) {
    if metrics.iter().next().is_none() {
        println!("\nNo derived metrics (inputs missing)");
    }
}
