//! Case preparation, launch and post-processing.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use sp_report::{DerivedMetrics, MetricNames, ResultsTable, derive_metrics, read_results};

use crate::command::{BatchCommand, Platform};
use crate::config::{CaseConfig, GlobalParameter, validate_parameters};
use crate::layout::CaseLayout;
use crate::parameter_macro::{PARAMETER_MACRO_CLASS, render_parameter_macro};
use crate::{CaseError, CaseResult};

/// A case directory ready to be handed to the host.
#[derive(Debug, Clone)]
pub struct PreparedCase {
    pub layout: CaseLayout,
    pub parameters: Vec<GlobalParameter>,
    pub command: BatchCommand,
    pub metric_names: MetricNames,
}

#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub case_name: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_s: f64,
    /// Exported results followed by the derived metrics.
    pub table: ResultsTable,
    pub metrics: DerivedMetrics,
}

/// Create the case directory under `data_dir` and write everything the
/// batch run needs.
///
/// `refs_dir` holds the base simulation file and the static macros.
pub fn prepare_case(
    config: &CaseConfig,
    refs_dir: &Path,
    data_dir: &Path,
    case_name: &str,
    overrides: &[GlobalParameter],
) -> CaseResult<PreparedCase> {
    config.validate()?;
    let parameters = config.merged_parameters(overrides);
    validate_parameters(&parameters)?;

    let layout = CaseLayout::new(data_dir, case_name)?;
    fs::create_dir_all(&layout.case_dir)?;

    fs::copy(refs_dir.join(&config.base_case_file), &layout.sim_file)?;
    fs::write(
        &layout.parameter_macro,
        render_parameter_macro(PARAMETER_MACRO_CLASS, &parameters),
    )?;

    let mut macros: Vec<PathBuf> = Vec::new();
    if let Some(geometry) = &config.macros.geometry {
        macros.push(refs_dir.join(geometry));
    }
    macros.push(refs_dir.join(&config.macros.replace_geometry));
    macros.push(layout.parameter_macro.clone());
    macros.push(refs_dir.join(&config.macros.run));
    macros.push(refs_dir.join(&config.macros.post));

    let command = BatchCommand {
        executable: config.solver_executable.clone(),
        sim_file: layout.sim_file.clone(),
        macros,
        n_cpus: config.n_cpus,
        working_dir: layout.case_dir.clone(),
        platform: Platform::current(),
    };

    tracing::info!(
        case = %layout.case_name,
        parameters = parameters.len(),
        "case prepared"
    );

    Ok(PreparedCase {
        layout,
        parameters,
        command,
        metric_names: config.metrics.clone(),
    })
}

/// Run the host in batch mode and post-process what it exported.
///
/// Host stdout/stderr go to the case's log files.
pub fn run_case(prepared: &PreparedCase) -> CaseResult<CaseOutcome> {
    let layout = &prepared.layout;
    let started_at = Utc::now();
    let start = Instant::now();

    tracing::info!(case = %layout.case_name, command = %prepared.command, "running");
    let stdout = File::create(&layout.stdout_log)?;
    let stderr = File::create(&layout.stderr_log)?;
    let status = prepared
        .command
        .to_command()
        .stdout(stdout)
        .stderr(stderr)
        .status()?;

    if !status.success() {
        return Err(CaseError::SolverFailed {
            code: status.code(),
            stderr_log: layout.stderr_log.clone(),
        });
    }

    tracing::info!(case = %layout.case_name, "posting");
    let (table, metrics) = post_process(&layout.results_file, &prepared.metric_names)?;
    tracing::info!(case = %layout.case_name, rows = table.len(), "posting successful");

    Ok(CaseOutcome {
        case_name: layout.case_name.clone(),
        started_at,
        finished_at: Utc::now(),
        elapsed_s: start.elapsed().as_secs_f64(),
        table,
        metrics,
    })
}

/// Read an exported results table and append the derived metrics to it.
pub fn post_process(
    results_file: &Path,
    names: &MetricNames,
) -> CaseResult<(ResultsTable, DerivedMetrics)> {
    let mut table = read_results(results_file)?;
    let metrics = derive_metrics(&table, names);
    metrics.append_to(&mut table);
    Ok((table, metrics))
}
