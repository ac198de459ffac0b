//! Report Exporter: writes reports and final residuals to a text table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use sp_core::format_real;

use crate::ReportResult;
use crate::context::SimulationContext;
use crate::model::ExportRecord;

/// First line of every exported table, trailing separator included.
pub const HEADER: &str = "Report Name, Value, Unit, ";

/// Session-relative name the exporter writes to by default.
pub const RESULTS_FILE_NAME: &str = "results.csv";

/// What a successful export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub report_rows: usize,
    pub monitor_rows: usize,
}

#[derive(Debug, Clone)]
pub struct ReportExporter {
    file_name: String,
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self {
            file_name: RESULTS_FILE_NAME.to_string(),
        }
    }
}

impl ReportExporter {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Export to the configured name inside the session directory.
    ///
    /// Output failures are dropped: the call returns normally and leaves
    /// no signal beyond a warning in the trace log.
    pub fn export(&self, ctx: &dyn SimulationContext) {
        let path = ctx.resolve_path(&self.file_name);
        self.export_to(ctx, &path);
    }

    /// Same as [`ReportExporter::export`], to an explicit path.
    pub fn export_to(&self, ctx: &dyn SimulationContext, path: &Path) {
        if let Err(err) = self.try_export_to(ctx, path) {
            tracing::warn!(path = %path.display(), error = %err, "report export skipped");
        }
    }

    pub fn try_export(&self, ctx: &dyn SimulationContext) -> ReportResult<ExportSummary> {
        let path = ctx.resolve_path(&self.file_name);
        self.try_export_to(ctx, &path)
    }

    pub fn try_export_to(
        &self,
        ctx: &dyn SimulationContext,
        path: &Path,
    ) -> ReportResult<ExportSummary> {
        ctx.println(&format!("Simulation Name:{}", ctx.presentation_name()));

        let mut out = BufWriter::new(File::create(path)?);
        writeln!(out, "{HEADER}")?;

        let mut report_rows = 0;
        for report in ctx.reports() {
            let value = format_real(report.value);
            ctx.println(&format!("Field Location :{}", report.name));
            ctx.println(&format!(" Field Value :{value}"));
            ctx.println(&format!(" Field Units :{}", report.unit));
            ctx.println("");

            writeln!(out, "{}", render_row(&ExportRecord::from_report(report)))?;
            report_rows += 1;
        }

        let mut monitor_rows = 0;
        for record in ctx.monitors().iter().filter_map(ExportRecord::from_monitor) {
            writeln!(out, "{}", render_row(&record))?;
            monitor_rows += 1;
        }

        out.flush()?;
        tracing::debug!(
            path = %path.display(),
            report_rows,
            monitor_rows,
            "report table written"
        );

        Ok(ExportSummary {
            path: path.to_path_buf(),
            report_rows,
            monitor_rows,
        })
    }
}

/// Render one table row without its line terminator.
///
/// Monitor rows carry no unit and end with the bare separator.
pub fn render_row(record: &ExportRecord<'_>) -> String {
    let value = format_real(record.value);
    match record.unit {
        Some(unit) => format!("{}, {}, {}", record.name, value, unit),
        None => format!("{}, {}, ", record.name, value),
    }
}
