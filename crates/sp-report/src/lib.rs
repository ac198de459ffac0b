//! sp-report: report export, results read-back and derived metrics.

pub mod context;
pub mod export;
pub mod metrics;
pub mod model;
pub mod snapshot;
pub mod table;

pub use context::SimulationContext;
pub use export::{ExportSummary, HEADER, RESULTS_FILE_NAME, ReportExporter};
pub use metrics::{DerivedMetrics, MetricNames, derive_metrics};
pub use model::*;
pub use snapshot::SimulationSnapshot;
pub use table::{ResultEntry, ResultValue, ResultsTable, parse_results, read_results};

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed results row at line {line}: expected 2 or 3 fields, found {fields}")]
    MalformedRow { line: usize, fields: usize },

    #[error("Unsupported snapshot format: {path}")]
    UnsupportedSnapshot { path: String },
}
