//! sp-case: prepare, launch and post-process one simulation case.

pub mod command;
pub mod config;
pub mod layout;
pub mod parameter_macro;
pub mod runner;

pub use command::{BatchCommand, Platform};
pub use config::{CaseConfig, GlobalParameter, MacroSet, ValidationError};
pub use layout::CaseLayout;
pub use parameter_macro::{PARAMETER_MACRO_CLASS, render_parameter_macro};
pub use runner::{CaseOutcome, PreparedCase, post_process, prepare_case, run_case};

use std::path::PathBuf;

pub type CaseResult<T> = Result<T, CaseError>;

#[derive(thiserror::Error, Debug)]
pub enum CaseError {
    #[error("Failed to read case config: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse case config: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Case config validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid parameter override '{0}': expected NAME=VALUE")]
    InvalidOverride(String),

    #[error("Solver exited unsuccessfully (code {code:?}), see {stderr_log}")]
    SolverFailed { code: Option<i32>, stderr_log: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] sp_core::CoreError),

    #[error("Results error: {0}")]
    Report(#[from] sp_report::ReportError),
}
