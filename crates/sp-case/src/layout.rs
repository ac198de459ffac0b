//! File locations inside one case directory.

use std::path::{Path, PathBuf};

use sp_report::RESULTS_FILE_NAME;

use crate::parameter_macro::PARAMETER_MACRO_CLASS;
use crate::{CaseResult, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseLayout {
    pub case_name: String,
    pub case_dir: PathBuf,
    pub sim_file: PathBuf,
    pub parameter_macro: PathBuf,
    pub results_file: PathBuf,
    pub stdout_log: PathBuf,
    pub stderr_log: PathBuf,
}

impl CaseLayout {
    pub fn new(data_dir: &Path, case_name: &str) -> CaseResult<Self> {
        if case_name.is_empty()
            || case_name == "."
            || case_name == ".."
            || case_name.contains(['/', '\\'])
        {
            return Err(ValidationError::InvalidValue {
                field: "case_name".to_string(),
                value: case_name.to_string(),
                reason: "must be a single directory name".to_string(),
            }
            .into());
        }

        let case_dir = data_dir.join(case_name);
        Ok(Self {
            case_name: case_name.to_string(),
            sim_file: case_dir.join(format!("{case_name}.sim")),
            parameter_macro: case_dir.join(format!("{PARAMETER_MACRO_CLASS}.java")),
            results_file: case_dir.join(RESULTS_FILE_NAME),
            stdout_log: case_dir.join("CFD_out.txt"),
            stderr_log: case_dir.join("CFD_err.txt"),
            case_dir,
        })
    }
}
