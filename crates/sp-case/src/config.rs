//! Case configuration file.

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sp_core::{Real, ensure_finite};
use sp_report::MetricNames;

use crate::{CaseError, CaseResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseConfig {
    /// Host executable, looked up on `PATH` when not absolute.
    pub solver_executable: String,
    /// Simulation file copied into every case directory.
    pub base_case_file: String,
    #[serde(default = "default_n_cpus")]
    pub n_cpus: u32,
    pub macros: MacroSet,
    /// Global parameters pushed into the simulation, in order.
    #[serde(default)]
    pub parameters: Vec<GlobalParameter>,
    #[serde(default)]
    pub metrics: MetricNames,
}

fn default_n_cpus() -> u32 {
    2
}

/// Macro files run after the parameter update, relative to the reference
/// directory unless absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,
    pub replace_geometry: String,
    pub run: String,
    pub post: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalParameter {
    pub name: String,
    pub value: Real,
}

impl GlobalParameter {
    pub fn new(name: impl Into<String>, value: Real) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl FromStr for GlobalParameter {
    type Err = CaseError;

    /// Parse a `NAME=VALUE` override.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| CaseError::InvalidOverride(s.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CaseError::InvalidOverride(s.to_string()));
        }
        let value = value
            .trim()
            .parse::<Real>()
            .map_err(|_| CaseError::InvalidOverride(s.to_string()))?;
        Ok(Self::new(name, value))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Missing value: {field}")]
    Empty { field: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate parameter: {name}")]
    DuplicateParameter { name: String },
}

impl CaseConfig {
    pub fn load(path: &Path) -> CaseResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CaseError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: CaseConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CaseResult<()> {
        let required = [
            ("solver_executable", &self.solver_executable),
            ("base_case_file", &self.base_case_file),
            ("macros.replace_geometry", &self.macros.replace_geometry),
            ("macros.run", &self.macros.run),
            ("macros.post", &self.macros.post),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::Empty {
                    field: field.to_string(),
                }
                .into());
            }
        }

        if self.n_cpus == 0 {
            return Err(ValidationError::InvalidValue {
                field: "n_cpus".to_string(),
                value: "0".to_string(),
                reason: "at least one CPU is required".to_string(),
            }
            .into());
        }

        validate_parameters(&self.parameters)
    }

    /// Parameters with `overrides` applied: matching names are replaced in
    /// place, new names are appended.
    pub fn merged_parameters(&self, overrides: &[GlobalParameter]) -> Vec<GlobalParameter> {
        let mut merged = self.parameters.clone();
        for o in overrides {
            match merged.iter_mut().find(|p| p.name == o.name) {
                Some(existing) => existing.value = o.value,
                None => merged.push(o.clone()),
            }
        }
        merged
    }
}

pub(crate) fn validate_parameters(parameters: &[GlobalParameter]) -> CaseResult<()> {
    let mut seen = HashSet::new();
    for p in parameters {
        if p.name.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "parameters.name".to_string(),
            }
            .into());
        }
        if p.name.contains(['"', '\\', '\n', '\r']) {
            return Err(ValidationError::InvalidValue {
                field: "parameters.name".to_string(),
                value: p.name.clone(),
                reason: "quotes, backslashes and line breaks are not allowed".to_string(),
            }
            .into());
        }
        if !seen.insert(p.name.as_str()) {
            return Err(ValidationError::DuplicateParameter {
                name: p.name.clone(),
            }
            .into());
        }
        ensure_finite(p.value, &p.name)?;
    }
    Ok(())
}
