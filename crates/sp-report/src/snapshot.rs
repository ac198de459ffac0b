//! Serialized stand-in for a live simulation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::context::SimulationContext;
use crate::model::{Monitor, Report};
use crate::{ReportError, ReportResult};

/// Reports and monitors captured from a simulation, loadable from YAML or
/// JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub name: String,
    /// Relative paths resolve against the snapshot file's directory.
    #[serde(default)]
    pub session_dir: PathBuf,
    #[serde(default)]
    pub reports: Vec<Report>,
    #[serde(default)]
    pub monitors: Vec<Monitor>,
}

impl SimulationSnapshot {
    pub fn load(path: &Path) -> ReportResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut snapshot: SimulationSnapshot = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => {
                return Err(ReportError::UnsupportedSnapshot {
                    path: path.display().to_string(),
                });
            }
        };

        if snapshot.session_dir.is_relative()
            && let Some(parent) = path.parent()
        {
            snapshot.session_dir = parent.join(&snapshot.session_dir);
        }

        tracing::debug!(
            name = %snapshot.name,
            reports = snapshot.reports.len(),
            monitors = snapshot.monitors.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }
}

impl SimulationContext for SimulationSnapshot {
    fn presentation_name(&self) -> &str {
        &self.name
    }

    fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    fn reports(&self) -> &[Report] {
        &self.reports
    }

    fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    fn println(&self, line: &str) {
        tracing::info!(target: "simulation", "{line}");
    }
}
