//! Host data as seen by the exporter.

use serde::{Deserialize, Serialize};
use sp_core::Real;

/// A named, unit-tagged scalar result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub name: String,
    pub value: Real,
    #[serde(default)]
    pub unit: String,
}

impl Report {
    pub fn new(name: impl Into<String>, value: Real, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
        }
    }
}

/// Kind tag for a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorKind {
    /// Solver convergence residual history.
    Residual,
    /// Monitor tracking a report value over iterations.
    Report,
    Iteration,
    Other,
}

/// A named time series recorded during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monitor {
    pub name: String,
    pub kind: MonitorKind,
    #[serde(default)]
    pub values: Vec<Real>,
}

impl Monitor {
    pub fn new(name: impl Into<String>, kind: MonitorKind, values: Vec<Real>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    pub fn residual(name: impl Into<String>, values: Vec<Real>) -> Self {
        Self::new(name, MonitorKind::Residual, values)
    }

    pub fn is_residual(&self) -> bool {
        self.kind == MonitorKind::Residual
    }

    /// Most recent recorded value, if any.
    pub fn last_value(&self) -> Option<Real> {
        self.values.last().copied()
    }
}

/// One row of the exported table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRecord<'a> {
    pub name: &'a str,
    pub value: Real,
    pub unit: Option<&'a str>,
}

impl<'a> ExportRecord<'a> {
    pub fn from_report(report: &'a Report) -> Self {
        Self {
            name: &report.name,
            value: report.value,
            unit: Some(&report.unit),
        }
    }

    /// Residual monitors with an empty history have no record.
    pub fn from_monitor(monitor: &'a Monitor) -> Option<Self> {
        if !monitor.is_residual() {
            return None;
        }
        monitor.last_value().map(|value| Self {
            name: &monitor.name,
            value,
            unit: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_non_empty_residuals_yield_records() {
        let residual = Monitor::residual("Continuity", vec![1.0, 0.5]);
        let empty = Monitor::residual("Energy", vec![]);
        let plot = Monitor::new("Drag Monitor", MonitorKind::Report, vec![3.0]);

        let record = ExportRecord::from_monitor(&residual).unwrap();
        assert_eq!(record.name, "Continuity");
        assert_eq!(record.value, 0.5);
        assert_eq!(record.unit, None);

        assert!(ExportRecord::from_monitor(&empty).is_none());
        assert!(ExportRecord::from_monitor(&plot).is_none());
    }

    #[test]
    fn monitor_kind_serializes_snake_case() {
        let yaml = serde_yaml::to_string(&MonitorKind::Residual).unwrap();
        assert_eq!(yaml.trim(), "residual");
    }
}
