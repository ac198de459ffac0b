//! Quantities derived from a read-back results table.

use serde::{Deserialize, Serialize};
use sp_core::{Real, ensure_finite};

use crate::table::{ResultEntry, ResultValue, ResultsTable};

/// Result names the derived metrics read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricNames {
    pub inlet_uniformity: String,
    pub inlet_total_pressure: String,
    pub hex_inlet_total_pressure: String,
    pub hex_outlet_total_pressure: String,
    pub outlet_total_pressure: String,
    pub residuals: Vec<String>,
}

impl Default for MetricNames {
    fn default() -> Self {
        Self {
            inlet_uniformity: "HEX_inlet_velocity_uniformity".to_string(),
            inlet_total_pressure: "inlet_total_pressure_mca".to_string(),
            hex_inlet_total_pressure: "HEX_inlet_total_pressure_mca".to_string(),
            hex_outlet_total_pressure: "HEX_outlet_total_pressure_mca".to_string(),
            outlet_total_pressure: "outlet_total_pressure_mca".to_string(),
            residuals: ["Continuity", "X-momentum", "Y-momentum", "Energy", "Tke", "Sdr"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedMetrics {
    /// `1 - uniformity` of the velocity at the heat exchanger inlet.
    pub hex_inlet_perturb_factor: Option<Real>,
    /// Total-pressure loss of the duct sections around the heat exchanger,
    /// relative to the inlet total pressure.
    pub duct_pressure_loss: Option<Real>,
    /// Inlet-to-outlet total-pressure loss relative to the inlet.
    pub overall_duct_pressure_loss: Option<Real>,
    pub max_ave_residual: Option<Real>,
}

impl DerivedMetrics {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Real)> + '_ {
        [
            ("hexInletPerturbFactor", self.hex_inlet_perturb_factor),
            ("ductPressureLoss", self.duct_pressure_loss),
            ("overallDuctPressureLoss", self.overall_duct_pressure_loss),
            ("maxAveResidual", self.max_ave_residual),
        ]
        .into_iter()
        .filter_map(|(name, v)| v.map(|v| (name, v)))
    }

    /// Append every available metric as a unit-less entry.
    pub fn append_to(&self, table: &mut ResultsTable) {
        for (name, value) in self.iter() {
            table.push(ResultEntry {
                name: name.to_string(),
                value: ResultValue::Number(value),
                unit: String::new(),
            });
        }
    }
}

pub fn derive_metrics(table: &ResultsTable, names: &MetricNames) -> DerivedMetrics {
    let lookup = |name: &str| {
        let v = table.number(name);
        if v.is_none() {
            tracing::warn!(result = name, "result missing or not numeric");
        }
        v
    };

    let uniformity = lookup(&names.inlet_uniformity);
    let p_in = lookup(&names.inlet_total_pressure);
    let p_hex_in = lookup(&names.hex_inlet_total_pressure);
    let p_hex_out = lookup(&names.hex_outlet_total_pressure);
    let p_out = lookup(&names.outlet_total_pressure);

    let hex_inlet_perturb_factor =
        uniformity.and_then(|u| finite_or_skip(1.0 - u, "hexInletPerturbFactor"));

    let duct_pressure_loss = match (p_in, p_hex_in, p_hex_out, p_out) {
        (Some(p_in), Some(p_hex_in), Some(p_hex_out), Some(p_out)) => {
            finite_or_skip(((p_in - p_hex_in) + (p_hex_out - p_out)) / p_in, "ductPressureLoss")
        }
        _ => None,
    };

    let overall_duct_pressure_loss = match (p_in, p_out) {
        (Some(p_in), Some(p_out)) => {
            finite_or_skip((p_in - p_out) / p_in, "overallDuctPressureLoss")
        }
        _ => None,
    };

    let max_ave_residual = max_residual(table, &names.residuals);

    DerivedMetrics {
        hex_inlet_perturb_factor,
        duct_pressure_loss,
        overall_duct_pressure_loss,
        max_ave_residual,
    }
}

/// Largest of the residuals present in `table`.
///
/// A single non-finite residual drops the metric: a diverged run must not
/// report the maximum of its remaining residuals.
fn max_residual(table: &ResultsTable, residuals: &[String]) -> Option<Real> {
    let mut max: Option<Real> = None;
    for name in residuals {
        let Some(v) = table.number(name) else {
            continue;
        };
        if !v.is_finite() {
            tracing::warn!(residual = %name, value = v, "derived metric dropped: non-finite residual");
            return None;
        }
        max = Some(max.map_or(v, |m| m.max(v)));
    }

    if max.is_none() {
        tracing::warn!(residuals = ?residuals, "no residual results found");
    }
    max
}

fn finite_or_skip(v: Real, what: &str) -> Option<Real> {
    match ensure_finite(v, what) {
        Ok(v) => Some(v),
        Err(err) => {
            tracing::warn!(error = %err, "derived metric dropped");
            None
        }
    }
}
