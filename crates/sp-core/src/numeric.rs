use crate::CoreError;

/// Floating point type used for every report, monitor sample and parameter.
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite {
            what: what.to_string(),
            value: v,
        })
    }
}

/// Render a value the way it appears in exported tables and generated macros.
///
/// Uses the shortest representation that parses back to the same bits, and
/// always keeps a decimal point or exponent (`1.0`, `12.5`, `1e-7`).
pub fn format_real(v: Real) -> String {
    format!("{v:?}")
}
