use crate::Parameters;

/// Magnetic pull on the object for a given gap and coil current.
///
/// Computes `k * i² / x²`. The law is undefined at `x = 0`: a zero gap
/// yields `inf` (or `NaN` when the current is also zero) and is returned
/// as-is.
#[must_use]
pub fn force(parameters: &Parameters, gap: f64, current: f64) -> f64 {
    parameters.force_constant * current.powi(2) / gap.powi(2)
}
