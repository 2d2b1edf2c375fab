use crate::Parameters;

/// PD current correction for the given gap and velocity.
///
/// Computes `Kp * (x_ref - x) - Kd * x_dot`. The result is unbounded; the
/// zero floor on coil current is applied by the dynamics, not here.
#[must_use]
pub fn control(parameters: &Parameters, position: f64, velocity: f64) -> f64 {
    let error = parameters.reference_height - position;
    parameters.proportional_gain * error - parameters.derivative_gain * velocity
}
