use levitas_core::StepIntegrable;
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{Length, Velocity},
    length::meter,
    velocity::meter_per_second,
};

/// The levitated object's dynamic state.
///
/// `position` is the gap `x` below the magnet and `velocity` is its rate of
/// change `x_dot`. A state is a plain value: each step produces a new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct State {
    /// Gap below the magnet (m).
    pub position: f64,
    /// Rate of change of the gap (m/s). Zero when omitted from config.
    #[serde(default)]
    pub velocity: f64,
}

impl State {
    /// Creates a state from SI values (m and m/s).
    #[must_use]
    pub fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }

    /// Creates a state from `uom` quantities.
    #[must_use]
    pub fn from_quantities(position: Length, velocity: Velocity) -> Self {
        Self::new(position.get::<meter>(), velocity.get::<meter_per_second>())
    }

    /// Gap as a `uom::Length`.
    #[must_use]
    pub fn gap(&self) -> Length {
        Length::new::<meter>(self.position)
    }

    /// Velocity as a `uom::Velocity`.
    #[must_use]
    pub fn speed(&self) -> Velocity {
        Velocity::new::<meter_per_second>(self.velocity)
    }

    /// Returns `true` if neither component is infinite or `NaN`.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Semi-implicit (symplectic) Euler update driven by acceleration.
///
/// Velocity is advanced first and the updated velocity advances position:
///
/// ```text
/// x_dot' = x_dot + x_ddot * dt
/// x'     = x + x_dot' * dt
/// ```
impl StepIntegrable<f64> for State {
    type Derivative = f64;

    fn step(&self, acceleration: f64, dt: f64) -> Self {
        let velocity = self.velocity + acceleration * dt;
        let position = self.position + velocity * dt;
        Self { position, velocity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::length::millimeter;

    #[test]
    fn position_uses_updated_velocity() {
        let state = State::new(0.02, 0.1);

        let next = state.step(-9.565, 0.01);

        assert_relative_eq!(next.velocity, 0.00435, max_relative = 1e-9);
        assert_relative_eq!(next.position, 0.02 + 0.00435 * 0.01, max_relative = 1e-12);
        assert!((next.position - (0.02 + 0.1 * 0.01)).abs() > 1e-4);
    }

    #[test]
    fn zero_step_is_identity() {
        let state = State::new(0.03, -0.2);
        assert_eq!(state.step(123.0, 0.0), state);
    }

    #[test]
    fn quantities_convert_to_si() {
        let state = State::from_quantities(
            Length::new::<millimeter>(20.0),
            Velocity::new::<meter_per_second>(-0.5),
        );

        assert_relative_eq!(state.position, 0.02);
        assert_relative_eq!(state.velocity, -0.5);
        assert_relative_eq!(state.gap().get::<millimeter>(), 20.0);
        assert_relative_eq!(state.speed().get::<meter_per_second>(), -0.5);
    }

    #[test]
    fn detects_non_finite_components() {
        assert!(State::new(0.02, 0.0).is_finite());
        assert!(!State::new(f64::INFINITY, 0.0).is_finite());
        assert!(!State::new(0.02, f64::NAN).is_finite());
    }

    #[test]
    fn velocity_defaults_to_rest_when_deserialized() {
        let state: State = toml::from_str("position = 0.03").unwrap();
        assert_eq!(state, State::new(0.03, 0.0));

        assert!(toml::from_str::<State>("velocity = 0.1").is_err());
    }
}
