//! Shared fixtures for the end-to-end tests.

use levitas_maglev::{Maglev, SimulationConfig, State};

/// A heavier object on a stiffer loop, written the way a user would.
pub const HEAVY_RIG: &str = r"
dt = 0.0005
steps = 4000

[parameters]
mass = 0.08
nominal_current = 2.0
proportional_gain = 150.0
derivative_gain = 10.0

[initial]
position = 0.018
velocity = 0.0
";

/// Parses [`HEAVY_RIG`], panicking on failure.
#[must_use]
pub fn heavy_rig() -> SimulationConfig {
    SimulationConfig::from_toml_str(HEAVY_RIG).expect("fixture should parse")
}

/// Steps `model` directly, without any solver, and returns the final state.
#[must_use]
pub fn step_directly(model: &Maglev, initial: State, dt: f64, steps: usize) -> State {
    (0..steps).fold(initial, |state, _| model.step(state, dt))
}
