use std::convert::Infallible;

use levitas_core::{Model, StepIntegrable};

use crate::{Parameters, State, control, force};

/// Intermediate quantities of one dynamics evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// PD correction `u` before the current floor is applied (A).
    pub control: f64,
    /// Coil current `max(i0 + u, 0)` (A).
    pub current: f64,
    /// Magnetic pull `Fm` (N).
    pub force: f64,
    /// Net acceleration `Fm / m - g` (m/s²).
    pub acceleration: f64,
}

/// Evaluates controller, current floor, force law, and net acceleration for
/// a state.
///
/// The sign convention is literal: magnetic pull enters positive and gravity
/// is subtracted, with `x` measured as the gap below the magnet.
#[must_use]
pub fn evaluate(parameters: &Parameters, state: State) -> Evaluation {
    let State { position, velocity } = state;

    let control = control(parameters, position, velocity);
    let current = parameters.nominal_current + control;
    // NaN passes through unclamped.
    let current = if current < 0.0 { 0.0 } else { current };

    let force = force(parameters, position, current);
    let acceleration = force / parameters.mass - parameters.gravity;

    Evaluation {
        control,
        current,
        force,
        acceleration,
    }
}

/// Advances `state` by one step of size `dt`.
///
/// The acceleration from [`evaluate`] drives a velocity-first Euler update
/// (see [`State`]'s [`StepIntegrable`] impl). A gap at or below zero, or a
/// `dt` too large for the scheme, produces `inf`/`NaN` in the returned state.
#[must_use]
pub fn step(parameters: &Parameters, state: State, dt: f64) -> State {
    state.step(evaluate(parameters, state).acceleration, dt)
}

/// A levitation rig with its parameters bound once.
///
/// `Maglev` holds no mutable state. Every method is a pure function of the
/// bound [`Parameters`] and its arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Maglev {
    parameters: Parameters,
}

impl Maglev {
    /// Binds a parameter set.
    #[must_use]
    pub fn new(parameters: Parameters) -> Self {
        Self { parameters }
    }

    /// Returns the bound parameters.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// See [`force`](crate::force).
    #[must_use]
    pub fn force(&self, gap: f64, current: f64) -> f64 {
        force(&self.parameters, gap, current)
    }

    /// See [`control`](crate::control).
    #[must_use]
    pub fn control(&self, position: f64, velocity: f64) -> f64 {
        control(&self.parameters, position, velocity)
    }

    /// See [`evaluate`].
    #[must_use]
    pub fn evaluate(&self, state: State) -> Evaluation {
        evaluate(&self.parameters, state)
    }

    /// See [`step`].
    #[must_use]
    pub fn step(&self, state: State, dt: f64) -> State {
        step(&self.parameters, state, dt)
    }

    /// Gap at which magnetic pull balances gravity with the object at rest.
    ///
    /// Solves `k * i² / x² = m * g` with `i = i0 + Kp * (x_ref - x)`. Without
    /// an integral term this generally differs from the reference height.
    /// Returns `None` when no positive gap with positive current exists.
    #[must_use]
    pub fn equilibrium_gap(&self) -> Option<f64> {
        let p = &self.parameters;
        let stiffness = (p.mass * p.gravity / p.force_constant).sqrt();
        let gap = (p.nominal_current + p.proportional_gain * p.reference_height)
            / (stiffness + p.proportional_gain);

        let current = p.nominal_current + p.proportional_gain * (p.reference_height - gap);
        (gap.is_finite() && gap > 0.0 && current > 0.0).then_some(gap)
    }

    /// Returns the unbounded sequence of states starting at `initial`.
    ///
    /// The first item is `initial` itself. Calling this again with the same
    /// arguments restarts the sequence.
    pub fn trajectory(self, initial: State, dt: f64) -> impl Iterator<Item = State> {
        std::iter::successors(Some(initial), move |state| Some(self.step(*state, dt)))
    }
}

impl Model for Maglev {
    type Input = State;
    type Output = Evaluation;
    type Error = Infallible;

    fn call(&self, input: &State) -> Result<Evaluation, Self::Error> {
        Ok(self.evaluate(*input))
    }
}
