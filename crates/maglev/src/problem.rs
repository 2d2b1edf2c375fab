use std::convert::Infallible;

use levitas_core::{DerivativeOf, OdeProblem};

use crate::{Evaluation, State};

/// Adapts [`Maglev`](crate::Maglev) to generic ODE solvers.
///
/// The model input is the [`State`] itself and the derivative handed to the
/// solver is the evaluated acceleration, so each solver step reproduces
/// [`step`](crate::step) exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Levitation;

impl OdeProblem for Levitation {
    type Input = State;
    type Output = Evaluation;
    type Delta = f64;
    type State = State;
    type Error = Infallible;

    fn state(&self, input: &State) -> Result<State, Self::Error> {
        Ok(*input)
    }

    fn derivative(
        &self,
        _input: &State,
        output: &Evaluation,
    ) -> Result<DerivativeOf<State, f64>, Self::Error> {
        Ok(output.acceleration)
    }

    fn build_input(&self, _base: &State, state: &State, _dt: &f64) -> Result<State, Self::Error> {
        Ok(*state)
    }
}
