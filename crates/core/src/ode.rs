use crate::{DerivativeOf, StepIntegrable};

/// Describes how a solver moves a [`Model`] forward in time.
///
/// A solver never looks inside the model input. It asks the problem for the
/// integrable part of the input ([`OdeProblem::state`]), for that part's
/// derivative given the model output ([`OdeProblem::derivative`]), and for a
/// new input once the state has been stepped ([`OdeProblem::build_input`]).
/// The stepping itself belongs to [`StepIntegrable`], so the state type
/// decides the update rule.
///
/// [`Model`]: crate::Model
pub trait OdeProblem {
    type Input;
    type Output;
    type Delta;
    type State: StepIntegrable<Self::Delta>;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Extracts the state from model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state cannot be extracted from the input.
    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error>;

    /// Computes the derivative of the state from model input and output.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be computed.
    fn derivative(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error>;

    /// Builds model input from a stepped state.
    ///
    /// `base` is the input the step started from, for problems whose input
    /// carries more than the integrated state.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from the state.
    fn build_input(
        &self,
        base: &Self::Input,
        state: &Self::State,
        delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error>;
}
