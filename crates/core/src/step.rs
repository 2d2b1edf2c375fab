/// A trait for states that can be advanced using their derivative.
///
/// Implementing this trait lets generic ODE solvers advance the type without
/// knowing its internals. The implementor owns the update rule, so a
/// second-order state can apply a velocity-first (symplectic) update while a
/// plain scalar applies `value + derivative * delta`.
///
/// `Delta` is the independent variable, usually a time step in seconds.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a `StepIntegrable` type.
///
/// This is a convenience for accessing the [`StepIntegrable::Derivative`]
/// associated type without writing out the fully qualified syntax.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;
