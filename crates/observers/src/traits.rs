//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types so an
//! observer can be written once:
//!
//! ```rust
//! use levitas_core::Observer;
//! use levitas_observers::traits::{CanStopEarly, HasState};
//!
//! /// Stops once the object rises above a ceiling gap.
//! struct Ceiling(f64);
//!
//! impl<E: HasState, A: CanStopEarly> Observer<E, A> for Ceiling {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.state().position > self.0).then(A::stop_early)
//!     }
//! }
//! ```

use levitas_maglev::State;
use levitas_solvers::transient::euler;

/// An event that carries a maglev [`State`].
pub trait HasState {
    /// Index of the event within its run, starting at 0.
    fn step(&self) -> usize;

    /// The state the event was recorded at.
    fn state(&self) -> State;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

impl<O> HasState for euler::Event<State, O> {
    fn step(&self) -> usize {
        self.step
    }

    fn state(&self) -> State {
        self.snapshot.input
    }
}

impl CanStopEarly for euler::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
