//! Core traits for the Levitas workspace.
//!
//! This crate defines the small set of abstractions that the maglev model,
//! the transient solver, and the observers share:
//!
//! - [`Model`]: a deterministic callable mapping a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`StepIntegrable`]: a state that knows how to advance itself by a step
//! - [`OdeProblem`]: adapts a model's input and output to an integrable state

mod model;
mod observer;
mod ode;
mod step;

pub use model::{Model, Snapshot};
pub use observer::Observer;
pub use ode::OdeProblem;
pub use step::{DerivativeOf, StepIntegrable};
