//! Transient (time-stepping) solvers.

pub mod euler;

mod trajectory;

pub use trajectory::Trajectory;
