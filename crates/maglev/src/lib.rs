//! A single-axis electromagnetic levitation model.
//!
//! A ferromagnetic object hangs below an electromagnet. A PD controller sets
//! the coil current from the object's gap and velocity, an inverse-square law
//! turns current into magnetic pull, and a velocity-first Euler update
//! advances the state by one step.
//!
//! The physics lives in three pure functions that take an explicit
//! [`Parameters`] value:
//!
//! - [`force`]: `k * i² / x²`
//! - [`control`]: `Kp * (x_ref - x) - Kd * x_dot`
//! - [`step`]: one full update of [`State`]
//!
//! [`Maglev`] binds a parameter set once and implements [`Model`], and
//! [`Levitation`] adapts it to the generic [`OdeProblem`] solvers.
//!
//! # Numerical faults
//!
//! None of these functions validate their inputs. A gap at or below zero, or
//! a step size outside the scheme's stability region, shows up as `inf` or
//! `NaN` in the returned state. Use [`State::is_finite`] to detect it.
//!
//! [`Model`]: levitas_core::Model
//! [`OdeProblem`]: levitas_core::OdeProblem

mod config;
mod control;
mod dynamics;
mod force;
mod parameters;
mod problem;
mod state;

pub use config::{ConfigError, SimulationConfig};
pub use control::control;
pub use dynamics::{Evaluation, Maglev, evaluate, step};
pub use force::force;
pub use parameters::{DerivativeGain, ForceConstant, Parameters, ProportionalGain};
pub use problem::Levitation;
pub use state::State;
