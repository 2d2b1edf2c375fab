//! Solvers for Levitas models.
//!
//! - [`transient::euler`]: fixed-step integration of an [`OdeProblem`] with
//!   full history and observer control
//! - [`transient::Trajectory`]: the same integration as a lazy, restartable
//!   iterator
//!
//! [`OdeProblem`]: levitas_core::OdeProblem

pub mod transient;
