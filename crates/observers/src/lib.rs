//! Reusable observers for Levitas simulations.
//!
//! - [`traits`]: capability traits that let observers work across solvers
//!   ([`HasState`], [`CanStopEarly`])
//! - [`DivergenceGuard`]: stops a run once the state blows up or the gap closes
//! - [`SettleDetector`]: stops a run once the object has come to rest
//!
//! [`HasState`]: traits::HasState
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod divergence;
mod settle;

pub use divergence::{Divergence, DivergenceGuard, DivergenceKind};
pub use settle::SettleDetector;
