use levitas_core::Observer;
use levitas_maglev::State;

use crate::traits::{CanStopEarly, HasState};

/// Why a [`DivergenceGuard`] tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivergenceKind {
    /// Position or velocity is infinite or `NaN`.
    NonFinite,
    /// The gap reached zero or went negative, where the force law is singular.
    GapClosed,
}

/// The first diverged event a [`DivergenceGuard`] saw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divergence {
    pub step: usize,
    pub state: State,
    pub kind: DivergenceKind,
}

/// Stops a run the first time its state leaves the physical domain.
///
/// The model never defends against a closed gap or a numerical blow-up; it
/// just returns `inf`/`NaN`. This observer turns that into an early stop and
/// remembers where it happened.
///
/// Pass `&mut guard` to the solver to inspect [`DivergenceGuard::divergence`]
/// afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct DivergenceGuard {
    divergence: Option<Divergence>,
}

impl DivergenceGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first divergence observed, if any.
    #[must_use]
    pub fn divergence(&self) -> Option<Divergence> {
        self.divergence
    }

    fn classify(state: &State) -> Option<DivergenceKind> {
        if !state.is_finite() {
            Some(DivergenceKind::NonFinite)
        } else if state.position <= 0.0 {
            Some(DivergenceKind::GapClosed)
        } else {
            None
        }
    }
}

impl<E: HasState, A: CanStopEarly> Observer<E, A> for DivergenceGuard {
    fn observe(&mut self, event: &E) -> Option<A> {
        if self.divergence.is_some() {
            return Some(A::stop_early());
        }

        let state = event.state();
        let kind = Self::classify(&state)?;
        log::warn!(
            "divergence at step {}: {kind:?} (x = {}, x_dot = {})",
            event.step(),
            state.position,
            state.velocity,
        );
        self.divergence = Some(Divergence {
            step: event.step(),
            state,
            kind,
        });
        Some(A::stop_early())
    }
}

/// Allows `&mut DivergenceGuard` to be passed to solvers that take an observer
/// by value.
impl<E: HasState, A: CanStopEarly> Observer<E, A> for &mut DivergenceGuard {
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}
