use levitas_core::Observer;
use levitas_maglev::Maglev;

use crate::traits::{CanStopEarly, HasState};

/// Stops a run once the object has come to rest near a target gap.
///
/// An event counts as settled when `|x - target| <= position_tol` and
/// `|x_dot| <= velocity_tol`. The run stops after `hold` consecutive settled
/// events, and [`SettleDetector::settled_at`] reports the step where that
/// streak began.
///
/// An event at step 0 starts a new run and clears the streak and any earlier
/// result, so one detector can be passed to several solves in turn.
///
/// A PD loop has no integral action, so the rest gap is usually not the
/// reference height. [`SettleDetector::at_equilibrium`] targets the gap where
/// pull balances gravity instead.
#[derive(Debug, Clone, Copy)]
pub struct SettleDetector {
    target: f64,
    position_tol: f64,
    velocity_tol: f64,
    hold: usize,
    streak: usize,
    settled_at: Option<usize>,
}

impl SettleDetector {
    /// Creates a detector for a target gap. A `hold` of zero is treated as one.
    #[must_use]
    pub fn new(target: f64, position_tol: f64, velocity_tol: f64, hold: usize) -> Self {
        Self {
            target,
            position_tol,
            velocity_tol,
            hold: hold.max(1),
            streak: 0,
            settled_at: None,
        }
    }

    /// Creates a detector targeting the model's equilibrium gap.
    ///
    /// Returns `None` if the model has no equilibrium.
    #[must_use]
    pub fn at_equilibrium(
        model: &Maglev,
        position_tol: f64,
        velocity_tol: f64,
        hold: usize,
    ) -> Option<Self> {
        let target = model.equilibrium_gap()?;
        Some(Self::new(target, position_tol, velocity_tol, hold))
    }

    /// The gap this detector settles on.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Step at which the settled streak began, once the detector has fired.
    #[must_use]
    pub fn settled_at(&self) -> Option<usize> {
        self.settled_at
    }
}

impl<E: HasState, A: CanStopEarly> Observer<E, A> for SettleDetector {
    fn observe(&mut self, event: &E) -> Option<A> {
        if event.step() == 0 {
            self.streak = 0;
            self.settled_at = None;
        }

        let state = event.state();
        let at_rest = (state.position - self.target).abs() <= self.position_tol
            && state.velocity.abs() <= self.velocity_tol;

        if !at_rest {
            self.streak = 0;
            return None;
        }

        self.streak += 1;
        if self.streak < self.hold {
            return None;
        }

        let start = (event.step() + 1).saturating_sub(self.streak);
        if self.settled_at.is_none() {
            self.settled_at = Some(start);
        }
        log::debug!("settled within tolerance from step {start}");
        Some(A::stop_early())
    }
}

/// Allows `&mut SettleDetector` to be passed to solvers that take an observer
/// by value.
impl<E: HasState, A: CanStopEarly> Observer<E, A> for &mut SettleDetector {
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}
