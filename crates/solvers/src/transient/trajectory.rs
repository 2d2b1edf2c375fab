use levitas_core::{Model, OdeProblem, Snapshot};

use super::euler::{self, Error};

/// A lazy, unbounded Euler integration.
///
/// Yields the initial snapshot first, then one snapshot per step, for as long
/// as the caller keeps pulling. Each step is the same update
/// [`euler::solve`] performs. After a model or problem error the iterator is
/// fused and returns `None`. Errors carry the step number, counted from the
/// most recent start or [`Trajectory::reset`].
///
/// ```
/// use levitas_maglev::{Levitation, Maglev, State};
/// use levitas_solvers::transient::Trajectory;
///
/// let model = Maglev::default();
/// let mut trajectory = Trajectory::new(&model, &Levitation, State::new(0.025, 0.0), 1e-3);
///
/// let gaps: Vec<f64> = trajectory
///     .by_ref()
///     .take(10)
///     .map(|snapshot| snapshot.map(|s| s.input.position))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(gaps.len(), 10);
///
/// trajectory.reset(State::new(0.015, 0.0));
/// # Ok::<(), levitas_solvers::transient::euler::Error>(())
/// ```
pub struct Trajectory<'a, M, P>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
{
    model: &'a M,
    problem: &'a P,
    initial: M::Input,
    dt: P::Delta,
    step: usize,
    cursor: Cursor<M::Input, M::Output>,
}

enum Cursor<I, O> {
    Start,
    At(Snapshot<I, O>),
    Failed,
}

impl<'a, M, P> Trajectory<'a, M, P>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
{
    /// Creates a trajectory that starts at `initial` and steps by `dt`.
    pub fn new(model: &'a M, problem: &'a P, initial: M::Input, dt: P::Delta) -> Self {
        Self {
            model,
            problem,
            initial,
            dt,
            step: 0,
            cursor: Cursor::Start,
        }
    }

    /// Restarts the trajectory from a new initial input.
    ///
    /// The next item is the snapshot at `initial`.
    pub fn reset(&mut self, initial: M::Input) {
        self.initial = initial;
        self.step = 0;
        self.cursor = Cursor::Start;
    }

    fn settle(
        &mut self,
        result: Result<Snapshot<M::Input, M::Output>, Error>,
    ) -> Result<Snapshot<M::Input, M::Output>, Error> {
        match &result {
            Ok(snapshot) => self.cursor = Cursor::At(snapshot.clone()),
            Err(err) => {
                log::debug!("trajectory: stopping after error: {err}");
                self.cursor = Cursor::Failed;
            }
        }
        result
    }
}

impl<M, P> Iterator for Trajectory<'_, M, P>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
{
    type Item = Result<Snapshot<M::Input, M::Output>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = match &self.cursor {
            Cursor::Failed => return None,
            Cursor::Start => self
                .model
                .call(&self.initial)
                .map(|output| Snapshot::new(self.initial.clone(), output))
                .map_err(Error::model(0)),
            Cursor::At(current) => {
                self.step += 1;
                euler::advance(self.model, self.problem, current, &self.dt, self.step)
            }
        };
        Some(self.settle(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use levitas_core::{DerivativeOf, StepIntegrable};
    use levitas_maglev::{Levitation, Maglev, State};

    #[test]
    fn matches_solver_history() {
        let model = Maglev::default();
        let initial = State::new(0.025, 0.0);

        let solution =
            euler::solve_unobserved(&model, &Levitation, initial, 1e-3, 30).expect("should solve");
        let lazy: Vec<_> = Trajectory::new(&model, &Levitation, initial, 1e-3)
            .take(31)
            .collect::<Result<_, _>>()
            .expect("should step");

        assert_eq!(lazy, solution.history);
    }

    #[test]
    fn reset_restarts_from_new_initial() {
        let model = Maglev::default();
        let mut trajectory = Trajectory::new(&model, &Levitation, State::new(0.025, 0.0), 1e-3);

        let _ = trajectory.nth(10);
        let restart = State::new(0.012, 0.3);
        trajectory.reset(restart);

        let first = trajectory.next().unwrap().unwrap();
        let second = trajectory.next().unwrap().unwrap();
        assert_eq!(first.input, restart);
        assert_eq!(second.input, model.step(restart, 1e-3));
    }

    // --- A model that fails below a minimum gap, to exercise fusing ---

    #[derive(Debug, thiserror::Error)]
    #[error("gap {0} below minimum")]
    struct GapTooSmall(f64);

    /// Constant-speed approach toward the magnet that refuses small gaps.
    struct Approach;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Gap(f64);

    impl StepIntegrable<f64> for Gap {
        type Derivative = f64;

        fn step(&self, rate: f64, dt: f64) -> Self {
            Gap(self.0 + rate * dt)
        }
    }

    impl Model for Approach {
        type Input = Gap;
        type Output = f64;
        type Error = GapTooSmall;

        fn call(&self, gap: &Gap) -> Result<f64, GapTooSmall> {
            if gap.0 < 0.001 {
                return Err(GapTooSmall(gap.0));
            }
            Ok(-0.01)
        }
    }

    struct ApproachProblem;

    impl OdeProblem for ApproachProblem {
        type Input = Gap;
        type Output = f64;
        type Delta = f64;
        type State = Gap;
        type Error = Infallible;

        fn state(&self, input: &Gap) -> Result<Gap, Self::Error> {
            Ok(*input)
        }

        fn derivative(
            &self,
            _input: &Gap,
            rate: &f64,
        ) -> Result<DerivativeOf<Gap, f64>, Self::Error> {
            Ok(*rate)
        }

        fn build_input(&self, _base: &Gap, state: &Gap, _dt: &f64) -> Result<Gap, Self::Error> {
            Ok(*state)
        }
    }

    #[test]
    fn fuses_after_model_error() {
        let mut trajectory = Trajectory::new(&Approach, &ApproachProblem, Gap(0.02), 0.5);

        let results: Vec<_> = trajectory.by_ref().take(10).collect();

        // 0.02, 0.015, 0.01, 0.005 succeed; ~0.0 fails.
        assert_eq!(results.len(), 5);
        assert!(results[..4].iter().all(Result::is_ok));
        assert!(matches!(results[4], Err(Error::Model { step: 4, .. })));
        assert!(trajectory.next().is_none());
    }

    #[test]
    fn solver_reports_failing_step() {
        let err = euler::solve_unobserved(&Approach, &ApproachProblem, Gap(0.02), 0.5, 10)
            .expect_err("gap should close");

        assert_eq!(err.step(), 4);
        assert!(err.to_string().starts_with("model failed at step 4:"));
    }

    #[test]
    fn step_count_restarts_after_reset() {
        let mut trajectory = Trajectory::new(&Approach, &ApproachProblem, Gap(0.02), 0.5);
        let _ = trajectory.nth(2);

        trajectory.reset(Gap(0.01));
        let err = trajectory
            .find_map(Result::err)
            .expect("gap should close after reset");

        // 0.01, 0.005 succeed; ~0.0 fails on the second advance.
        assert_eq!(err.step(), 2);
    }

    #[test]
    fn initial_failure_is_step_zero() {
        let mut trajectory = Trajectory::new(&Approach, &ApproachProblem, Gap(0.0), 0.5);

        let err = trajectory.next().unwrap().unwrap_err();
        assert_eq!(err.step(), 0);
        assert!(trajectory.next().is_none());
    }
}
