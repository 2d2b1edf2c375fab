//! Fixed-step Euler solver for ODE problems.
//!
//! Each step extracts the problem state from the current input, asks the
//! problem for its derivative, and advances the state through
//! [`StepIntegrable::step`]. The state type owns the update rule, so the
//! maglev `State` gets its velocity-first update while a scalar state gets
//! plain forward Euler:
//!
//! ```text
//! state_{n+1} = state_n.step(derivative_n, dt)
//! ```
//!
//! # Example
//!
//! ```
//! use levitas_maglev::{Levitation, Maglev, State};
//! use levitas_solvers::transient::euler;
//!
//! let model = Maglev::default();
//! let solution = euler::solve_unobserved(&model, &Levitation, State::new(0.025, 0.0), 1e-3, 100)?;
//!
//! assert_eq!(solution.history.len(), 101);
//! # Ok::<(), euler::Error>(())
//! ```

mod action;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use levitas_core::{Model, Observer, OdeProblem, Snapshot, StepIntegrable};

/// Integrates an ODE problem for a fixed number of steps.
///
/// # Algorithm
///
/// 1. Call the model with the initial input and emit step 0.
/// 2. For each step:
///    - Extract the state and its derivative from the current snapshot.
///    - Advance the state by `dt` and rebuild the model input.
///    - Call the model at the new input and record the snapshot.
///    - Emit an [`Event`]; stop if the observer returns [`Action::StopEarly`].
/// 3. Return the solution with the full history.
///
/// Non-finite values are not errors here. If the model lets them through,
/// they are recorded like any other snapshot; use an observer to stop on them.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
/// [`Error::step`] reports the step that failed.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    log::debug!("euler: integrating {steps} steps");

    let initial_output = model.call(&initial).map_err(Error::model(0))?;
    let mut current = Snapshot::new(initial, initial_output);

    let mut history = Vec::with_capacity(steps + 1);
    history.push(current.clone());

    let event = Event {
        step: 0,
        snapshot: current.clone(),
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        log::debug!("euler: stopped by observer before the first step");
        return Ok(Solution {
            status: Status::StoppedByObserver,
            history,
            steps: 0,
        });
    }

    for step in 1..=steps {
        current = advance(model, problem, &current, &dt, step)?;
        history.push(current.clone());
        log::trace!("euler: completed step {step}");

        let event = Event {
            step,
            snapshot: current.clone(),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            log::debug!("euler: stopped by observer at step {step}");
            return Ok(Solution {
                status: Status::StoppedByObserver,
                history,
                steps: step,
            });
        }
    }

    log::debug!("euler: completed {steps} steps");
    Ok(Solution {
        status: Status::Complete,
        history,
        steps,
    })
}

/// Integrates an ODE problem without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
{
    solve(model, problem, initial, dt, steps, ())
}

/// Takes one step from `current` and evaluates the model at the result.
///
/// `step` is the number of the step being taken and tags any error.
pub(crate) fn advance<M, P>(
    model: &M,
    problem: &P,
    current: &Snapshot<M::Input, M::Output>,
    dt: &P::Delta,
    step: usize,
) -> Result<Snapshot<M::Input, M::Output>, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
{
    let state = problem.state(&current.input).map_err(Error::problem(step))?;
    let derivative = problem
        .derivative(&current.input, &current.output)
        .map_err(Error::problem(step))?;

    let next_state = state.step(derivative, dt.clone());
    let next_input = problem
        .build_input(&current.input, &next_state, dt)
        .map_err(Error::problem(step))?;

    let next_output = model.call(&next_input).map_err(Error::model(step))?;
    Ok(Snapshot::new(next_input, next_output))
}
