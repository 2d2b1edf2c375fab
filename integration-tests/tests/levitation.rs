use approx::assert_relative_eq;
use levitas_core::Model;
use levitas_maglev::{Evaluation, Levitation, Maglev, Parameters, State, force, step};
use levitas_observers::{DivergenceGuard, DivergenceKind, SettleDetector};
use levitas_solvers::transient::{
    Trajectory,
    euler::{self, Status},
};

use integration_tests::{heavy_rig, step_directly};

#[test]
fn free_functions_and_bound_model_agree() {
    let parameters = Parameters::default().mass_si(0.07).derivative_gain_si(9.0);
    let model = Maglev::new(parameters);
    let state = State::new(0.017, 0.04);

    assert_eq!(model.step(state, 1e-3), step(&parameters, state, 1e-3));
    assert_eq!(model.force(0.017, 2.0), force(&parameters, 0.017, 2.0));
}

#[test]
fn solver_history_matches_direct_loop() {
    let config = heavy_rig();
    let model = Maglev::new(config.parameters);

    let solution = euler::solve_unobserved(&model, &Levitation, config.initial, config.dt, 250)
        .expect("should solve");

    let direct = step_directly(&model, config.initial, config.dt, 250);
    assert_eq!(solution.last().unwrap().input, direct);
}

#[test]
fn heavy_rig_settles_at_its_equilibrium() {
    let config = heavy_rig();
    let model = Maglev::new(config.parameters);
    let mut detector = SettleDetector::at_equilibrium(&model, 1e-7, 1e-6, 50).unwrap();
    let mut guard = DivergenceGuard::new();

    let solution = euler::solve(
        &model,
        &Levitation,
        config.initial,
        config.dt,
        config.steps,
        |event: &euler::Event<State, Evaluation>| {
            let diverged: Option<euler::Action> =
                levitas_core::Observer::observe(&mut guard, event);
            diverged.or_else(|| levitas_core::Observer::observe(&mut detector, event))
        },
    )
    .expect("should solve");

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert!(guard.divergence().is_none());
    assert!(detector.settled_at().is_some());

    let rest = solution.last().unwrap();
    assert_relative_eq!(rest.input.position, detector.target(), epsilon = 1e-7);
    assert_relative_eq!(rest.output.acceleration, 0.0, epsilon = 1e-3);
}

#[test]
fn equilibrium_gap_moves_with_proportional_gain() {
    let gaps: Vec<f64> = [60.0, 90.0, 120.0, 150.0, 200.0]
        .into_iter()
        .map(|gain| {
            Maglev::new(Parameters::default().proportional_gain_si(gain))
                .equilibrium_gap()
                .unwrap()
        })
        .collect();

    assert!(gaps.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(gaps.iter().all(|gap| *gap < 0.02));
}

#[test]
fn independent_trajectories_run_in_parallel() {
    let gains = [90.0, 120.0, 150.0];

    let finals: Vec<State> = std::thread::scope(|scope| {
        let handles: Vec<_> = gains
            .iter()
            .map(|&gain| {
                scope.spawn(move || {
                    let model = Maglev::new(Parameters::default().proportional_gain_si(gain));
                    step_directly(&model, State::new(0.025, 0.0), 1e-3, 3000)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (gain, state) in gains.iter().zip(&finals) {
        let model = Maglev::new(Parameters::default().proportional_gain_si(*gain));
        assert_eq!(*state, step_directly(&model, State::new(0.025, 0.0), 1e-3, 3000));
        assert_relative_eq!(state.position, model.equilibrium_gap().unwrap(), epsilon = 1e-9);
    }
}

#[test]
fn lazy_trajectory_restarts_identically() {
    let model = Maglev::default();
    let mut trajectory = Trajectory::new(&model, &Levitation, State::new(0.025, 0.0), 1e-3);

    let first: Vec<_> = trajectory.by_ref().take(100).map(Result::unwrap).collect();
    trajectory.reset(State::new(0.025, 0.0));
    let second: Vec<_> = trajectory.take(100).map(Result::unwrap).collect();

    assert_eq!(first, second);
    assert_eq!(first[99].output, model.call(&first[99].input).unwrap());
}

#[test]
fn oversized_gap_falls_with_current_clamped() {
    let model = Maglev::default();

    // Far below the magnet the PD correction drives the current below zero.
    let solution =
        euler::solve_unobserved(&model, &Levitation, State::new(0.2, 0.0), 1e-3, 20).unwrap();

    for snapshot in &solution.history {
        assert_eq!(snapshot.output.current, 0.0);
        assert_eq!(snapshot.output.force, 0.0);
        assert_relative_eq!(snapshot.output.acceleration, -9.81);
    }
    assert!(solution.last().unwrap().input.velocity < 0.0);
}

#[test]
fn guard_stops_free_fall_before_the_singularity() {
    let model = Maglev::new(
        Parameters::default()
            .nominal_current_si(0.0)
            .proportional_gain_si(0.0)
            .derivative_gain_si(0.0),
    );
    let mut guard = DivergenceGuard::new();

    let solution =
        euler::solve(&model, &Levitation, State::new(0.05, 0.0), 1e-3, 10_000, &mut guard).unwrap();

    let divergence = guard.divergence().unwrap();
    assert_eq!(divergence.kind, DivergenceKind::GapClosed);
    assert_eq!(solution.steps, divergence.step);
    assert!(solution.history[..divergence.step].iter().all(|s| s.input.position > 0.0));
}
