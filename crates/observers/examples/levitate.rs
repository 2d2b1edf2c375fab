//! Runs one levitation trajectory and prints it as CSV.
//!
//! # Usage
//!
//! ```text
//! cargo run --example levitate
//! cargo run --example levitate -- rig.toml
//! ```
//!
//! Without an argument the default rig starts 5 mm below the reference gap.
//! With a path, the TOML file supplies parameters, initial state, step size,
//! and step count (see `SimulationConfig`). The run stops early if the state
//! diverges.

use std::error::Error;

use levitas_maglev::{Levitation, Maglev, SimulationConfig};
use levitas_observers::DivergenceGuard;
use levitas_solvers::transient::euler;

fn main() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_path(path)?,
        None => SimulationConfig::default(),
    };

    let model = Maglev::new(config.parameters);
    let mut guard = DivergenceGuard::new();
    let solution = euler::solve(
        &model,
        &Levitation,
        config.initial,
        config.dt,
        config.steps,
        &mut guard,
    )?;

    println!("t,x,x_dot,current,force");
    for (step, snapshot) in solution.history.iter().enumerate() {
        let t = step as f64 * config.dt;
        let state = snapshot.input;
        let eval = snapshot.output;
        println!(
            "{t},{},{},{},{}",
            state.position, state.velocity, eval.current, eval.force
        );
    }

    if let Some(divergence) = guard.divergence() {
        eprintln!(
            "stopped at step {}: {:?} (x = {}, x_dot = {})",
            divergence.step, divergence.kind, divergence.state.position, divergence.state.velocity
        );
    }

    Ok(())
}
