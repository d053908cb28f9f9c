use aco_engine::{Solver, SolverConfig};
use std::thread;
use std::time::Duration;

fn main() {
    let mut solver = Solver::new(SolverConfig {
        board_size: 20,
        ants: 20,
        evaporation_factor: 0.006,
        wall_probability: 0.2,
        seed: 0,
        ..SolverConfig::default()
    });

    // Watch the colony live. A random board may have no path to the food,
    // in which case the ants wall themselves into the largest open region.
    loop {
        solver.draw();
        thread::sleep(Duration::from_millis(100));
        solver.tick();
    }
}
