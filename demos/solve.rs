use aco_engine::{Solver, SolverConfig};

fn main() {
    let mut solver = Solver::new(SolverConfig {
        board_size: 10,
        ants: 20,
        evaporation_factor: 0.006,
        wall_probability: 0.0,
        seed: 0,
        ..SolverConfig::default()
    });

    // A hand-made board; swap in your own, or drop the import to keep the
    // randomly generated one.
    let layout = vec![
        vec!["START", "NORMAL", "WALL", "NORMAL", "NORMAL", "WALL", "NORMAL", "NORMAL", "NORMAL", "NORMAL"],
        vec!["NORMAL", "NORMAL", "NORMAL", "NORMAL", "WALL", "NORMAL", "WALL", "NORMAL", "NORMAL", "NORMAL"],
        vec!["NORMAL", "WALL", "NORMAL", "NORMAL", "NORMAL", "NORMAL", "NORMAL", "WALL", "NORMAL", "NORMAL"],
        vec!["WALL", "NORMAL", "NORMAL", "WALL", "WALL", "NORMAL", "NORMAL", "NORMAL", "WALL", "NORMAL"],
        vec!["WALL", "NORMAL", "WALL", "NORMAL", "NORMAL", "NORMAL", "NORMAL", "NORMAL", "NORMAL", "NORMAL"],
        vec!["NORMAL", "NORMAL", "NORMAL", "NORMAL", "WALL", "WALL", "NORMAL", "WALL", "NORMAL", "NORMAL"],
        vec!["NORMAL", "WALL", "NORMAL", "NORMAL", "NORMAL", "WALL", "NORMAL", "NORMAL", "NORMAL", "NORMAL"],
        vec!["NORMAL", "NORMAL", "NORMAL", "WALL", "NORMAL", "NORMAL", "NORMAL", "NORMAL", "WALL", "NORMAL"],
        vec!["WALL", "NORMAL", "WALL", "NORMAL", "NORMAL", "NORMAL", "WALL", "NORMAL", "NORMAL", "NORMAL"],
        vec!["NORMAL", "NORMAL", "NORMAL", "NORMAL", "NORMAL", "NORMAL", "NORMAL", "NORMAL", "NORMAL", "FOOD"],
    ];
    solver
        .import_layout(&layout)
        .expect("the demo layout is valid");

    println!("{}\n", solver.render_to_string());

    for _ in 0..1000 {
        solver.tick();
    }

    println!("{}", solver.render_to_string());
    println!("\n{:?}", solver.stats());
}
