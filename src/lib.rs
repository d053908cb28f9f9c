//! # aco_engine
//!
//! An ant colony optimization engine over a 2-D grid.
//!
//! A colony of independent ants explores the board from the nest, biased by
//! the pheromone trails that returning ants lay down. Shorter round trips
//! deposit more pheromone per cell, and per-tick evaporation erodes stale
//! trails, so the colony converges on a short path from the nest to the
//! food. Along the way the ants simplify the maze by sealing dead ends.

pub mod ant;
pub mod colony;
pub mod grid;
pub mod solver;

mod render;
mod replay;

pub use ant::{Ant, AntState, StepOutcome};
pub use colony::Colony;
pub use grid::{
    Cell, CellType, Grid, LayoutError, MAX_PHEROMONE, MIN_EVAPORATE_PHEROMONE, MIN_PHEROMONE,
};
pub use solver::{Solver, SolverConfig, SolverStats};
