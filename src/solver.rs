use crate::ant::StepOutcome;
use crate::colony::Colony;
use crate::grid::{Grid, LayoutError};
use crate::render;
use crate::replay::{create_replay_logger, ReplayLogger};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for a [`Solver`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SolverConfig {
    /// Side length of the square board.
    pub board_size: usize,
    /// Number of ants in the colony.
    pub ants: usize,
    /// Pheromone subtracted from every cell each tick.
    pub evaporation_factor: f64,
    /// Probability that a normal cell is generated as a wall.
    pub wall_probability: f64,
    /// Pheromone an ant spreads over one return trip. Defaults to
    /// `0.7 × board_size`: the shortest possible trip is about two board
    /// sides long, so the best paths end up near the pheromone cap.
    pub pheromone_intensity: Option<f64>,
    /// Reserved per-ant configuration; stored but not yet applied.
    pub pheromone_loss_factor: f64,
    /// Seed for the random number generator. The same seed and config
    /// reproduce the same simulation.
    pub seed: u64,
    /// File to save a JSON replay to. `None` disables replay logging.
    pub replay_filename: Option<String>,
}

impl Default for SolverConfig {
    fn default() -> SolverConfig {
        SolverConfig {
            board_size: 50,
            ants: 10,
            evaporation_factor: 0.001,
            wall_probability: 0.2,
            pheromone_intensity: None,
            pheromone_loss_factor: 0.05,
            seed: 0,
            replay_filename: None,
        }
    }
}

/// Counters for the outcomes observed while ticking the simulation.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SolverStats {
    /// Steps where an ant had no walkable neighbour.
    pub trapped: usize,
    /// Dead-end cells converted to walls.
    pub dead_ends_sealed: usize,
    /// Times an ant reached the food.
    pub food_discoveries: usize,
    /// Completed round trips (food reached and nest regained).
    pub trips_completed: usize,
}

/// The simulation controller: one grid, one colony, one random source.
///
/// Each [`tick`](Solver::tick) steps every ant once against the shared grid
/// and then evaporates the grid exactly once. Single-threaded by design;
/// all grid access happens in sequential, non-overlapping steps.
pub struct Solver {
    grid: Grid,
    colony: Colony,
    rng: StdRng,
    tick: usize,
    stats: SolverStats,
    replay_logger: Box<dyn ReplayLogger>,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Solver {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut grid = Grid::new(config.board_size, config.evaporation_factor);
        grid.set_random_walls(config.wall_probability, &mut rng);

        let pheromone_intensity = config
            .pheromone_intensity
            .unwrap_or(config.board_size as f64 * 0.7);
        let colony = Colony::new(config.ants, pheromone_intensity, config.pheromone_loss_factor);

        let replay_logger = create_replay_logger(
            config.replay_filename,
            config.board_size,
            grid.export_layout(),
        );

        Solver {
            grid,
            colony,
            rng,
            tick: 0,
            stats: SolverStats::default(),
            replay_logger,
        }
    }

    /// Advances the simulation by one tick: every ant takes one step in
    /// colony order, then the grid evaporates once.
    pub fn tick(&mut self) {
        self.tick += 1;

        for ant in self.colony.ants_mut() {
            let outcome = ant.step(&mut self.grid, &mut self.rng);
            match outcome {
                StepOutcome::Trapped => {
                    self.stats.trapped += 1;
                    self.replay_logger
                        .log_trapped(self.tick, ant.id().to_string(), ant.position());
                }
                StepOutcome::DeadEndSealed { sealed } => {
                    self.stats.dead_ends_sealed += 1;
                    self.replay_logger.log_dead_end_sealed(self.tick, sealed);
                }
                StepOutcome::FoodFound { path_length } => {
                    self.stats.food_discoveries += 1;
                    self.replay_logger.log_food_found(
                        self.tick,
                        ant.id().to_string(),
                        ant.position(),
                        path_length,
                    );
                }
                StepOutcome::TripCompleted => {
                    self.stats.trips_completed += 1;
                    self.replay_logger.log_trip_completed(
                        self.tick,
                        ant.id().to_string(),
                        ant.position(),
                    );
                }
                StepOutcome::Moved | StepOutcome::Returned => {}
            }
        }

        self.grid.evaporate();
        self.replay_logger
            .log_tick(self.tick, self.colony.positions(), self.stats.clone());
    }

    /// The number of ticks run so far.
    pub fn ticks(&self) -> usize {
        self.tick
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the grid for setup between ticks.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn colony(&self) -> &Colony {
        &self.colony
    }

    /// Replaces the board with a custom layout of cell type tokens. A
    /// malformed layout is rejected and the current board is kept.
    pub fn import_layout<S: AsRef<str>>(&mut self, layout: &[Vec<S>]) -> Result<(), LayoutError> {
        self.grid.import_layout(layout)?;
        // The replay's board snapshot must describe the board the ticks
        // actually run on, not the construction-time one.
        self.replay_logger
            .log_board_replaced(self.grid.size(), self.grid.export_layout());
        Ok(())
    }

    /// Exports the board as a matrix of cell type tokens.
    pub fn export_layout(&self) -> Vec<Vec<String>> {
        self.grid.export_layout()
    }

    /// Renders the board and colony as a plain string.
    pub fn render_to_string(&self) -> String {
        render::render_to_string(&self.grid, &self.colony)
    }

    /// Draws the board, colony, and counters to the console.
    pub fn draw(&self) {
        render::draw(&self.grid, &self.colony, self.tick, &self.stats);
    }

    /// Saves the replay collected so far, if replay logging is enabled.
    pub fn save_replay(&self) {
        self.replay_logger.save();
    }
}
