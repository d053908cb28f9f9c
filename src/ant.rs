use crate::grid::{CellType, Grid, MIN_PHEROMONE};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use uuid::Uuid;

/// The nest every ant returns to after a completed trip.
const NEST: (usize, usize) = (0, 0);

/// Represents what an ant is currently doing.
#[derive(Clone, Debug, PartialEq)]
pub enum AntState {
    /// Walking away from the nest, looking for food.
    Searching,
    /// Walking its recorded path back to the nest, laying pheromone.
    /// `path_length` is the length of the acyclic trace captured the moment
    /// food was reached; it normalizes the deposit so shorter trips leave
    /// stronger trails.
    Returning { path_length: usize },
}

/// Represents what happened during a single ant step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// The ant moved to a neighbouring cell while searching.
    Moved,
    /// The ant had no walkable neighbour and stayed in place.
    Trapped,
    /// The ant stood in a dead end, sealed it as a wall, and moved out.
    DeadEndSealed { sealed: (usize, usize) },
    /// The ant is standing on food and turned around to head home.
    FoodFound { path_length: usize },
    /// The ant took one step along its return path.
    Returned,
    /// The ant arrived back at its start position and reset for a new trip.
    TripCompleted,
}

/// A single walker on the board.
///
/// Each ant owns its two path histories exclusively; the only shared state
/// between ants is the grid itself.
pub struct Ant {
    id: String,
    start_position: (usize, usize),
    position: (usize, usize),
    state: AntState,
    // Every step of the current trip, with loops collapsed as they close.
    path_history: Vec<(usize, usize)>,
    // First visits only; never trimmed. Its length is the trip length.
    path_history_acyclic: Vec<(usize, usize)>,
    pheromone_intensity: f64,
    pheromone_loss_factor: f64,
}

impl Ant {
    pub fn new(pheromone_intensity: f64, pheromone_loss_factor: f64) -> Ant {
        Ant::with_start(pheromone_intensity, pheromone_loss_factor, NEST)
    }

    pub fn with_start(
        pheromone_intensity: f64,
        pheromone_loss_factor: f64,
        start_position: (usize, usize),
    ) -> Ant {
        Ant {
            id: Uuid::new_v4().to_string(),
            start_position,
            position: start_position,
            state: AntState::Searching,
            path_history: vec![start_position],
            path_history_acyclic: vec![start_position],
            pheromone_intensity,
            pheromone_loss_factor,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> (usize, usize) {
        self.position
    }

    pub fn start_position(&self) -> (usize, usize) {
        self.start_position
    }

    pub fn state(&self) -> &AntState {
        &self.state
    }

    /// The captured trip length, present only while returning.
    pub fn path_length(&self) -> Option<usize> {
        match self.state {
            AntState::Returning { path_length } => Some(path_length),
            AntState::Searching => None,
        }
    }

    pub fn path_history(&self) -> &[(usize, usize)] {
        &self.path_history
    }

    pub fn path_history_acyclic(&self) -> &[(usize, usize)] {
        &self.path_history_acyclic
    }

    pub fn pheromone_intensity(&self) -> f64 {
        self.pheromone_intensity
    }

    /// Reserved configuration: not applied anywhere yet.
    // TODO: apply the loss factor to the return deposit once its intended
    // semantics are settled.
    pub fn pheromone_loss_factor(&self) -> f64 {
        self.pheromone_loss_factor
    }

    /// Advances the ant by one step against the shared grid.
    ///
    /// Searching ants take a pheromone-weighted random step; an ant standing
    /// on food spends the step turning around; returning ants walk their
    /// recorded path backwards, depositing pheromone as they go.
    pub fn step(&mut self, grid: &mut Grid, rng: &mut StdRng) -> StepOutcome {
        match self.state {
            AntState::Returning { path_length } => self.step_towards_nest(grid, path_length),
            AntState::Searching => {
                if grid.cell(self.position).cell_type() == CellType::Food {
                    let path_length = self.path_history_acyclic.len();
                    self.state = AntState::Returning { path_length };
                    StepOutcome::FoodFound { path_length }
                } else {
                    self.step_towards_food(grid, rng)
                }
            }
        }
    }

    fn step_towards_food(&mut self, grid: &mut Grid, rng: &mut StdRng) -> StepOutcome {
        let neighbours: Vec<((usize, usize), f64)> = grid
            .neighbours(self.position, 1)
            .iter()
            .map(|cell| (cell.position(), cell.pheromone()))
            .collect();

        match neighbours.as_slice() {
            // Nowhere to go. The ant stays put; callers observe and move on.
            [] => StepOutcome::Trapped,
            // A dead end away from the nest: seal it so no ant walks in
            // again, and step out through the only opening.
            [(next, _)] if self.position != self.start_position => {
                let sealed = self.position;
                grid.cell_mut(sealed).set_type(CellType::Wall);
                self.position = *next;
                StepOutcome::DeadEndSealed { sealed }
            }
            _ => {
                // Weight neighbours by their pheromone, except cells already
                // walked this trip, which keep only the floor weight.
                // Revisits stay unlikely but never impossible, and the total
                // weight is always strictly positive.
                let (next, _) = neighbours
                    .choose_weighted(rng, |(position, pheromone)| {
                        if self.path_history.contains(position) {
                            MIN_PHEROMONE
                        } else {
                            *pheromone
                        }
                    })
                    .unwrap();

                self.position = *next;
                self.record_visit(*next);
                StepOutcome::Moved
            }
        }
    }

    /// Records a visited position in the path histories, collapsing the loop
    /// just walked if the position was already on the path. After a collapse
    /// the position appears exactly once, at the end of the history.
    fn record_visit(&mut self, position: (usize, usize)) {
        match self
            .path_history
            .iter()
            .position(|visited| *visited == position)
        {
            Some(first_occurrence) => self.path_history.truncate(first_occurrence + 1),
            None => {
                self.path_history.push(position);
                self.path_history_acyclic.push(position);
            }
        }
    }

    fn step_towards_nest(&mut self, grid: &mut Grid, path_length: usize) -> StepOutcome {
        // The whole intensity is spread over the trip: one deposit per
        // recorded cell as the ant leaves it.
        let leaving = grid.cell_mut(self.position);
        leaving.set_pheromone(leaving.pheromone() + self.pheromone_intensity / path_length as f64);

        match self.path_history.pop() {
            Some(next) if next != self.start_position => {
                self.position = next;
                StepOutcome::Returned
            }
            // Back home. The start cell itself gets no deposit.
            _ => {
                self.reset();
                StepOutcome::TripCompleted
            }
        }
    }

    /// Clears all trip state after a completed round trip. Ants are
    /// recycled, not recreated: position and start are forced back to the
    /// nest and both histories restart from it.
    fn reset(&mut self) {
        self.start_position = NEST;
        self.position = NEST;
        self.path_history = vec![NEST];
        self.path_history_acyclic = vec![NEST];
        self.state = AntState::Searching;
    }
}
