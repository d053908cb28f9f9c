use rand::rngs::StdRng;
use rand::Rng;
use thiserror::Error;

/// The lowest pheromone level a cell can hold.
pub const MIN_PHEROMONE: f64 = 0.001;
/// The floor evaporation decays towards. Kept above [`MIN_PHEROMONE`] so a
/// faded trail stays distinguishable from a never-visited cell.
pub const MIN_EVAPORATE_PHEROMONE: f64 = MIN_PHEROMONE * 2.0;
/// The highest pheromone level a cell can hold.
pub const MAX_PHEROMONE: f64 = 0.8;

/// Represents the type of a cell on the board.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CellType {
    Normal,
    Wall,
    Food,
    Start,
}

impl CellType {
    /// Parses a layout token into a cell type. Returns `None` for anything
    /// outside the closed token set.
    pub fn from_token(token: &str) -> Option<CellType> {
        match token {
            "NORMAL" => Some(CellType::Normal),
            "WALL" => Some(CellType::Wall),
            "FOOD" => Some(CellType::Food),
            "START" => Some(CellType::Start),
            _ => None,
        }
    }

    /// The layout token for this cell type.
    pub fn token(&self) -> &'static str {
        match self {
            CellType::Normal => "NORMAL",
            CellType::Wall => "WALL",
            CellType::Food => "FOOD",
            CellType::Start => "START",
        }
    }
}

/// Represents the reason a layout was rejected on import.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,
    #[error("layout is not square: row {row} has {found} columns, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell token {token:?} at row {row}, column {col}")]
    UnknownToken {
        token: String,
        row: usize,
        col: usize,
    },
}

/// A single cell of the board.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    x: usize,
    y: usize,
    pheromone: f64,
    cell_type: CellType,
}

impl Cell {
    pub fn new(x: usize, y: usize, cell_type: CellType) -> Cell {
        Cell {
            x,
            y,
            pheromone: MIN_EVAPORATE_PHEROMONE,
            cell_type,
        }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn pheromone(&self) -> f64 {
        self.pheromone
    }

    /// Stores a pheromone level, clamped to
    /// `[MIN_PHEROMONE, MAX_PHEROMONE]`. Out-of-range values are not an
    /// error; they are silently pinned to the nearest bound.
    pub fn set_pheromone(&mut self, pheromone: f64) {
        if pheromone <= MIN_PHEROMONE {
            self.pheromone = MIN_PHEROMONE;
        } else if pheromone > MAX_PHEROMONE {
            self.pheromone = MAX_PHEROMONE;
        } else {
            self.pheromone = pheromone;
        }
    }

    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// Overwrites the cell type. Type transitions are the caller's
    /// responsibility; no validation is performed.
    pub fn set_type(&mut self, cell_type: CellType) {
        self.cell_type = cell_type;
    }
}

/// The square board the ants walk on.
///
/// Owns every cell exclusively; ants address cells by position and only
/// borrow them through the grid.
pub struct Grid {
    n: usize,
    cells: Vec<Cell>,
    evaporation_factor: f64,
}

impl Grid {
    /// Creates an `n × n` grid with the nest at `(0, 0)` and the food at
    /// `(n-1, n-1)`.
    ///
    /// # Panics
    /// Panics if `n` is zero: a board needs at least one cell to hold the
    /// nest and the food.
    pub fn new(n: usize, evaporation_factor: f64) -> Grid {
        assert!(n > 0, "board size must be at least 1");

        let mut cells = Vec::with_capacity(n * n);
        for y in 0..n {
            for x in 0..n {
                cells.push(Cell::new(x, y, CellType::Normal));
            }
        }

        let mut grid = Grid {
            n,
            cells,
            evaporation_factor,
        };
        grid.cell_mut((0, 0)).set_type(CellType::Start);
        grid.cell_mut((n - 1, n - 1)).set_type(CellType::Food);
        grid
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn evaporation_factor(&self) -> f64 {
        self.evaporation_factor
    }

    pub fn set_evaporation_factor(&mut self, evaporation_factor: f64) {
        self.evaporation_factor = evaporation_factor;
    }

    pub fn cell(&self, position: (usize, usize)) -> &Cell {
        &self.cells[position.1 * self.n + position.0]
    }

    pub fn cell_mut(&mut self, position: (usize, usize)) -> &mut Cell {
        &mut self.cells[position.1 * self.n + position.0]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the walkable neighbours of a position: the four orthogonal
    /// cells at exactly `jump` distance, inside the board and not walls.
    /// Never includes diagonals or the position itself.
    ///
    /// A `jump` greater than 1 lets a caller see past a wall directly next
    /// to the position.
    pub fn neighbours(&self, position: (usize, usize), jump: usize) -> Vec<&Cell> {
        let (x, y) = (position.0 as isize, position.1 as isize);
        let jump = jump as isize;
        let offsets = [(-jump, 0), (jump, 0), (0, -jump), (0, jump)];

        let mut neighbours = Vec::with_capacity(4);
        for (dx, dy) in offsets {
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || ny < 0 || nx >= self.n as isize || ny >= self.n as isize {
                continue;
            }

            let cell = self.cell((nx as usize, ny as usize));
            if cell.cell_type() != CellType::Wall {
                neighbours.push(cell);
            }
        }

        neighbours
    }

    /// Decays every cell's pheromone by the evaporation factor, never below
    /// [`MIN_EVAPORATE_PHEROMONE`]. Runs once per tick, after all ants have
    /// moved.
    pub fn evaporate(&mut self) {
        let factor = self.evaporation_factor;
        for cell in &mut self.cells {
            let evaporated = (cell.pheromone() - factor).max(MIN_EVAPORATE_PHEROMONE);
            cell.set_pheromone(evaporated);
        }
    }

    /// Turns each Normal cell into a Wall with the given probability. The
    /// Start and Food cells are never touched.
    pub fn set_random_walls(&mut self, wall_probability: f64, rng: &mut StdRng) {
        for cell in &mut self.cells {
            if cell.cell_type() == CellType::Normal && rng.gen::<f64>() <= wall_probability {
                cell.set_type(CellType::Wall);
            }
        }
    }

    /// Replaces the whole grid with the given square matrix of cell type
    /// tokens, re-deriving the board size from the outer dimension. The
    /// evaporation factor is kept.
    ///
    /// The layout is validated in full before anything is applied: on error
    /// the previous grid state is left untouched.
    pub fn import_layout<S: AsRef<str>>(&mut self, layout: &[Vec<S>]) -> Result<(), LayoutError> {
        let n = layout.len();
        if n == 0 {
            return Err(LayoutError::Empty);
        }

        let mut cells = Vec::with_capacity(n * n);
        for (y, row) in layout.iter().enumerate() {
            if row.len() != n {
                return Err(LayoutError::NotSquare {
                    row: y,
                    expected: n,
                    found: row.len(),
                });
            }

            for (x, token) in row.iter().enumerate() {
                let token = token.as_ref();
                match CellType::from_token(token) {
                    Some(cell_type) => cells.push(Cell::new(x, y, cell_type)),
                    None => {
                        return Err(LayoutError::UnknownToken {
                            token: token.to_string(),
                            row: y,
                            col: x,
                        })
                    }
                }
            }
        }

        self.n = n;
        self.cells = cells;
        Ok(())
    }

    /// Exports the grid as a row-major matrix of cell type tokens.
    /// Pheromone levels are not exported.
    pub fn export_layout(&self) -> Vec<Vec<String>> {
        (0..self.n)
            .map(|y| {
                (0..self.n)
                    .map(|x| self.cell((x, y)).cell_type().token().to_string())
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn when_creating_a_grid_the_nest_and_food_corners_are_placed() {
        let grid = Grid::new(5, 0.001);

        assert_eq!(grid.cell((0, 0)).cell_type(), CellType::Start);
        assert_eq!(grid.cell((4, 4)).cell_type(), CellType::Food);
        assert_eq!(grid.cell((2, 2)).cell_type(), CellType::Normal);
        assert_eq!(grid.size(), 5);
    }

    #[test]
    #[should_panic(expected = "board size must be at least 1")]
    fn when_creating_a_grid_with_size_zero_construction_panics() {
        Grid::new(0, 0.001);
    }

    #[test]
    fn when_creating_a_grid_every_cell_starts_at_the_evaporation_floor() {
        let grid = Grid::new(3, 0.001);

        for cell in grid.cells() {
            assert_eq!(cell.pheromone(), MIN_EVAPORATE_PHEROMONE);
        }
    }

    #[test]
    fn when_setting_pheromone_below_the_minimum_it_is_clamped_to_the_minimum() {
        let mut cell = Cell::new(0, 0, CellType::Normal);

        cell.set_pheromone(-1.0);
        assert_eq!(cell.pheromone(), MIN_PHEROMONE);

        cell.set_pheromone(MIN_PHEROMONE);
        assert_eq!(cell.pheromone(), MIN_PHEROMONE);
    }

    #[test]
    fn when_setting_pheromone_above_the_maximum_it_is_clamped_to_the_maximum() {
        let mut cell = Cell::new(0, 0, CellType::Normal);

        cell.set_pheromone(1.5);

        assert_eq!(cell.pheromone(), MAX_PHEROMONE);
    }

    #[test]
    fn when_setting_pheromone_within_bounds_it_is_stored_as_is() {
        let mut cell = Cell::new(0, 0, CellType::Normal);

        cell.set_pheromone(0.42);

        assert_eq!(cell.pheromone(), 0.42);
    }

    #[test]
    fn when_querying_neighbours_only_orthogonal_in_bounds_cells_are_returned() {
        let grid = Grid::new(3, 0.001);

        let positions: Vec<(usize, usize)> = grid
            .neighbours((0, 0), 1)
            .iter()
            .map(|cell| cell.position())
            .collect();

        assert_eq!(positions, vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn when_querying_neighbours_walls_are_filtered_out() {
        let mut grid = Grid::new(3, 0.001);
        grid.cell_mut((1, 0)).set_type(CellType::Wall);
        grid.cell_mut((0, 1)).set_type(CellType::Wall);
        grid.cell_mut((2, 1)).set_type(CellType::Wall);

        let positions: Vec<(usize, usize)> = grid
            .neighbours((1, 1), 1)
            .iter()
            .map(|cell| cell.position())
            .collect();

        assert_eq!(positions, vec![(1, 2)]);
    }

    #[test]
    fn when_querying_neighbours_with_a_jump_cells_at_exactly_that_distance_are_returned() {
        let mut grid = Grid::new(5, 0.001);
        // Walls directly around the center must not matter at jump 2.
        grid.cell_mut((1, 2)).set_type(CellType::Wall);
        grid.cell_mut((3, 2)).set_type(CellType::Wall);

        let positions: Vec<(usize, usize)> = grid
            .neighbours((2, 2), 2)
            .iter()
            .map(|cell| cell.position())
            .collect();

        assert_eq!(positions, vec![(0, 2), (4, 2), (2, 0), (2, 4)]);
    }

    #[test]
    fn when_evaporating_no_cell_drops_below_the_evaporation_floor() {
        let mut grid = Grid::new(3, 0.01);
        grid.cell_mut((1, 1)).set_pheromone(0.5);

        grid.evaporate();

        assert!((grid.cell((1, 1)).pheromone() - 0.49).abs() < 1e-12);
        for cell in grid.cells() {
            assert!(cell.pheromone() >= MIN_EVAPORATE_PHEROMONE);
        }
    }

    #[test]
    fn when_evaporating_no_cell_gains_pheromone() {
        let mut grid = Grid::new(4, 0.003);
        grid.cell_mut((2, 1)).set_pheromone(0.3);
        grid.cell_mut((3, 3)).set_pheromone(0.004);
        let before: Vec<f64> = grid.cells().iter().map(|cell| cell.pheromone()).collect();

        grid.evaporate();

        for (cell, previous) in grid.cells().iter().zip(before) {
            assert!(cell.pheromone() <= previous);
        }
    }

    #[test]
    fn when_placing_random_walls_with_probability_one_every_normal_cell_becomes_a_wall() {
        let mut grid = Grid::new(4, 0.001);
        let mut rng = StdRng::seed_from_u64(0);

        grid.set_random_walls(1.0, &mut rng);

        assert_eq!(grid.cell((0, 0)).cell_type(), CellType::Start);
        assert_eq!(grid.cell((3, 3)).cell_type(), CellType::Food);
        for cell in grid.cells() {
            if cell.position() != (0, 0) && cell.position() != (3, 3) {
                assert_eq!(cell.cell_type(), CellType::Wall);
            }
        }
    }

    #[test]
    fn when_placing_random_walls_with_probability_zero_nothing_changes() {
        let mut grid = Grid::new(4, 0.001);
        let mut rng = StdRng::seed_from_u64(0);

        grid.set_random_walls(0.0, &mut rng);

        for cell in grid.cells() {
            assert_ne!(cell.cell_type(), CellType::Wall);
        }
    }

    #[test]
    fn when_importing_a_layout_the_grid_is_fully_replaced() {
        let mut grid = Grid::new(5, 0.001);
        let layout = vec![
            vec!["START", "WALL"],
            vec!["NORMAL", "FOOD"],
        ];

        grid.import_layout(&layout).unwrap();

        assert_eq!(grid.size(), 2);
        assert_eq!(grid.cell((0, 0)).cell_type(), CellType::Start);
        assert_eq!(grid.cell((1, 0)).cell_type(), CellType::Wall);
        assert_eq!(grid.cell((0, 1)).cell_type(), CellType::Normal);
        assert_eq!(grid.cell((1, 1)).cell_type(), CellType::Food);
    }

    #[test]
    fn when_importing_and_exporting_a_layout_it_round_trips_unchanged() {
        let mut grid = Grid::new(5, 0.001);
        let layout = vec![
            vec!["START".to_string(), "WALL".to_string()],
            vec!["NORMAL".to_string(), "FOOD".to_string()],
        ];

        grid.import_layout(&layout).unwrap();

        assert_eq!(grid.export_layout(), layout);
    }

    #[test]
    fn when_importing_a_non_square_layout_the_import_fails_and_the_grid_is_untouched() {
        let mut grid = Grid::new(3, 0.001);
        grid.cell_mut((1, 1)).set_pheromone(0.5);
        let layout = vec![
            vec!["START", "NORMAL"],
            vec!["NORMAL"],
        ];

        let result = grid.import_layout(&layout);

        assert_eq!(
            result,
            Err(LayoutError::NotSquare {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.cell((1, 1)).pheromone(), 0.5);
    }

    #[test]
    fn when_importing_a_layout_with_an_unknown_token_the_import_fails_and_the_grid_is_untouched() {
        let mut grid = Grid::new(3, 0.001);
        let layout = vec![
            vec!["START", "NORMAL"],
            vec!["LAVA", "FOOD"],
        ];

        let result = grid.import_layout(&layout);

        assert_eq!(
            result,
            Err(LayoutError::UnknownToken {
                token: "LAVA".to_string(),
                row: 1,
                col: 0
            })
        );
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.cell((0, 0)).cell_type(), CellType::Start);
    }

    #[test]
    fn when_importing_an_empty_layout_the_import_fails() {
        let mut grid = Grid::new(3, 0.001);
        let layout: Vec<Vec<&str>> = vec![];

        assert_eq!(grid.import_layout(&layout), Err(LayoutError::Empty));
        assert_eq!(grid.size(), 3);
    }

    #[test]
    fn when_importing_a_layout_the_evaporation_factor_is_kept() {
        let mut grid = Grid::new(3, 0.006);
        let layout = vec![
            vec!["START", "NORMAL"],
            vec!["NORMAL", "FOOD"],
        ];

        grid.import_layout(&layout).unwrap();

        assert_eq!(grid.evaporation_factor(), 0.006);
    }
}
