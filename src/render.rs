use crate::colony::Colony;
use crate::grid::{Cell, CellType, Grid};
use crate::solver::SolverStats;
use crossterm::{
    cursor::Hide,
    execute,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{stdout, Write};

/// The glyph for a cell without ants on it. Normal cells show their
/// pheromone band.
pub fn cell_glyph(cell: &Cell) -> char {
    match cell.cell_type() {
        CellType::Wall => 'X',
        CellType::Start => '=',
        CellType::Food => '*',
        CellType::Normal => {
            let pheromone = cell.pheromone();
            if pheromone < 0.2 {
                '░'
            } else if pheromone < 0.4 {
                '▒'
            } else if pheromone < 0.6 {
                '▓'
            } else {
                '█'
            }
        }
    }
}

fn cell_color(cell: &Cell) -> Color {
    match cell.cell_type() {
        CellType::Wall => Color::DarkGrey,
        CellType::Start => Color::Yellow,
        CellType::Food => Color::Green,
        CellType::Normal => Color::Reset,
    }
}

/// The two characters drawn for one cell: each cell prints double-width for
/// a square aspect ratio, and ants standing on a cell replace its glyph.
fn cell_display(cell: &Cell, ants_on_cell: usize) -> String {
    let glyph = cell_glyph(cell);
    match ants_on_cell {
        0 => format!("{}{}", glyph, glyph),
        1 => "· ".to_string(),
        2..=9 => format!("{} ", ants_on_cell),
        10..=99 => format!("{}", ants_on_cell),
        _ => "!!".to_string(),
    }
}

/// Renders the board and colony as a plain string, one line per row.
pub fn render_to_string(grid: &Grid, colony: &Colony) -> String {
    let positions = colony.positions();
    let mut lines = Vec::with_capacity(grid.size());

    for y in 0..grid.size() {
        let mut line = String::new();
        for x in 0..grid.size() {
            let ants_on_cell = positions.iter().filter(|p| **p == (x, y)).count();
            line.push_str(&cell_display(grid.cell((x, y)), ants_on_cell));
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Draws the board, colony, and counters to the console in color.
pub fn draw(grid: &Grid, colony: &Colony, tick: usize, stats: &SolverStats) {
    let mut stdout = stdout();
    let positions = colony.positions();

    execute!(
        stdout,
        Clear(ClearType::All),
        Hide,
        Print("Tick: "),
        Print(tick.to_string()),
        Print("\nAnts: "),
        Print(colony.len().to_string()),
        Print("\nTrips completed: "),
        Print(stats.trips_completed.to_string()),
        Print("\nDead ends sealed: "),
        Print(stats.dead_ends_sealed.to_string()),
        Print("\nTrapped events: "),
        Print(stats.trapped.to_string()),
        Print("\n\n")
    )
    .unwrap();

    for y in 0..grid.size() {
        for x in 0..grid.size() {
            let cell = grid.cell((x, y));
            let ants_on_cell = positions.iter().filter(|p| **p == (x, y)).count();
            let color = if ants_on_cell > 0 {
                Color::Red
            } else {
                cell_color(cell)
            };
            execute!(
                stdout,
                SetForegroundColor(color),
                Print(cell_display(cell, ants_on_cell)),
                SetForegroundColor(Color::Reset)
            )
            .unwrap();
        }
        execute!(stdout, Print("\n")).unwrap();
    }

    stdout.flush().unwrap();
}
