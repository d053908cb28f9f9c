use crate::solver::SolverStats;
use serde_json::json;
use std::{collections::HashMap, fs::File, io::BufWriter};

pub fn create_replay_logger(
    filename: Option<String>,
    board_size: usize,
    layout: Vec<Vec<String>>,
) -> Box<dyn ReplayLogger> {
    match filename {
        None => Box::new(NoOpReplayLogger {}),
        Some(filename) => Box::new(JsonReplayLogger::new(filename, board_size, layout)),
    }
}

/// Structured observability for the simulation: per-tick records plus the
/// events the core reports instead of printing to the console.
pub trait ReplayLogger {
    #[allow(unused_variables)]
    fn log_tick(&mut self, tick: usize, positions: Vec<(usize, usize)>, stats: SolverStats) {}

    /// Called when the board is replaced through an import so the saved
    /// replay describes the board the ticks actually ran on.
    #[allow(unused_variables)]
    fn log_board_replaced(&mut self, board_size: usize, layout: Vec<Vec<String>>) {}

    fn log_trapped(&mut self, tick: usize, ant: String, location: (usize, usize)) {
        self.log_event(tick, Event::new(EventType::Trapped, Some(ant), location));
    }

    fn log_dead_end_sealed(&mut self, tick: usize, location: (usize, usize)) {
        self.log_event(tick, Event::new(EventType::DeadEndSealed, None, location));
    }

    fn log_food_found(
        &mut self,
        tick: usize,
        ant: String,
        location: (usize, usize),
        path_length: usize,
    ) {
        let mut event = Event::new(EventType::FoodFound, Some(ant), location);
        event.path_length = Some(path_length);
        self.log_event(tick, event);
    }

    fn log_trip_completed(&mut self, tick: usize, ant: String, location: (usize, usize)) {
        self.log_event(tick, Event::new(EventType::TripCompleted, Some(ant), location));
    }

    #[allow(unused_variables)]
    fn log_event(&mut self, tick: usize, event: Event) {}

    fn save(&self) {}
}

#[derive(serde::Serialize)]
pub enum EventType {
    Trapped,
    DeadEndSealed,
    FoodFound,
    TripCompleted,
}

#[derive(serde::Serialize)]
pub struct Event {
    event_type: EventType,
    ant: Option<String>,
    location: (usize, usize),
    path_length: Option<usize>,
}

impl Event {
    fn new(event_type: EventType, ant: Option<String>, location: (usize, usize)) -> Event {
        Event {
            event_type,
            ant,
            location,
            path_length: None,
        }
    }
}

struct Tick {
    tick: usize,
    positions: Vec<(usize, usize)>,
    stats: SolverStats,
}

struct NoOpReplayLogger;
impl ReplayLogger for NoOpReplayLogger {}

struct JsonReplayLogger {
    filename: String,
    board_size: usize,
    layout: Vec<Vec<String>>,
    ticks: Vec<Tick>,
    events: HashMap<usize, Vec<Event>>,
}

impl JsonReplayLogger {
    pub fn new(filename: String, board_size: usize, layout: Vec<Vec<String>>) -> Self {
        JsonReplayLogger {
            filename,
            board_size,
            layout,
            ticks: Vec::new(),
            events: HashMap::new(),
        }
    }
}

impl ReplayLogger for JsonReplayLogger {
    fn log_tick(&mut self, tick: usize, positions: Vec<(usize, usize)>, stats: SolverStats) {
        self.ticks.push(Tick {
            tick,
            positions,
            stats,
        });
    }

    fn log_board_replaced(&mut self, board_size: usize, layout: Vec<Vec<String>>) {
        self.board_size = board_size;
        self.layout = layout;
    }

    fn log_event(&mut self, tick: usize, event: Event) {
        self.events.entry(tick).or_default().push(event);
    }

    fn save(&self) {
        let file = File::create(&self.filename).unwrap();
        let ticks: Vec<_> = self
            .ticks
            .iter()
            .map(|tick| {
                json!({
                    "tick": tick.tick,
                    "positions": tick.positions,
                    "stats": tick.stats,
                    "events": self.events.get(&tick.tick).unwrap_or(&Vec::new()),
                })
            })
            .collect();

        let data = json!({
            "board": {
                "size": self.board_size,
                "layout": self.layout,
            },
            "ticks": ticks,
        });

        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, &data).unwrap();
    }
}
