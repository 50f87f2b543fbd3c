//! Diagrams (schedule sets) and the trains they contain.

use serde::{Deserialize, Serialize};

use super::{Direction, StationTime, TimeOfDay};

/// A single train.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Train {
    pub direction: Direction,
    /// Index into the railway's train types. Not bounds-checked.
    pub train_type: usize,
    /// Train number, free text
    pub number: String,
    pub name: String,
    /// Car count, free text
    pub car_count: String,
    /// Schedule, indexed in this train's direction
    pub schedule: StationTime,
    pub note: Option<String>,
    /// Opaque legacy operation line, kept verbatim
    pub operation: Option<String>,
}

impl Train {
    /// An empty train running in `direction`.
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            train_type: 0,
            number: String::new(),
            name: String::new(),
            car_count: String::new(),
            schedule: StationTime::new(),
            note: None,
            operation: None,
        }
    }

    /// The first time recorded anywhere in the schedule: departure,
    /// or arrival when no departure is recorded.
    pub fn origin_time(&self) -> Option<TimeOfDay> {
        self.schedule
            .iter()
            .find_map(|(_, entry)| entry.departure.or(entry.arrival))
    }

    /// The last time recorded anywhere in the schedule: arrival,
    /// or departure when no arrival is recorded.
    pub fn terminal_time(&self) -> Option<TimeOfDay> {
        self.schedule
            .iter()
            .rev()
            .find_map(|(_, entry)| entry.arrival.or(entry.departure))
    }
}

impl Default for Train {
    fn default() -> Self {
        Self::new(Direction::Outbound)
    }
}

/// A named schedule set, for example "Weekday" or "Holiday".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagram {
    pub name: String,
    /// Main and sub background color indices
    pub background_colors: [usize; 2],
    pub pattern: usize,
    /// Outbound trains at index 0, inbound at index 1
    pub trains: [Vec<Train>; 2],
}

impl Diagram {
    /// An empty diagram with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Trains running in `direction`.
    pub fn trains(&self, direction: Direction) -> &[Train] {
        &self.trains[direction.index()]
    }

    /// Mutable access to the trains running in `direction`.
    pub fn trains_mut(&mut self, direction: Direction) -> &mut Vec<Train> {
        &mut self.trains[direction.index()]
    }

    /// Total number of trains in both directions.
    pub fn train_count(&self) -> usize {
        self.trains.iter().map(Vec::len).sum()
    }
}
