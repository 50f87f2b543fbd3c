//! The railway (`Rosen`): stations, train types and diagrams.

use serde::{Deserialize, Serialize};

use super::{Diagram, Direction, Station, TimeOfDay, TrainType};

/// Day-start offset used when a file names none: 4:00.
pub const DEFAULT_DAY_START: TimeOfDay = TimeOfDay::from_hms(4, 0, 0);

/// Default diagram spacing between adjacent stations.
pub const DEFAULT_STATION_SPACING: u32 = 60;

/// A railway line and everything that runs on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Railway {
    pub name: String,
    /// Display names for the outbound and inbound directions
    pub direction_names: [String; 2],
    /// Time at which the operating day starts
    pub day_start: TimeOfDay,
    pub station_spacing: u32,
    pub operation_enabled: bool,
    pub comment: String,
    /// Stations in outbound order
    pub stations: Vec<Station>,
    pub train_types: Vec<TrainType>,
    pub diagrams: Vec<Diagram>,
}

impl Railway {
    /// An empty railway with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Map a direction-relative station index (as used by train schedules)
    /// to an index into [`Railway::stations`].
    ///
    /// Returns `None` when the index is past the last station.
    ///
    /// ```
    /// use oudia::domain::{Direction, Railway, Station};
    ///
    /// let mut railway = Railway::new("Line");
    /// railway.stations = vec![Station::new("A"), Station::new("B"), Station::new("C")];
    ///
    /// assert_eq!(railway.station_index(Direction::Outbound, 0), Some(0));
    /// assert_eq!(railway.station_index(Direction::Inbound, 0), Some(2));
    /// assert_eq!(railway.station_index(Direction::Inbound, 3), None);
    /// ```
    pub fn station_index(&self, direction: Direction, index: usize) -> Option<usize> {
        let count = self.stations.len();
        if index >= count {
            return None;
        }
        match direction {
            Direction::Outbound => Some(index),
            Direction::Inbound => Some(count - 1 - index),
        }
    }

    /// The station at a direction-relative index.
    pub fn station(&self, direction: Direction, index: usize) -> Option<&Station> {
        self.station_index(direction, index)
            .and_then(|i| self.stations.get(i))
    }

    /// Display name for a direction, falling back to the on-disk key.
    pub fn direction_name(&self, direction: Direction) -> &str {
        let name = &self.direction_names[direction.index()];
        if name.is_empty() {
            direction.key()
        } else {
            name
        }
    }
}

impl Default for Railway {
    fn default() -> Self {
        Self {
            name: String::new(),
            direction_names: [String::new(), String::new()],
            day_start: DEFAULT_DAY_START,
            station_spacing: DEFAULT_STATION_SPACING,
            operation_enabled: false,
            comment: String::new(),
            stations: Vec::new(),
            train_types: Vec::new(),
            diagrams: Vec::new(),
        }
    }
}
