//! Stations, their tracks and outer terminals.

use serde::{Deserialize, Serialize};

use super::Direction;

/// Which timetable columns a station shows.
///
/// `arrival[d]` / `departure[d]` say whether the arrival / departure time
/// column is shown for direction `d` (0 outbound, 1 inbound). On disk only
/// six combinations can be written, see [`TimetableStyle::key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimetableStyle {
    pub arrival: [bool; 2],
    pub departure: [bool; 2],
}

const STYLES: [(&str, TimetableStyle); 6] = [
    ("Jikokukeisiki_Hatsu", TimetableStyle::DEPARTURE),
    ("Jikokukeisiki_Hatsuchaku", TimetableStyle::BOTH),
    (
        "Jikokukeisiki_KudariChaku",
        TimetableStyle {
            arrival: [true, false],
            departure: [false, true],
        },
    ),
    (
        "Jikokukeisiki_NoboriChaku",
        TimetableStyle {
            arrival: [false, true],
            departure: [true, false],
        },
    ),
    (
        "Jikokukeisiki_KudariHatsuchaku",
        TimetableStyle {
            arrival: [true, false],
            departure: [true, true],
        },
    ),
    (
        "Jikokukeisiki_NoboriHatsuchaku",
        TimetableStyle {
            arrival: [false, true],
            departure: [true, true],
        },
    ),
];

impl TimetableStyle {
    /// Departure times only, both directions. The default.
    pub const DEPARTURE: Self = Self {
        arrival: [false, false],
        departure: [true, true],
    };

    /// Arrival and departure times, both directions.
    pub const BOTH: Self = Self {
        arrival: [true, true],
        departure: [true, true],
    };

    /// Parse an on-disk `Ekijikokukeisiki` value.
    pub fn from_key(key: &str) -> Option<Self> {
        STYLES
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, style)| *style)
    }

    /// The on-disk value for this style.
    ///
    /// Combinations with no on-disk name are written as the nearest
    /// canonical style: arrival-and-departure when any arrival column is
    /// shown, departure-only otherwise.
    pub fn key(&self) -> &'static str {
        if let Some((name, _)) = STYLES.iter().find(|(_, style)| style == self) {
            return *name;
        }
        if self.arrival.iter().any(|shown| *shown) {
            STYLES[1].0
        } else {
            STYLES[0].0
        }
    }

    pub fn shows_arrival(&self, direction: Direction) -> bool {
        self.arrival[direction.index()]
    }

    pub fn shows_departure(&self, direction: Direction) -> bool {
        self.departure[direction.index()]
    }
}

impl Default for TimetableStyle {
    fn default() -> Self {
        Self::DEPARTURE
    }
}

/// When a diagram labels trains at a station.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagramInfo {
    /// Always label.
    Anyway,
    /// Label trains that start here.
    #[default]
    Origin,
    /// Never label.
    Not,
}

impl DiagramInfo {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "DiagramRessyajouhouHyouji_Anyway" => Some(DiagramInfo::Anyway),
            "DiagramRessyajouhouHyouji_Origin" => Some(DiagramInfo::Origin),
            "DiagramRessyajouhouHyouji_Not" => Some(DiagramInfo::Not),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            DiagramInfo::Anyway => "DiagramRessyajouhouHyouji_Anyway",
            DiagramInfo::Origin => "DiagramRessyajouhouHyouji_Origin",
            DiagramInfo::Not => "DiagramRessyajouhouHyouji_Not",
        }
    }
}

/// A platform track at a station.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StationTrack {
    pub name: String,
    /// Outbound and inbound abbreviations. An empty inbound abbreviation
    /// means "same as outbound".
    pub abbreviations: [String; 2],
}

impl StationTrack {
    /// A track with the given name and outbound abbreviation.
    pub fn new(name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abbreviations: [abbreviation.into(), String::new()],
        }
    }

    /// The abbreviation shown for a direction.
    pub fn abbreviation(&self, direction: Direction) -> &str {
        match direction {
            Direction::Inbound if !self.abbreviations[1].is_empty() => &self.abbreviations[1],
            _ => &self.abbreviations[0],
        }
    }

    /// The two tracks every station gets when none are listed.
    pub fn default_pair() -> Vec<Self> {
        vec![Self::new("1番線", "1"), Self::new("2番線", "2")]
    }
}

/// A terminal beyond the end of the modelled line, for through services.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OuterTerminal {
    pub name: String,
    pub timetable_abbreviation: Option<String>,
    pub diagram_abbreviation: Option<String>,
}

/// A reference to another station, used for branch and loop topologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StationLink {
    /// Index into the railway's station list. Not bounds-checked.
    pub station: usize,
    /// Whether the link runs against the railway's station order.
    pub opposite: bool,
}

/// A station on the railway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    /// Short name for diagram display
    pub abbreviation: String,
    pub timetable_style: TimetableStyle,
    /// Main (`Ekikibo_Syuyou`) rather than ordinary station
    pub is_main: bool,
    /// Line-boundary marker drawn below this station
    pub is_boundary: bool,
    /// Diagram train-label mode, per direction
    pub diagram_info: [DiagramInfo; 2],
    /// Index into `tracks` of the main track, per direction
    pub main_track: [usize; 2],
    /// Never empty
    pub tracks: Vec<StationTrack>,
    pub outer_terminals: Vec<OuterTerminal>,
    pub branch_core: Option<StationLink>,
    pub loop_origin: Option<StationLink>,
    pub timetable_track_omit: bool,
    pub diagram_track_display: bool,
    pub next_station_distance: Option<u32>,
}

impl Station {
    /// A station with the given name and default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The main track for a direction.
    pub fn main_track(&self, direction: Direction) -> Option<&StationTrack> {
        self.tracks.get(self.main_track[direction.index()])
    }

    /// Re-establish the track invariants after external edits: at least one
    /// track, and main-track indices inside the track list.
    pub fn normalize_tracks(&mut self) {
        if self.tracks.is_empty() {
            self.tracks = StationTrack::default_pair();
        }
        let last = self.tracks.len() - 1;
        for main in &mut self.main_track {
            *main = (*main).min(last);
        }
    }
}

impl Default for Station {
    fn default() -> Self {
        Self {
            name: String::new(),
            abbreviation: String::new(),
            timetable_style: TimetableStyle::default(),
            is_main: false,
            is_boundary: false,
            diagram_info: [DiagramInfo::default(); 2],
            main_track: [0, 1],
            tracks: StationTrack::default_pair(),
            outer_terminals: Vec::new(),
            branch_core: None,
            loop_origin: None,
            timetable_track_omit: false,
            diagram_track_display: false,
            next_station_distance: None,
        }
    }
}
