//! Domain types for OuDia documents.
//!
//! This module contains the typed entity graph a document is parsed into,
//! together with the small value codecs it is built from (colors, fonts,
//! times and per-train schedules). The graph is a plain ownership tree:
//! cross references such as a train's category are indices, and are not
//! bounds-checked here.

mod color;
mod diagram;
mod direction;
mod display;
mod file;
mod font;
mod railway;
mod station;
mod station_time;
mod time;
mod train_type;

pub use color::{Color, ColorError};
pub use diagram::{Diagram, Train};
pub use direction::Direction;
pub use display::{DisplayProperty, TIMETABLE_BACK_COLOR_SLOTS, TIMETABLE_FONT_SLOTS};
pub use file::OuDiaFile;
pub use font::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_HEIGHT, Font};
pub use railway::{DEFAULT_DAY_START, DEFAULT_STATION_SPACING, Railway};
pub use station::{
    DiagramInfo, OuterTerminal, Station, StationLink, StationTrack, TimetableStyle,
};
pub use station_time::{ScheduleIssue, StationTime, StationTimeEntry, StopType};
pub use time::{MAX_COMPACT_HOUR, SECONDS_PER_DAY, TimeError, TimeOfDay};
pub use train_type::{LineStyle, TrainType};
