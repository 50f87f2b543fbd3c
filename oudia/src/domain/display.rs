//! Document-wide display settings (`DispProp`).

use serde::{Deserialize, Serialize};

use super::{Color, Font};

/// Number of timetable font slots a fresh document gets.
pub const TIMETABLE_FONT_SLOTS: usize = 8;

/// Number of timetable background color slots a fresh document gets.
pub const TIMETABLE_BACK_COLOR_SLOTS: usize = 4;

/// Fonts, colors and sizes used when rendering timetables and diagrams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayProperty {
    /// Timetable fonts, selected by [`TrainType::font_index`](super::TrainType::font_index)
    pub timetable_fonts: Vec<Font>,
    pub timetable_vertical_font: Font,
    pub diagram_station_font: Font,
    pub diagram_time_font: Font,
    pub diagram_train_font: Font,
    pub comment_font: Font,
    pub diagram_text_color: Color,
    pub diagram_background_color: Color,
    pub diagram_train_color: Color,
    pub diagram_axis_color: Color,
    pub timetable_back_colors: Vec<Color>,
    /// Station name column width, in characters
    pub station_name_length: u32,
    /// Train column width, in characters
    pub timetable_train_width: u32,
}

impl Default for DisplayProperty {
    fn default() -> Self {
        Self {
            timetable_fonts: vec![Font::default(); TIMETABLE_FONT_SLOTS],
            timetable_vertical_font: Font::default(),
            diagram_station_font: Font::default(),
            diagram_time_font: Font::default(),
            diagram_train_font: Font::default(),
            comment_font: Font::default(),
            diagram_text_color: Color::BLACK,
            diagram_background_color: Color::WHITE,
            diagram_train_color: Color::BLACK,
            diagram_axis_color: Color::SILVER,
            timetable_back_colors: vec![Color::WHITE; TIMETABLE_BACK_COLOR_SLOTS],
            station_name_length: 6,
            timetable_train_width: 5,
        }
    }
}

impl DisplayProperty {
    /// The timetable font at `index`, or the default font when out of range.
    pub fn timetable_font(&self, index: usize) -> Font {
        self.timetable_fonts.get(index).cloned().unwrap_or_default()
    }
}
