//! Train categories (`Ressyasyubetsu`).

use serde::{Deserialize, Serialize};

use super::Color;

/// Dash pattern for a train category's diagram line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "SenStyle_Jissen" => Some(LineStyle::Solid),
            "SenStyle_Hasen" => Some(LineStyle::Dashed),
            "SenStyle_Tensen" => Some(LineStyle::Dotted),
            "SenStyle_Ittensasen" => Some(LineStyle::DashDot),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            LineStyle::Solid => "SenStyle_Jissen",
            LineStyle::Dashed => "SenStyle_Hasen",
            LineStyle::Dotted => "SenStyle_Tensen",
            LineStyle::DashDot => "SenStyle_Ittensasen",
        }
    }
}

/// A train category such as "Local" or "Rapid".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainType {
    pub name: String,
    pub abbreviation: String,
    pub text_color: Color,
    /// Index into the display property's timetable fonts
    pub font_index: usize,
    pub background_color: Color,
    /// Diagram line color
    pub stroke_color: Color,
    pub line_style: LineStyle,
    pub is_bold: bool,
    /// Whether the diagram marks stops for this category
    pub draws_stop_mark: bool,
    /// Category this one derives from. A hint only, not enforced.
    pub parent: Option<usize>,
}

impl TrainType {
    /// A category with the given name and default styling.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for TrainType {
    fn default() -> Self {
        Self {
            name: String::new(),
            abbreviation: String::new(),
            text_color: Color::BLACK,
            font_index: 0,
            background_color: Color::WHITE,
            stroke_color: Color::BLACK,
            line_style: LineStyle::Solid,
            is_bold: false,
            draws_stop_mark: true,
            parent: None,
        }
    }
}
