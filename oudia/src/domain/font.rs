//! Font descriptors.
//!
//! A font is written as `;`-separated `key=value` pairs, for example
//! `PointTextHeight=9;Facename=ＭＳ ゴシック;Bold=1`. The italic key keeps
//! the format's historical spelling, `Itaric`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Face used when a descriptor names none.
pub const DEFAULT_FONT_FAMILY: &str = "ＭＳ ゴシック";

/// Point height used when a descriptor names none.
pub const DEFAULT_FONT_HEIGHT: u32 = 9;

const KEY_HEIGHT: &str = "PointTextHeight";
const KEY_FAMILY: &str = "Facename";
const KEY_BOLD: &str = "Bold";
const KEY_ITALIC: &str = "Itaric";

/// A font descriptor.
///
/// # Examples
///
/// ```
/// use oudia::domain::Font;
///
/// let font = Font::parse("PointTextHeight=12;Bold=1");
/// assert_eq!(font.height, 12);
/// assert!(font.bold);
/// assert!(!font.italic);
/// assert_eq!(font.to_string(), "PointTextHeight=12;Facename=ＭＳ ゴシック;Bold=1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    /// Height in points
    pub height: u32,
    /// Font family name
    pub family: String,
    pub bold: bool,
    pub italic: bool,
}

impl Font {
    /// Parse a descriptor. Missing or unparseable fields take their defaults
    /// and unknown keys are ignored, so this never fails.
    pub fn parse(s: &str) -> Self {
        let mut font = Self::default();

        for pair in s.split(';') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                KEY_HEIGHT => {
                    if let Ok(height) = value.trim().parse() {
                        font.height = height;
                    }
                }
                KEY_FAMILY => font.family = value.to_string(),
                KEY_BOLD => font.bold = value == "1",
                KEY_ITALIC => font.italic = value == "1",
                _ => {}
            }
        }

        font
    }
}

impl Default for Font {
    fn default() -> Self {
        Self {
            height: DEFAULT_FONT_HEIGHT,
            family: DEFAULT_FONT_FAMILY.to_string(),
            bold: false,
            italic: false,
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `;` separates fields and line breaks end the attribute line, so
        // neither can appear in a written family name.
        let family = self.family.replace([';', '\r', '\n'], " ");
        write!(f, "{KEY_HEIGHT}={};{KEY_FAMILY}={family}", self.height)?;
        if self.bold {
            write!(f, ";{KEY_BOLD}=1")?;
        }
        if self.italic {
            write!(f, ";{KEY_ITALIC}=1")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_in_family_are_replaced() {
        let font = Font {
            family: "A;B\nC".into(),
            ..Font::default()
        };
        assert_eq!(font.to_string(), "PointTextHeight=9;Facename=A B C");

        let reparsed = Font::parse(&font.to_string());
        assert_eq!(reparsed.family, "A B C");
        assert_eq!(reparsed.height, 9);
    }

    #[test]
    fn empty_descriptor_is_default() {
        assert_eq!(Font::parse(""), Font::default());
    }

    #[test]
    fn parse_all_keys() {
        let font = Font::parse("PointTextHeight=11;Facename=MS Mincho;Bold=1;Itaric=1");
        assert_eq!(font.height, 11);
        assert_eq!(font.family, "MS Mincho");
        assert!(font.bold);
        assert!(font.italic);
    }

    #[test]
    fn unknown_keys_ignored() {
        let font = Font::parse("Weight=700;PointTextHeight=10;garbage");
        assert_eq!(font.height, 10);
        assert_eq!(font.family, DEFAULT_FONT_FAMILY);
    }

    #[test]
    fn bad_height_keeps_default() {
        assert_eq!(Font::parse("PointTextHeight=big").height, DEFAULT_FONT_HEIGHT);
    }

    #[test]
    fn flags_only_set_by_one() {
        let font = Font::parse("Bold=0;Itaric=yes");
        assert!(!font.bold);
        assert!(!font.italic);
    }

    #[test]
    fn display_omits_false_flags() {
        assert_eq!(
            Font::default().to_string(),
            "PointTextHeight=9;Facename=ＭＳ ゴシック"
        );

        let font = Font {
            italic: true,
            ..Font::default()
        };
        assert_eq!(
            font.to_string(),
            "PointTextHeight=9;Facename=ＭＳ ゴシック;Itaric=1"
        );
    }

    #[test]
    fn display_then_parse() {
        let font = Font {
            height: 14,
            family: "Meiryo".into(),
            bold: true,
            italic: false,
        };
        assert_eq!(Font::parse(&font.to_string()), font);
    }
}
