//! RGB colors and their three textual notations.
//!
//! OuDia writes colors as eight hex digits `XXBBGGRR`: a two-digit header
//! (always `00` when written) followed by the blue, green and red bytes.
//! This is the reverse of the common `#RRGGBB` web notation, which is
//! also accepted on input together with the `#RGB` shorthand.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a color string matches none of the accepted notations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color: {reason}")]
pub struct ColorError {
    reason: &'static str,
}

/// An RGB byte triple.
///
/// # Examples
///
/// ```
/// use oudia::domain::Color;
///
/// // On-disk order is blue, green, red after the header
/// let c = Color::parse("000000FF").unwrap();
/// assert_eq!(c, Color::rgb(0xFF, 0, 0));
///
/// let c = Color::parse("#FF8000").unwrap();
/// assert_eq!(c.to_string(), "000080FF");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    pub const SILVER: Self = Self::rgb(0xC0, 0xC0, 0xC0);

    /// Create a color from red, green and blue bytes.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse any of the three accepted notations.
    ///
    /// - `XXBBGGRR`: eight hex digits, on-disk order. The header is ignored.
    /// - `#RRGGBB`: web order.
    /// - `#RGB`: one hex digit per channel, taken as the channel value
    ///   itself (`#F00` is red 15, not 255).
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        if !s.is_ascii() {
            return Err(ColorError {
                reason: "must be ASCII",
            });
        }

        match s.strip_prefix('#') {
            Some(rgb) if rgb.len() == 6 => Ok(Self::rgb(
                hex_byte(&rgb[0..2])?,
                hex_byte(&rgb[2..4])?,
                hex_byte(&rgb[4..6])?,
            )),
            Some(rgb) if rgb.len() == 3 => Ok(Self::rgb(
                hex_byte(&rgb[0..1])?,
                hex_byte(&rgb[1..2])?,
                hex_byte(&rgb[2..3])?,
            )),
            Some(_) => Err(ColorError {
                reason: "expected #RRGGBB or #RGB",
            }),
            None if s.len() == 8 => {
                hex_byte(&s[0..2])?;
                Ok(Self::rgb(
                    hex_byte(&s[6..8])?,
                    hex_byte(&s[4..6])?,
                    hex_byte(&s[2..4])?,
                ))
            }
            None => Err(ColorError {
                reason: "expected 8 hex digits",
            }),
        }
    }

    /// Returns the `#RRGGBB` web notation.
    pub fn to_hex_rgb(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self.to_hex_rgb())
    }
}

/// Writes the on-disk `00BBGGRR` notation.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "00{:02X}{:02X}{:02X}", self.b, self.g, self.r)
    }
}

fn hex_byte(digits: &str) -> Result<u8, ColorError> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError {
            reason: "invalid hex digit",
        });
    }
    u8::from_str_radix(digits, 16).map_err(|_| ColorError {
        reason: "invalid hex digit",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_on_disk_order() {
        let c = Color::parse("00112233").unwrap();
        assert_eq!(c, Color::rgb(0x33, 0x22, 0x11));
    }

    #[test]
    fn on_disk_header_is_ignored() {
        assert_eq!(
            Color::parse("FF112233").unwrap(),
            Color::parse("00112233").unwrap()
        );
    }

    #[test]
    fn parse_web_notation() {
        assert_eq!(
            Color::parse("#112233").unwrap(),
            Color::rgb(0x11, 0x22, 0x33)
        );
        assert_eq!(
            Color::parse("#abcdef").unwrap(),
            Color::rgb(0xAB, 0xCD, 0xEF)
        );
    }

    #[test]
    fn shorthand_is_not_doubled() {
        assert_eq!(Color::parse("#F00").unwrap(), Color::rgb(0x0F, 0, 0));
        assert_eq!(Color::parse("#123").unwrap(), Color::rgb(1, 2, 3));
    }

    #[test]
    fn reject_malformed() {
        assert!(Color::parse("").is_err());
        assert!(Color::parse("#").is_err());
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("0011223").is_err());
        assert!(Color::parse("001122GG").is_err());
        assert!(Color::parse("#+12345").is_err());
        assert!(Color::parse("００112233").is_err());
    }

    #[test]
    fn display_is_upper_case_on_disk_order() {
        assert_eq!(Color::rgb(0xAB, 0xCD, 0xEF).to_string(), "00EFCDAB");
        assert_eq!(Color::WHITE.to_string(), "00FFFFFF");
        assert_eq!(Color::BLACK.to_string(), "00000000");
    }

    #[test]
    fn web_notation_output() {
        assert_eq!(Color::rgb(0xAB, 0xCD, 0xEF).to_hex_rgb(), "#ABCDEF");
        assert_eq!(
            format!("{:?}", Color::rgb(1, 2, 3)),
            "Color(#010203)"
        );
    }
}
