//! Time-of-day handling for OuDia schedules.
//!
//! OuDia writes times as bare digit strings with no separators: `HMM` or
//! `HHMM` for whole minutes (e.g. `600` for 06:00, `1230` for 12:30) and
//! `HMMSS` or `HHMMSS` when seconds are present. Hours are not limited to
//! 0-23; a diagram's day may run past midnight and times are interpreted
//! relative to the railway's day-start offset.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of seconds in one day.
pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Largest hour the compact notation can hold.
pub const MAX_COMPACT_HOUR: u32 = 99;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day, stored as seconds since midnight.
///
/// # Examples
///
/// ```
/// use oudia::domain::TimeOfDay;
///
/// let t = TimeOfDay::parse_compact("1230").unwrap();
/// assert_eq!(t.seconds(), 12 * 3600 + 30 * 60);
/// assert_eq!(t.to_string(), "1230");
///
/// let t = TimeOfDay::parse_compact("63015").unwrap();
/// assert_eq!((t.hour(), t.minute(), t.second()), (6, 30, 15));
/// assert_eq!(t.to_string(), "63015");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// 00:00:00.
    pub const MIDNIGHT: Self = Self(0);

    /// Create a time from seconds since midnight.
    pub const fn from_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    /// Create a time from hour, minute and second components.
    pub const fn from_hms(hour: u32, minute: u32, second: u32) -> Self {
        Self(hour * 3600 + minute * 60 + second)
    }

    /// Parse the compact on-disk notation.
    ///
    /// Accepts 3-4 digits (`HMM`/`HHMM`) or 5-6 digits (`HMMSS`/`HHMMSS`).
    /// Minutes and seconds must be below 60.
    ///
    /// ```
    /// use oudia::domain::TimeOfDay;
    ///
    /// assert!(TimeOfDay::parse_compact("000").is_ok());
    /// assert!(TimeOfDay::parse_compact("2359").is_ok());
    /// assert!(TimeOfDay::parse_compact("2530").is_ok()); // past midnight
    ///
    /// assert!(TimeOfDay::parse_compact("12").is_err());
    /// assert!(TimeOfDay::parse_compact("1260").is_err());
    /// assert!(TimeOfDay::parse_compact("12:30").is_err());
    /// ```
    pub fn parse_compact(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();

        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(TimeError::new("expected digits only"));
        }

        let (hour_digits, minute_digits, second_digits) = match bytes.len() {
            3 | 4 => {
                let split = bytes.len() - 2;
                (&bytes[..split], &bytes[split..], None)
            }
            5 | 6 => {
                let split = bytes.len() - 4;
                (
                    &bytes[..split],
                    &bytes[split..split + 2],
                    Some(&bytes[split + 2..]),
                )
            }
            _ => return Err(TimeError::new("expected 3 to 6 digits")),
        };

        let hour = parse_digits(hour_digits);
        let minute = parse_digits(minute_digits);
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let second = second_digits.map_or(0, parse_digits);
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        Ok(Self::from_hms(hour, minute, second))
    }

    /// Returns the number of seconds since midnight.
    pub fn seconds(self) -> u32 {
        self.0
    }

    /// Returns the hour. May exceed 23 for times past midnight.
    pub fn hour(self) -> u32 {
        self.0 / 3600
    }

    /// Returns the minute (0-59).
    pub fn minute(self) -> u32 {
        (self.0 / 60) % 60
    }

    /// Returns the second (0-59).
    pub fn second(self) -> u32 {
        self.0 % 60
    }

    /// Returns this time folded into a single day.
    pub fn wrapped(self) -> Self {
        Self(self.0 % SECONDS_PER_DAY)
    }

    /// Converts to a `NaiveTime`, wrapping times past midnight.
    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_num_seconds_from_midnight_opt(self.wrapped().0, 0)
            .unwrap_or(NaiveTime::MIN)
    }

    /// Seconds from `origin` forward to this time, wrapping around midnight.
    ///
    /// Used to order times within an operating day that starts at `origin`
    /// (the railway's day-start offset).
    pub fn since_day_start(self, origin: Self) -> u32 {
        (self.wrapped().0 + SECONDS_PER_DAY - origin.wrapped().0) % SECONDS_PER_DAY
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        Self(time.num_seconds_from_midnight())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_compact(s)
    }
}

impl fmt::Debug for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TimeOfDay({:02}:{:02}:{:02})",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

/// Writes the compact on-disk notation, omitting seconds when zero.
///
/// The notation has at most two hour digits, so times of
/// [`MAX_COMPACT_HOUR`] + 1 hours or later are written folded into a
/// single day.
impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = if self.hour() > MAX_COMPACT_HOUR {
            self.wrapped()
        } else {
            *self
        };
        if time.second() == 0 {
            write!(f, "{}{:02}", time.hour(), time.minute())
        } else {
            write!(f, "{}{:02}{:02}", time.hour(), time.minute(), time.second())
        }
    }
}

/// Parse a run of ASCII digit bytes. Callers have already checked the bytes.
fn parse_digits(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_three_and_four_digits() {
        let t = TimeOfDay::parse_compact("600").unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (6, 0, 0));

        let t = TimeOfDay::parse_compact("0600").unwrap();
        assert_eq!(t.seconds(), 6 * 3600);

        let t = TimeOfDay::parse_compact("2359").unwrap();
        assert_eq!((t.hour(), t.minute()), (23, 59));
    }

    #[test]
    fn parse_with_seconds() {
        let t = TimeOfDay::parse_compact("63015").unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (6, 30, 15));

        let t = TimeOfDay::parse_compact("123045").unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (12, 30, 45));
    }

    #[test]
    fn parse_past_midnight() {
        let t = TimeOfDay::parse_compact("2530").unwrap();
        assert_eq!(t.hour(), 25);
        assert_eq!(t.wrapped().hour(), 1);
    }

    #[test]
    fn reject_malformed() {
        assert!(TimeOfDay::parse_compact("").is_err());
        assert!(TimeOfDay::parse_compact("60").is_err());
        assert!(TimeOfDay::parse_compact("1234567").is_err());
        assert!(TimeOfDay::parse_compact("12a0").is_err());
        assert!(TimeOfDay::parse_compact("-600").is_err());
        assert!(TimeOfDay::parse_compact("1260").is_err());
        assert!(TimeOfDay::parse_compact("123060").is_err());
        assert!(TimeOfDay::parse_compact("６００").is_err());
    }

    #[test]
    fn error_display() {
        let err = TimeOfDay::parse_compact("1260").unwrap_err();
        assert_eq!(err.to_string(), "invalid time: minute must be 0-59");
    }

    #[test]
    fn display_compact() {
        assert_eq!(TimeOfDay::from_hms(0, 0, 0).to_string(), "000");
        assert_eq!(TimeOfDay::from_hms(4, 0, 0).to_string(), "400");
        assert_eq!(TimeOfDay::from_hms(12, 5, 0).to_string(), "1205");
        assert_eq!(TimeOfDay::from_hms(7, 5, 9).to_string(), "70509");
        assert_eq!(TimeOfDay::from_hms(0, 0, 30).to_string(), "00030");
    }

    #[test]
    fn display_folds_hours_past_two_digits() {
        assert_eq!(TimeOfDay::from_hms(99, 59, 0).to_string(), "9959");
        assert_eq!(TimeOfDay::from_hms(100, 0, 0).to_string(), "400");
        assert_eq!(TimeOfDay::from_hms(123, 10, 5).to_string(), "31005");

        let t = TimeOfDay::from_hms(100, 0, 0);
        assert_eq!(TimeOfDay::parse_compact(&t.to_string()).unwrap(), t.wrapped());
    }

    #[test]
    fn debug_format() {
        let t = TimeOfDay::from_hms(9, 3, 7);
        assert_eq!(format!("{t:?}"), "TimeOfDay(09:03:07)");
    }

    #[test]
    fn naive_time_conversion() {
        let t = TimeOfDay::from_hms(25, 10, 0);
        assert_eq!(
            t.to_naive_time(),
            NaiveTime::from_hms_opt(1, 10, 0).unwrap()
        );

        let back = TimeOfDay::from(NaiveTime::from_hms_opt(13, 45, 30).unwrap());
        assert_eq!(back, TimeOfDay::from_hms(13, 45, 30));
    }

    #[test]
    fn since_day_start_wraps() {
        let origin = TimeOfDay::from_hms(4, 0, 0);
        assert_eq!(TimeOfDay::from_hms(5, 0, 0).since_day_start(origin), 3600);
        assert_eq!(
            TimeOfDay::from_hms(1, 0, 0).since_day_start(origin),
            21 * 3600
        );
        assert_eq!(TimeOfDay::from_hms(4, 0, 0).since_day_start(origin), 0);
    }
}
