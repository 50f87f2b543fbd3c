//! Per-train schedules and the compact `EkiJikoku` codec.
//!
//! A train's schedule is written as one comma-separated field per station,
//! in the station order of the train's own direction:
//!
//! ```text
//! ,,1;600,2,1;612/613$1,3,1;630/
//! ```
//!
//! Each non-empty field is `stopType[;time][$track]`, where `time` is either
//! `departure` or `arrival/departure`. Empty fields carry no data. Stop type
//! `3` (not via) means the train does not run through that station at all,
//! so it is never stored: absence and not-via are the same thing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::TimeOfDay;

/// How a train treats a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StopType {
    /// Stops; times are recorded.
    Stop,
    /// Runs through without stopping.
    Pass,
    /// Does not run through the station. Never stored in a [`StationTime`].
    NotVia,
}

impl StopType {
    /// Decode the on-disk numeric code.
    ///
    /// Code `0` (no data) and unknown codes have no stop type.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(StopType::Stop),
            2 => Some(StopType::Pass),
            3 => Some(StopType::NotVia),
            _ => None,
        }
    }

    /// Returns the on-disk numeric code.
    pub fn code(self) -> u8 {
        match self {
            StopType::Stop => 1,
            StopType::Pass => 2,
            StopType::NotVia => 3,
        }
    }
}

/// One station's entry in a train schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StationTimeEntry {
    pub stop_type: StopType,
    pub arrival: Option<TimeOfDay>,
    pub departure: Option<TimeOfDay>,
    /// Index into the station's track list
    pub track: Option<u32>,
}

impl StationTimeEntry {
    /// A stop with no recorded times.
    pub fn stop() -> Self {
        Self {
            stop_type: StopType::Stop,
            arrival: None,
            departure: None,
            track: None,
        }
    }

    /// A pass with no recorded times.
    pub fn pass() -> Self {
        Self {
            stop_type: StopType::Pass,
            ..Self::stop()
        }
    }

    /// Set the arrival time.
    pub fn with_arrival(mut self, time: TimeOfDay) -> Self {
        self.arrival = Some(time);
        self
    }

    /// Set the departure time.
    pub fn with_departure(mut self, time: TimeOfDay) -> Self {
        self.departure = Some(time);
        self
    }

    /// Set the track index.
    pub fn with_track(mut self, track: u32) -> Self {
        self.track = Some(track);
        self
    }

    fn encode_into(&self, out: &mut String, with_track: bool) {
        use std::fmt::Write as _;

        // Writing to a String cannot fail.
        let _ = write!(out, "{};", self.stop_type.code());
        if let Some(arrival) = self.arrival {
            let _ = write!(out, "{arrival}/");
        }
        if let Some(departure) = self.departure {
            let _ = write!(out, "{departure}");
        }
        if let Some(track) = self.track.filter(|_| with_track) {
            let _ = write!(out, "${track}");
        }
    }
}

/// A problem found in one schedule field while decoding.
///
/// Decoding never fails; the offending part is dropped and reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleIssue {
    /// Direction-relative station index of the field
    pub index: usize,
    /// The raw field text
    pub segment: String,
    pub reason: &'static str,
}

/// A train's schedule across the stations of its direction.
///
/// Stored as a sparse map from direction-relative station index to entry.
///
/// # Examples
///
/// ```
/// use oudia::domain::{StationTime, StopType};
///
/// let schedule = StationTime::decode(",,1;600,2,3,1;630/");
/// assert_eq!(schedule.first_station_index(), Some(2));
/// assert_eq!(schedule.terminal_station_index(), Some(5));
/// assert_eq!(schedule.get(3).unwrap().stop_type, StopType::Pass);
/// assert!(schedule.get(4).is_none());
/// assert_eq!(schedule.encode(), ",,1;600,2;,3,1;630/");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationTime {
    entries: BTreeMap<usize, StationTimeEntry>,
}

impl StationTime {
    /// An empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the compact on-disk form, logging any malformed fields.
    pub fn decode(raw: &str) -> Self {
        Self::decode_with(raw, |issue| {
            tracing::warn!(
                index = issue.index,
                segment = %issue.segment,
                reason = issue.reason,
                "malformed schedule field"
            );
        })
    }

    /// Decode the compact on-disk form, reporting malformed fields to `on_issue`.
    ///
    /// Malformed times become absent times, never zero. A field whose stop
    /// type cannot be read is skipped entirely. A malformed track is dropped.
    pub fn decode_with(raw: &str, mut on_issue: impl FnMut(ScheduleIssue)) -> Self {
        let mut schedule = Self::new();
        if raw.is_empty() {
            return schedule;
        }

        for (index, segment) in raw.split(',').enumerate() {
            if segment.is_empty() {
                continue;
            }
            let mut report = |reason: &'static str| {
                on_issue(ScheduleIssue {
                    index,
                    segment: segment.to_string(),
                    reason,
                })
            };

            let (body, track) = match segment.split_once('$') {
                Some((body, track)) => (body, Some(track)),
                None => (segment, None),
            };
            let (code, time) = match body.split_once(';') {
                Some((code, time)) => (code, Some(time)),
                None => (body, None),
            };

            let Some(stop_type) = code.trim().parse().ok().and_then(StopType::from_code) else {
                if code.trim() != "0" {
                    report("unknown stop type");
                }
                continue;
            };
            if stop_type == StopType::NotVia {
                schedule.entries.remove(&index);
                continue;
            }

            let (arrival, departure) = match time {
                None => (None, None),
                Some(time) => match time.split_once('/') {
                    Some((arrival, departure)) => (
                        parse_time(arrival, &mut report),
                        parse_time(departure, &mut report),
                    ),
                    None => (None, parse_time(time, &mut report)),
                },
            };

            let track = track.and_then(|t| match t.trim().parse() {
                Ok(track) => Some(track),
                Err(_) => {
                    report("invalid track");
                    None
                }
            });

            schedule.entries.insert(
                index,
                StationTimeEntry {
                    stop_type,
                    arrival,
                    departure,
                    track,
                },
            );
        }

        schedule
    }

    /// Encode in the legacy compact form, without track numbers.
    pub fn encode(&self) -> String {
        self.encode_inner(false)
    }

    /// Encode in the compact form, appending `$track` where a track is set.
    pub fn encode_with_tracks(&self) -> String {
        self.encode_inner(true)
    }

    fn encode_inner(&self, with_tracks: bool) -> String {
        let (Some(first), Some(terminal)) =
            (self.first_station_index(), self.terminal_station_index())
        else {
            return String::new();
        };

        let mut out = ",".repeat(first);
        for index in first..=terminal {
            if index > first {
                out.push(',');
            }
            match self.entries.get(&index) {
                Some(entry) => entry.encode_into(&mut out, with_tracks),
                None => out.push_str("3"),
            }
        }
        out
    }

    /// Lowest station index with an entry.
    pub fn first_station_index(&self) -> Option<usize> {
        self.entries.keys().next().copied()
    }

    /// Highest station index with an entry.
    pub fn terminal_station_index(&self) -> Option<usize> {
        self.entries.keys().next_back().copied()
    }

    /// Returns the entry for a station index, if the train serves it.
    pub fn get(&self, index: usize) -> Option<&StationTimeEntry> {
        self.entries.get(&index)
    }

    /// Returns a mutable entry for a station index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut StationTimeEntry> {
        self.entries.get_mut(&index)
    }

    /// Set the entry for a station index.
    ///
    /// Setting a [`StopType::NotVia`] entry removes the index instead.
    pub fn set(&mut self, index: usize, entry: StationTimeEntry) {
        if entry.stop_type == StopType::NotVia {
            self.entries.remove(&index);
        } else {
            self.entries.insert(index, entry);
        }
    }

    /// Remove the entry for a station index.
    pub fn remove(&mut self, index: usize) -> Option<StationTimeEntry> {
        self.entries.remove(&index)
    }

    /// Iterate entries in station-index order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, &StationTimeEntry)> {
        self.entries.iter().map(|(index, entry)| (*index, entry))
    }

    /// Number of stations with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_time(s: &str, report: &mut impl FnMut(&'static str)) -> Option<TimeOfDay> {
    if s.is_empty() {
        return None;
    }
    match TimeOfDay::parse_compact(s.trim()) {
        Ok(time) => Some(time),
        Err(_) => {
            report("invalid time");
            None
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn time() -> impl Strategy<Value = Option<TimeOfDay>> {
        proptest::option::of((0u32..48 * 3600).prop_map(TimeOfDay::from_seconds))
    }

    fn entry(with_track: bool) -> impl Strategy<Value = StationTimeEntry> {
        let track = if with_track {
            proptest::option::of(0u32..8).boxed()
        } else {
            Just(None).boxed()
        };
        (
            prop_oneof![Just(StopType::Stop), Just(StopType::Pass)],
            time(),
            time(),
            track,
        )
            .prop_map(|(stop_type, arrival, departure, track)| StationTimeEntry {
                stop_type,
                arrival,
                departure,
                track,
            })
    }

    /// Schedules with up to 12 entries over a range of 30 stations
    fn schedule(with_track: bool) -> impl Strategy<Value = StationTime> {
        proptest::collection::btree_map(0usize..30, entry(with_track), 0..12).prop_map(|map| {
            let mut schedule = StationTime::new();
            for (index, entry) in map {
                schedule.set(index, entry);
            }
            schedule
        })
    }

    proptest! {
        /// Legacy encoding round-trips schedules that carry no tracks
        #[test]
        fn roundtrip_without_tracks(schedule in schedule(false)) {
            let decoded = StationTime::decode(&schedule.encode());
            prop_assert_eq!(decoded.first_station_index(), schedule.first_station_index());
            prop_assert_eq!(decoded.terminal_station_index(), schedule.terminal_station_index());
            prop_assert_eq!(decoded, schedule);
        }

        /// Track-carrying encoding round-trips everything
        #[test]
        fn roundtrip_with_tracks(schedule in schedule(true)) {
            let decoded = StationTime::decode(&schedule.encode_with_tracks());
            prop_assert_eq!(decoded, schedule);
        }

        /// A not-via field never produces an entry, whatever follows it
        #[test]
        fn not_via_never_stored(
            index in 0usize..10,
            suffix in prop_oneof![
                Just(String::new()),
                "[0-9]{3,4}".prop_map(|t| format!(";{t}")),
                "[0-9]{3,4}/[0-9]{3,4}".prop_map(|t| format!(";{t}")),
                "[0-9;/]{0,8}",
            ],
        ) {
            let raw = format!("{}3{}", ",".repeat(index), suffix);
            let schedule = StationTime::decode_with(&raw, |_| {});
            prop_assert!(schedule.get(index).is_none());
        }
    }
}
