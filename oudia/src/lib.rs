//! Reader and writer for the OuDia train diagram format.
//!
//! OuDia documents describe a railway line: its stations, train categories
//! and one or more schedule sets ("diagrams"), each holding outbound and
//! inbound trains with per-station stop types and times. The text format is
//! line oriented, with nested blocks opened by `Name.` and closed by `.`.
//!
//! ```
//! let text = "FileType=OuDia.1.02\nRosen.\nRosenmei=Line1\nEki.\nEkimei=A\n.\n.\n";
//! let file = oudia::parse(text).unwrap();
//! assert_eq!(file.railway.name, "Line1");
//!
//! let written = oudia::serialize(&file, "example");
//! assert!(written.starts_with("FileType=OuDiaSecond.1.04\n"));
//! ```
//!
//! Text must already be decoded; byte encodings such as Shift_JIS are the
//! caller's concern.

pub mod config;
pub mod domain;
pub mod error;
pub mod format;

use tracing::debug;

pub use config::{DEFAULT_FILE_TYPE, ParseOptions, WriteOptions};
pub use domain::OuDiaFile;
pub use error::{ParseError, ParseWarning};

use format::{Diagnostics, FromRaw};

/// Conventional extension for OuDia documents.
pub const FILE_EXTENSION: &str = ".oud";

/// Conventional extension for OuDiaSecond documents.
pub const FILE_EXTENSION_SECOND: &str = ".oud2";

/// A parsed document together with the problems recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub file: OuDiaFile,
    pub warnings: Vec<ParseWarning>,
}

/// Parse a document with default options.
///
/// Recoverable problems are logged and otherwise ignored; use
/// [`parse_with`] to inspect them.
pub fn parse(text: &str) -> Result<OuDiaFile, ParseError> {
    parse_with(text, &ParseOptions::default()).map(|parsed| parsed.file)
}

/// Parse a document, returning the warnings alongside it.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Parsed, ParseError> {
    let mut diagnostics = Diagnostics::new();
    let root = format::parse_document(text, &mut diagnostics)?;
    let file = OuDiaFile::from_raw(&root, &mut diagnostics);
    let warnings = diagnostics.into_warnings();

    debug!(
        warnings = warnings.len(),
        strict = options.strict,
        "parsed document"
    );

    if options.strict {
        let count = warnings.len();
        if let Some(first) = warnings.into_iter().next() {
            return Err(ParseError::Rejected { first, count });
        }
        return Ok(Parsed {
            file,
            warnings: Vec::new(),
        });
    }

    Ok(Parsed { file, warnings })
}

/// Parse a document on the blocking thread pool.
pub async fn parse_async(text: String) -> Result<OuDiaFile, ParseError> {
    tokio::task::spawn_blocking(move || parse(&text))
        .await
        .map_err(|e| ParseError::Task(e.to_string()))?
}

/// Serialize a document with the default version tag.
pub fn serialize(file: &OuDiaFile, app_comment: &str) -> String {
    serialize_with(file, &WriteOptions::new(app_comment))
}

/// Serialize a document.
pub fn serialize_with(file: &OuDiaFile, options: &WriteOptions) -> String {
    format::write_document(file, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Color, Diagram, Direction, DisplayProperty, LineStyle, OuterTerminal, Station,
        StationLink, StationTimeEntry, StationTrack, StopType, TimeOfDay, Train, TrainType,
    };

    const MINIMAL: &str = "Rosen.\nRosenmei=Line1\nEki.\nEkimei=A\n.\nEki.\nEkimei=B\n.\n.\n";

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn station_names(file: &OuDiaFile) -> Vec<&str> {
        file.railway
            .stations
            .iter()
            .map(|station| station.name.as_str())
            .collect()
    }

    #[test]
    fn two_station_line() {
        init_tracing();
        let file = parse(MINIMAL).unwrap();

        assert_eq!(file.railway.name, "Line1");
        assert_eq!(station_names(&file), vec!["A", "B"]);
        for station in &file.railway.stations {
            assert_eq!(station.tracks.len(), 2);
        }

        let written = serialize(&file, "test");
        assert_eq!(written.matches("\nEki.\n").count(), 2);

        let reparsed = parse(&written).unwrap();
        assert_eq!(station_names(&reparsed), vec!["A", "B"]);
        assert_eq!(reparsed.railway, file.railway);
    }

    #[test]
    fn unknown_block_names_line() {
        let text = "FileType=OuDia.1.02\nRosen.\nRosenmei=L\nZzz.\nX=1\n.\n.\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, ParseError::UnknownBlock { line: 4, ref name } if name == "Zzz"));
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn crlf_input() {
        let file = parse(&MINIMAL.replace('\n', "\r\n")).unwrap();
        assert_eq!(station_names(&file), vec!["A", "B"]);
    }

    #[test]
    fn warnings_reported() {
        let text = "Rosen.\nRosenmei=L\n???\nKitenJikoku=abc\n.\n";
        let parsed = parse_with(text, &ParseOptions::default()).unwrap();
        assert_eq!(parsed.file.railway.name, "L");
        assert_eq!(parsed.file.railway.day_start, TimeOfDay::from_hms(4, 0, 0));
        assert_eq!(parsed.warnings.len(), 2);
        assert_eq!(parsed.warnings[0].line(), Some(3));
    }

    #[test]
    fn strict_mode_rejects_warnings() {
        let text = "Rosen.\nRosenmei=L\n???\nKitenJikoku=abc\n.\n";
        let err = parse_with(text, &ParseOptions::new().with_strict(true)).unwrap_err();
        assert!(matches!(err, ParseError::Rejected { count: 2, .. }));
        assert_eq!(err.line(), Some(3));

        let parsed = parse_with(MINIMAL, &ParseOptions::new().with_strict(true)).unwrap();
        assert!(parsed.warnings.is_empty());
    }

    fn sample_file() -> OuDiaFile {
        let mut file = OuDiaFile::new("Sample Line");
        let railway = &mut file.railway;
        railway.direction_names = ["Down".into(), "Up".into()];
        railway.day_start = TimeOfDay::from_hms(3, 30, 0);
        railway.comment = "first line\nsecond line".into();
        railway.operation_enabled = true;

        let mut terminus = Station::new("Terminus");
        terminus.is_main = true;
        terminus.timetable_style.arrival = [true, true];
        terminus.tracks = vec![
            StationTrack::new("1番線", "1"),
            StationTrack::new("2番線", "2"),
            StationTrack {
                name: "3番線".into(),
                abbreviations: ["3".into(), "III".into()],
            },
        ];
        terminus.main_track = [2, 1];
        terminus.outer_terminals.push(OuterTerminal {
            name: "Beyond".into(),
            timetable_abbreviation: Some("Bey".into()),
            diagram_abbreviation: None,
        });

        let mut junction = Station::new("Junction");
        junction.is_boundary = true;
        junction.branch_core = Some(StationLink {
            station: 0,
            opposite: false,
        });
        junction.next_station_distance = Some(42);

        railway.stations = vec![terminus, junction, Station::new("End")];

        let mut rapid = TrainType::new("Rapid");
        rapid.abbreviation = "R".into();
        rapid.stroke_color = Color::rgb(0x12, 0x34, 0x56);
        rapid.line_style = LineStyle::DashDot;
        rapid.is_bold = true;
        rapid.draws_stop_mark = false;
        rapid.parent = Some(0);
        railway.train_types = vec![TrainType::new("Local"), rapid];

        let mut outbound = Train::new(Direction::Outbound);
        outbound.number = "101".into();
        outbound.train_type = 1;
        outbound.schedule.set(
            0,
            StationTimeEntry::stop().with_departure(TimeOfDay::from_hms(6, 0, 0)),
        );
        outbound.schedule.set(1, StationTimeEntry::pass());
        outbound.schedule.set(
            2,
            StationTimeEntry::stop()
                .with_arrival(TimeOfDay::from_hms(6, 20, 30))
                .with_departure(TimeOfDay::from_hms(6, 21, 0)),
        );
        outbound.note = Some("runs daily".into());
        outbound.operation = Some("Operation2B=5/1".into());

        let mut inbound = Train::new(Direction::Inbound);
        inbound.number = "102".into();
        inbound.car_count = "4".into();
        inbound.schedule.set(
            1,
            StationTimeEntry::stop().with_departure(TimeOfDay::from_hms(7, 5, 0)),
        );

        let mut weekday = Diagram::new("Weekday");
        weekday.trains_mut(Direction::Outbound).push(outbound);
        weekday.trains_mut(Direction::Inbound).push(inbound);
        railway.diagrams = vec![weekday, Diagram::new("Holiday")];

        file.display = DisplayProperty {
            station_name_length: 7,
            diagram_axis_color: Color::rgb(0x80, 0x80, 0x80),
            ..DisplayProperty::default()
        };
        file.display.timetable_fonts[1].bold = true;
        file
    }

    #[test]
    fn full_document_survives_round_trip() {
        init_tracing();
        let file = sample_file();
        let text = serialize(&file, "oudia test");

        let parsed = parse_with(&text, &ParseOptions::new().with_strict(true)).unwrap();
        assert_eq!(parsed.file.file_type, DEFAULT_FILE_TYPE);
        assert_eq!(parsed.file.app_comment, "oudia test");
        assert!(parsed.file.is_second_format());
        assert_eq!(parsed.file.railway, file.railway);
        assert_eq!(parsed.file.display, file.display);

        assert_eq!(serialize(&parsed.file, "oudia test"), text);
    }

    #[test]
    fn not_via_gap_written_and_read_back() {
        let mut file = OuDiaFile::new("L");
        let mut train = Train::new(Direction::Outbound);
        train.schedule.set(1, StationTimeEntry::stop());
        train.schedule.set(3, StationTimeEntry::stop());
        let mut diagram = Diagram::new("D");
        diagram.trains_mut(Direction::Outbound).push(train);
        file.railway.diagrams.push(diagram);

        let text = serialize(&file, "");
        assert!(text.contains("EkiJikoku=,1;,3,1;\n"));

        let reparsed = parse(&text).unwrap();
        let schedule = &reparsed.railway.diagrams[0].trains(Direction::Outbound)[0].schedule;
        assert!(schedule.get(2).is_none());
        assert_eq!(schedule.get(3).unwrap().stop_type, StopType::Stop);
    }

    #[test]
    fn line_breaks_in_names_do_not_break_reload() {
        let mut file = OuDiaFile::new("Line\nOne");
        file.railway.stations = vec![Station::new("A\nZzz."), Station::new("B")];
        let mut diagram = Diagram::new("Week\r\nday");
        let mut train = Train::new(Direction::Outbound);
        train.name = "Limited\n.".into();
        diagram.trains_mut(Direction::Outbound).push(train);
        file.railway.diagrams.push(diagram);

        let text = serialize(&file, "app\nname");
        let parsed = parse(&text).unwrap();
        let railway = &parsed.railway;
        assert_eq!(railway.name, "Line One");
        assert_eq!(station_names(&parsed), vec!["A Zzz.", "B"]);
        assert_eq!(railway.diagrams[0].name, "Week day");
        assert_eq!(railway.diagrams[0].trains(Direction::Outbound)[0].name, "Limited .");
        assert_eq!(parsed.app_comment, "app name");
    }

    #[test]
    fn stray_close_after_railway_is_tolerated() {
        let text = "FileType=OuDia.1.02\nRosen.\nRosenmei=L\n.\n.\n";
        let parsed = parse_with(text, &ParseOptions::default()).unwrap();
        assert_eq!(parsed.file.railway.name, "L");
        assert_eq!(
            parsed.warnings,
            vec![ParseWarning::UnexpectedBlockEnd { line: 5 }]
        );

        let err = parse_with(text, &ParseOptions::new().with_strict(true)).unwrap_err();
        assert_eq!(err.line(), Some(5));
    }

    #[test]
    fn far_future_times_written_within_a_day() {
        let mut file = OuDiaFile::new("L");
        let mut train = Train::new(Direction::Outbound);
        train.schedule.set(
            0,
            StationTimeEntry::stop().with_departure(TimeOfDay::from_hms(100, 0, 0)),
        );
        let mut diagram = Diagram::new("D");
        diagram.trains_mut(Direction::Outbound).push(train);
        file.railway.diagrams.push(diagram);

        let text = serialize(&file, "");
        assert!(text.contains("EkiJikoku=1;400\n"));
        let reparsed = parse(&text).unwrap();
        let entry = reparsed.railway.diagrams[0].trains(Direction::Outbound)[0]
            .schedule
            .get(0)
            .unwrap()
            .departure;
        assert_eq!(entry, Some(TimeOfDay::from_hms(4, 0, 0)));
    }

    #[test]
    fn tracks_written_on_request() {
        let mut file = OuDiaFile::new("L");
        let mut train = Train::new(Direction::Outbound);
        train.schedule.set(
            0,
            StationTimeEntry::stop()
                .with_departure(TimeOfDay::from_hms(8, 0, 0))
                .with_track(1),
        );
        let mut diagram = Diagram::new("D");
        diagram.trains_mut(Direction::Outbound).push(train);
        file.railway.diagrams.push(diagram);

        let legacy = serialize(&file, "");
        assert!(legacy.contains("EkiJikoku=1;800\n"));

        let text = serialize_with(&file, &WriteOptions::new("").with_tracks(true));
        assert!(text.contains("EkiJikoku=1;800$1\n"));
        let reparsed = parse(&text).unwrap();
        assert_eq!(reparsed.railway, file.railway);
    }

    #[test]
    fn custom_file_type() {
        let options = WriteOptions::new("x").with_file_type("OuDia.1.02");
        let text = serialize_with(&OuDiaFile::new("L"), &options);
        assert!(text.starts_with("FileType=OuDia.1.02\n"));
        assert!(!parse(&text).unwrap().is_second_format());
    }

    #[test]
    fn json_snapshot() {
        let file = parse(MINIMAL).unwrap();
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["railway"]["name"], "Line1");
        assert_eq!(json["railway"]["stations"][1]["name"], "B");
        assert_eq!(json["railway"]["day_start"], 14400);

        let back: OuDiaFile = serde_json::from_value(json).unwrap();
        assert_eq!(back, file);
    }

    #[test]
    fn extensions() {
        assert_eq!(FILE_EXTENSION, ".oud");
        assert_eq!(FILE_EXTENSION_SECOND, ".oud2");
    }

    #[tokio::test]
    async fn parse_off_the_runtime() {
        let file = parse_async(MINIMAL.to_string()).await.unwrap();
        assert_eq!(station_names(&file), vec!["A", "B"]);

        let err = parse_async("Zzz.\n.\n".to_string()).await.unwrap_err();
        assert_eq!(err.line(), Some(1));
    }
}
