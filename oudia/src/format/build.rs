//! Construction of typed entities from parsed blocks.
//!
//! Every field is read explicitly by key. A missing key gives the field's
//! default; a value that cannot be interpreted also gives the default and
//! records a [`ParseWarning::InvalidValue`].

use std::str::FromStr;

use tracing::debug;

use super::diagnostics::Diagnostics;
use super::lines::unescape_text;
use super::raw::RawNode;
use super::registry::OPERATION_SLOT;
use crate::domain::{
    Color, Diagram, DiagramInfo, Direction, DisplayProperty, Font, LineStyle, OuDiaFile,
    OuterTerminal, Railway, Station, StationLink, StationTime, StationTrack, TimeOfDay,
    TimetableStyle, Train, TrainType,
};
use crate::error::ParseWarning;

/// Build an entity from the block it is stored in.
pub trait FromRaw: Sized {
    fn from_raw(node: &RawNode, diagnostics: &mut Diagnostics) -> Self;
}

fn invalid(node: &RawNode, key: &str, value: &str, diagnostics: &mut Diagnostics) {
    diagnostics.warn(ParseWarning::InvalidValue {
        block: node.label(),
        key: key.to_string(),
        value: value.to_string(),
    });
}

/// Read `key` through `parse`, falling back to `default`.
fn value_or<T>(
    node: &RawNode,
    key: &str,
    default: T,
    diagnostics: &mut Diagnostics,
    parse: impl FnOnce(&str) -> Option<T>,
) -> T {
    match optional_value(node, key, diagnostics, parse) {
        Some(value) => value,
        None => default,
    }
}

/// Read `key` through `parse`. Absent and invalid values are both `None`.
fn optional_value<T>(
    node: &RawNode,
    key: &str,
    diagnostics: &mut Diagnostics,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    let raw = node.text(key)?;
    let value = parse(raw);
    if value.is_none() {
        invalid(node, key, raw, diagnostics);
    }
    value
}

fn text(node: &RawNode, key: &str) -> String {
    node.text(key).unwrap_or_default().to_string()
}

fn optional_text(node: &RawNode, key: &str) -> Option<String> {
    node.text(key).map(str::to_string)
}

fn number<T: FromStr>(node: &RawNode, key: &str, default: T, diagnostics: &mut Diagnostics) -> T {
    value_or(node, key, default, diagnostics, |s| s.trim().parse().ok())
}

fn flag(node: &RawNode, key: &str, diagnostics: &mut Diagnostics) -> bool {
    value_or(node, key, false, diagnostics, |s| match s {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    })
}

fn color(node: &RawNode, key: &str, default: Color, diagnostics: &mut Diagnostics) -> Color {
    value_or(node, key, default, diagnostics, |s| Color::parse(s).ok())
}

fn font(node: &RawNode, key: &str) -> Font {
    node.text(key).map(Font::parse).unwrap_or_default()
}

fn link(
    node: &RawNode,
    index_key: &str,
    opposite_key: &str,
    diagnostics: &mut Diagnostics,
) -> Option<StationLink> {
    let station = optional_value(node, index_key, diagnostics, |s| s.trim().parse().ok())?;
    Some(StationLink {
        station,
        opposite: flag(node, opposite_key, diagnostics),
    })
}

impl FromRaw for OuDiaFile {
    fn from_raw(root: &RawNode, diagnostics: &mut Diagnostics) -> Self {
        let railway = root
            .block("Rosen")
            .map(|node| Railway::from_raw(node, diagnostics))
            .unwrap_or_default();
        let display = root
            .block("DispProp")
            .map(|node| DisplayProperty::from_raw(node, diagnostics))
            .unwrap_or_default();

        let file = OuDiaFile {
            file_type: text(root, "FileType"),
            app_comment: text(root, "FileTypeAppComment"),
            railway,
            display,
        };
        debug!(
            file_type = %file.file_type,
            stations = file.railway.stations.len(),
            train_types = file.railway.train_types.len(),
            diagrams = file.railway.diagrams.len(),
            "built document"
        );
        file
    }
}

impl FromRaw for Railway {
    fn from_raw(node: &RawNode, diagnostics: &mut Diagnostics) -> Self {
        let defaults = Railway::default();
        Railway {
            name: text(node, "Rosenmei"),
            direction_names: [text(node, "KudariDiaAlias"), text(node, "NoboriDiaAlias")],
            day_start: value_or(node, "KitenJikoku", defaults.day_start, diagnostics, |s| {
                TimeOfDay::parse_compact(s).ok()
            }),
            station_spacing: number(
                node,
                "DiagramDgrYZahyouKyoriDefault",
                defaults.station_spacing,
                diagnostics,
            ),
            operation_enabled: flag(node, "EnableOperation", diagnostics),
            comment: node.text("Comment").map(unescape_text).unwrap_or_default(),
            stations: node
                .blocks("Eki")
                .into_iter()
                .map(|station| Station::from_raw(station, diagnostics))
                .collect(),
            train_types: node
                .blocks("Ressyasyubetsu")
                .into_iter()
                .map(|train_type| TrainType::from_raw(train_type, diagnostics))
                .collect(),
            diagrams: node
                .blocks("Dia")
                .into_iter()
                .map(|diagram| Diagram::from_raw(diagram, diagnostics))
                .collect(),
        }
    }
}

impl FromRaw for Station {
    fn from_raw(node: &RawNode, diagnostics: &mut Diagnostics) -> Self {
        let diagram_info = |key: &str, diagnostics: &mut Diagnostics| {
            value_or(node, key, DiagramInfo::default(), diagnostics, DiagramInfo::from_key)
        };

        let mut station = Station {
            name: text(node, "Ekimei"),
            abbreviation: text(node, "EkimeiDiaRyakusyou"),
            timetable_style: value_or(
                node,
                "Ekijikokukeisiki",
                TimetableStyle::default(),
                diagnostics,
                TimetableStyle::from_key,
            ),
            is_main: value_or(node, "Ekikibo", false, diagnostics, |s| match s {
                "Ekikibo_Syuyou" => Some(true),
                "Ekikibo_Ippan" => Some(false),
                _ => None,
            }),
            is_boundary: flag(node, "Kyoukaisen", diagnostics),
            diagram_info: [
                diagram_info("DiagramRessyajouhouHyoujiKudari", diagnostics),
                diagram_info("DiagramRessyajouhouHyoujiNobori", diagnostics),
            ],
            main_track: [
                number(node, "DownMain", 0, diagnostics),
                number(node, "UpMain", 1, diagnostics),
            ],
            tracks: node
                .block("EkiTrack2Cont")
                .map(|list| track_list(list, diagnostics))
                .unwrap_or_default(),
            outer_terminals: node
                .blocks("OuterTerminal")
                .into_iter()
                .map(|terminal| OuterTerminal::from_raw(terminal, diagnostics))
                .collect(),
            branch_core: link(node, "BrunchCoreEkiIndex", "BrunchOpposite", diagnostics),
            loop_origin: link(node, "LoopOriginEkiIndex", "LoopOpposite", diagnostics),
            timetable_track_omit: flag(node, "JikokuhyouTrackOmit", diagnostics),
            diagram_track_display: flag(node, "DiagramTrackDisplay", diagnostics),
            next_station_distance: optional_value(node, "NextEkiDistance", diagnostics, |s| {
                s.trim().parse().ok()
            }),
        };
        station.normalize_tracks();
        station
    }
}

/// The tracks of an `EkiTrack2Cont` block, in order.
pub fn track_list(node: &RawNode, diagnostics: &mut Diagnostics) -> Vec<StationTrack> {
    node.blocks("EkiTrack2")
        .into_iter()
        .map(|track| StationTrack::from_raw(track, diagnostics))
        .collect()
}

impl FromRaw for StationTrack {
    fn from_raw(node: &RawNode, _diagnostics: &mut Diagnostics) -> Self {
        StationTrack {
            name: text(node, "TrackName"),
            abbreviations: [text(node, "TrackRyakusyou"), text(node, "TrackNoboriRyakusyou")],
        }
    }
}

impl FromRaw for OuterTerminal {
    fn from_raw(node: &RawNode, _diagnostics: &mut Diagnostics) -> Self {
        OuterTerminal {
            name: text(node, "OuterTerminalEkimei"),
            timetable_abbreviation: optional_text(node, "OuterTerminalJikokuRyaku"),
            diagram_abbreviation: optional_text(node, "OuterTerminalDiaRyaku"),
        }
    }
}

impl FromRaw for TrainType {
    fn from_raw(node: &RawNode, diagnostics: &mut Diagnostics) -> Self {
        let defaults = TrainType::default();
        TrainType {
            name: text(node, "Syubetsumei"),
            abbreviation: text(node, "Ryakusyou"),
            text_color: color(node, "JikokuhyouMojiColor", defaults.text_color, diagnostics),
            font_index: number(node, "JikokuhyouFontIndex", 0, diagnostics),
            background_color: color(
                node,
                "JikokuhyouBackColor",
                defaults.background_color,
                diagnostics,
            ),
            stroke_color: color(node, "DiagramSenColor", defaults.stroke_color, diagnostics),
            line_style: value_or(
                node,
                "DiagramSenStyle",
                LineStyle::default(),
                diagnostics,
                LineStyle::from_key,
            ),
            is_bold: flag(node, "DiagramSenIsBold", diagnostics),
            draws_stop_mark: value_or(node, "StopMarkDrawType", true, diagnostics, |s| match s {
                "EStopMarkDrawType_DrawOnStop" => Some(true),
                "EStopMarkDrawType_Nothing" => Some(false),
                _ => None,
            }),
            parent: optional_value(node, "ParentSyubetsuIndex", diagnostics, |s| {
                s.trim().parse().ok()
            }),
        }
    }
}

impl FromRaw for Diagram {
    fn from_raw(node: &RawNode, diagnostics: &mut Diagnostics) -> Self {
        let trains = Direction::ALL.map(|direction| {
            node.block(direction.key())
                .map(|list| train_list(list, direction, diagnostics))
                .unwrap_or_default()
        });
        Diagram {
            name: text(node, "DiaName"),
            background_colors: [
                number(node, "MainBackColorIndex", 0, diagnostics),
                number(node, "SubBackColorIndex", 0, diagnostics),
            ],
            pattern: number(node, "BackPatternIndex", 0, diagnostics),
            trains,
        }
    }
}

/// The trains of a `Kudari` or `Nobori` block, in order.
pub fn train_list(node: &RawNode, direction: Direction, diagnostics: &mut Diagnostics) -> Vec<Train> {
    node.blocks("Ressya")
        .into_iter()
        .map(|train| build_train(train, direction, diagnostics))
        .collect()
}

/// Build a train. `list_direction` is used when the block does not state one.
pub fn build_train(node: &RawNode, list_direction: Direction, diagnostics: &mut Diagnostics) -> Train {
    let schedule = match node.text("EkiJikoku") {
        Some(raw) => StationTime::decode_with(raw, |issue| {
            diagnostics.warn(ParseWarning::InvalidSchedule {
                index: issue.index,
                segment: issue.segment,
                reason: issue.reason,
            })
        }),
        None => StationTime::new(),
    };

    Train {
        direction: value_or(node, "Houkou", list_direction, diagnostics, Direction::from_key),
        train_type: number(node, "Syubetsu", 0, diagnostics),
        number: text(node, "Ressyabangou"),
        name: text(node, "Ressyamei"),
        car_count: text(node, "Gousuu"),
        schedule,
        note: node.text("Bikou").map(unescape_text),
        operation: optional_text(node, OPERATION_SLOT),
    }
}

impl FromRaw for DisplayProperty {
    fn from_raw(node: &RawNode, diagnostics: &mut Diagnostics) -> Self {
        let defaults = DisplayProperty::default();

        let timetable_fonts: Vec<Font> = node
            .texts("JikokuhyouFont")
            .into_iter()
            .map(Font::parse)
            .collect();
        let timetable_back_colors: Vec<Color> = node
            .texts("JikokuhyouBackColor")
            .into_iter()
            .map(|raw| {
                Color::parse(raw).unwrap_or_else(|_| {
                    invalid(node, "JikokuhyouBackColor", raw, diagnostics);
                    Color::WHITE
                })
            })
            .collect();

        DisplayProperty {
            timetable_fonts: if timetable_fonts.is_empty() {
                defaults.timetable_fonts
            } else {
                timetable_fonts
            },
            timetable_vertical_font: font(node, "JikokuhyouVFont"),
            diagram_station_font: font(node, "DiaEkimeiFont"),
            diagram_time_font: font(node, "DiaJikokuFont"),
            diagram_train_font: font(node, "DiaRessyaFont"),
            comment_font: font(node, "CommentFont"),
            diagram_text_color: color(node, "DiaMojiColor", defaults.diagram_text_color, diagnostics),
            diagram_background_color: color(
                node,
                "DiaHaikeiColor",
                defaults.diagram_background_color,
                diagnostics,
            ),
            diagram_train_color: color(
                node,
                "DiaRessyaColor",
                defaults.diagram_train_color,
                diagnostics,
            ),
            diagram_axis_color: color(node, "DiaJikuColor", defaults.diagram_axis_color, diagnostics),
            timetable_back_colors: if timetable_back_colors.is_empty() {
                defaults.timetable_back_colors
            } else {
                timetable_back_colors
            },
            station_name_length: number(
                node,
                "EkimeiLength",
                defaults.station_name_length,
                diagnostics,
            ),
            timetable_train_width: number(
                node,
                "JikokuhyouRessyaWidth",
                defaults.timetable_train_width,
                diagnostics,
            ),
        }
    }
}
