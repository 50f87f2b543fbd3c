//! Serialization of the entity graph back to block text.
//!
//! Output always uses `\n` line endings. Fields are written in a fixed
//! order per entity; boolean flags and empty optional text are only written
//! when set.

use std::fmt::Display;

use tracing::debug;

use super::lines::{escape_text, single_line};
use crate::config::WriteOptions;
use crate::domain::{
    Diagram, Direction, DisplayProperty, OuDiaFile, OuterTerminal, Railway, Station,
    StationLink, StationTrack, Train, TrainType,
};

/// Accumulates output lines.
pub struct BlockWriter {
    out: String,
    emit_tracks: bool,
}

impl BlockWriter {
    pub fn new(emit_tracks: bool) -> Self {
        Self {
            out: String::new(),
            emit_tracks,
        }
    }

    pub fn attr(&mut self, key: &str, value: impl Display) {
        self.raw_line(format_args!("{key}={value}"));
    }

    /// Write `key=1` when `value` is set, nothing otherwise.
    pub fn flag(&mut self, key: &str, value: bool) {
        if value {
            self.attr(key, 1);
        }
    }

    /// Write free text, folded onto one line.
    pub fn text(&mut self, key: &str, value: &str) {
        self.attr(key, single_line(value));
    }

    /// Write free text unless it is empty.
    pub fn non_empty(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            self.text(key, value);
        }
    }

    pub fn open(&mut self, name: &str) {
        self.raw_line(format_args!("{name}."));
    }

    pub fn close(&mut self) {
        self.raw_line(".");
    }

    pub fn raw_line(&mut self, line: impl Display) {
        use std::fmt::Write as _;
        // Writing to a String cannot fail.
        let _ = writeln!(self.out, "{line}");
    }

    /// Write `inner` wrapped in a `name.` / `.` pair.
    pub fn block(&mut self, name: &str, inner: impl FnOnce(&mut Self)) {
        self.open(name);
        inner(self);
        self.close();
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Write an entity as its block contents.
pub trait WriteBlock {
    fn write_block(&self, w: &mut BlockWriter);
}

/// Serialize a whole document.
pub fn write_document(file: &OuDiaFile, options: &WriteOptions) -> String {
    let mut w = BlockWriter::new(options.emit_tracks);
    w.text("FileType", &options.file_type);
    w.block("Rosen", |w| file.railway.write_block(w));
    w.block("DispProp", |w| file.display.write_block(w));
    w.text("FileTypeAppComment", &options.app_comment);

    let text = w.finish();
    debug!(
        bytes = text.len(),
        stations = file.railway.stations.len(),
        diagrams = file.railway.diagrams.len(),
        "serialized document"
    );
    text
}

impl WriteBlock for Railway {
    fn write_block(&self, w: &mut BlockWriter) {
        w.text("Rosenmei", &self.name);
        w.non_empty("KudariDiaAlias", &self.direction_names[0]);
        w.non_empty("NoboriDiaAlias", &self.direction_names[1]);
        for station in &self.stations {
            w.block("Eki", |w| station.write_block(w));
        }
        for train_type in &self.train_types {
            w.block("Ressyasyubetsu", |w| train_type.write_block(w));
        }
        for diagram in &self.diagrams {
            w.block("Dia", |w| diagram.write_block(w));
        }
        w.attr("KitenJikoku", self.day_start);
        w.attr("DiagramDgrYZahyouKyoriDefault", self.station_spacing);
        w.flag("EnableOperation", self.operation_enabled);
        w.non_empty("Comment", &escape_text(&self.comment));
    }
}

fn write_link(w: &mut BlockWriter, index_key: &str, opposite_key: &str, link: Option<StationLink>) {
    if let Some(link) = link {
        w.attr(index_key, link.station);
        w.flag(opposite_key, link.opposite);
    }
}

impl WriteBlock for Station {
    fn write_block(&self, w: &mut BlockWriter) {
        w.text("Ekimei", &self.name);
        w.non_empty("EkimeiDiaRyakusyou", &self.abbreviation);
        w.attr("Ekijikokukeisiki", self.timetable_style.key());
        w.attr(
            "Ekikibo",
            if self.is_main {
                "Ekikibo_Syuyou"
            } else {
                "Ekikibo_Ippan"
            },
        );
        w.flag("Kyoukaisen", self.is_boundary);
        w.attr("DiagramRessyajouhouHyoujiKudari", self.diagram_info[0].key());
        w.attr("DiagramRessyajouhouHyoujiNobori", self.diagram_info[1].key());
        w.attr("DownMain", self.main_track[0]);
        w.attr("UpMain", self.main_track[1]);
        w.block("EkiTrack2Cont", |w| {
            for track in &self.tracks {
                w.block("EkiTrack2", |w| track.write_block(w));
            }
        });
        for terminal in &self.outer_terminals {
            w.block("OuterTerminal", |w| terminal.write_block(w));
        }
        write_link(w, "BrunchCoreEkiIndex", "BrunchOpposite", self.branch_core);
        write_link(w, "LoopOriginEkiIndex", "LoopOpposite", self.loop_origin);
        w.flag("JikokuhyouTrackOmit", self.timetable_track_omit);
        w.flag("DiagramTrackDisplay", self.diagram_track_display);
        if let Some(distance) = self.next_station_distance {
            w.attr("NextEkiDistance", distance);
        }
    }
}

impl WriteBlock for StationTrack {
    fn write_block(&self, w: &mut BlockWriter) {
        w.text("TrackName", &self.name);
        w.text("TrackRyakusyou", &self.abbreviations[0]);
        w.non_empty("TrackNoboriRyakusyou", &self.abbreviations[1]);
    }
}

impl WriteBlock for OuterTerminal {
    fn write_block(&self, w: &mut BlockWriter) {
        w.text("OuterTerminalEkimei", &self.name);
        if let Some(abbreviation) = &self.timetable_abbreviation {
            w.text("OuterTerminalJikokuRyaku", abbreviation);
        }
        if let Some(abbreviation) = &self.diagram_abbreviation {
            w.text("OuterTerminalDiaRyaku", abbreviation);
        }
    }
}

impl WriteBlock for TrainType {
    fn write_block(&self, w: &mut BlockWriter) {
        w.text("Syubetsumei", &self.name);
        w.non_empty("Ryakusyou", &self.abbreviation);
        w.attr("JikokuhyouMojiColor", self.text_color);
        w.attr("JikokuhyouFontIndex", self.font_index);
        w.attr("JikokuhyouBackColor", self.background_color);
        w.attr("DiagramSenColor", self.stroke_color);
        w.attr("DiagramSenStyle", self.line_style.key());
        w.flag("DiagramSenIsBold", self.is_bold);
        w.attr(
            "StopMarkDrawType",
            if self.draws_stop_mark {
                "EStopMarkDrawType_DrawOnStop"
            } else {
                "EStopMarkDrawType_Nothing"
            },
        );
        if let Some(parent) = self.parent {
            w.attr("ParentSyubetsuIndex", parent);
        }
    }
}

impl WriteBlock for Diagram {
    fn write_block(&self, w: &mut BlockWriter) {
        w.text("DiaName", &self.name);
        w.attr("MainBackColorIndex", self.background_colors[0]);
        w.attr("SubBackColorIndex", self.background_colors[1]);
        w.attr("BackPatternIndex", self.pattern);
        for direction in Direction::ALL {
            w.block(direction.key(), |w| {
                for train in self.trains(direction) {
                    w.block("Ressya", |w| train.write_block(w));
                }
            });
        }
    }
}

impl WriteBlock for Train {
    fn write_block(&self, w: &mut BlockWriter) {
        w.attr("Houkou", self.direction.key());
        w.attr("Syubetsu", self.train_type);
        w.non_empty("Ressyabangou", &self.number);
        w.non_empty("Ressyamei", &self.name);
        w.non_empty("Gousuu", &self.car_count);
        let schedule = if w.emit_tracks {
            self.schedule.encode_with_tracks()
        } else {
            self.schedule.encode()
        };
        w.attr("EkiJikoku", schedule);
        if let Some(note) = &self.note {
            w.attr("Bikou", escape_text(note));
        }
        if let Some(operation) = &self.operation {
            w.raw_line(single_line(operation));
        }
    }
}

impl WriteBlock for DisplayProperty {
    fn write_block(&self, w: &mut BlockWriter) {
        for font in &self.timetable_fonts {
            w.attr("JikokuhyouFont", font);
        }
        w.attr("JikokuhyouVFont", &self.timetable_vertical_font);
        w.attr("DiaEkimeiFont", &self.diagram_station_font);
        w.attr("DiaJikokuFont", &self.diagram_time_font);
        w.attr("DiaRessyaFont", &self.diagram_train_font);
        w.attr("CommentFont", &self.comment_font);
        w.attr("DiaMojiColor", self.diagram_text_color);
        w.attr("DiaHaikeiColor", self.diagram_background_color);
        w.attr("DiaRessyaColor", self.diagram_train_color);
        w.attr("DiaJikuColor", self.diagram_axis_color);
        for color in &self.timetable_back_colors {
            w.attr("JikokuhyouBackColor", color);
        }
        w.attr("EkimeiLength", self.station_name_length);
        w.attr("JikokuhyouRessyaWidth", self.timetable_train_width);
    }
}
