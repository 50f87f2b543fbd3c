//! The closed set of block types the format knows.
//!
//! Any `<name>.` line whose name is not listed here is a fatal error.

use crate::domain::Direction;

/// A nested block type, and through it the entity it is built into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `Rosen` → Railway
    Railway,
    /// `Eki` → Station
    Station,
    /// `EkiTrack2Cont` → list of StationTrack
    StationTrackList,
    /// `EkiTrack2` → StationTrack
    StationTrack,
    /// `OuterTerminal` → OuterTerminal
    OuterTerminal,
    /// `Ressyasyubetsu` → TrainType
    TrainType,
    /// `Dia` → Diagram
    Diagram,
    /// `Kudari` / `Nobori` → list of Train for one direction
    TrainList(Direction),
    /// `Ressya` → Train
    Train,
    /// `DispProp` → DisplayProperty
    DisplayProperty,
}

impl BlockKind {
    pub const ALL: [BlockKind; 11] = [
        BlockKind::Railway,
        BlockKind::Station,
        BlockKind::StationTrackList,
        BlockKind::StationTrack,
        BlockKind::OuterTerminal,
        BlockKind::TrainType,
        BlockKind::Diagram,
        BlockKind::TrainList(Direction::Outbound),
        BlockKind::TrainList(Direction::Inbound),
        BlockKind::Train,
        BlockKind::DisplayProperty,
    ];

    /// Look up a block-opening name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Rosen" => Some(BlockKind::Railway),
            "Eki" => Some(BlockKind::Station),
            "EkiTrack2Cont" => Some(BlockKind::StationTrackList),
            "EkiTrack2" => Some(BlockKind::StationTrack),
            "OuterTerminal" => Some(BlockKind::OuterTerminal),
            "Ressyasyubetsu" => Some(BlockKind::TrainType),
            "Dia" => Some(BlockKind::Diagram),
            "Kudari" => Some(BlockKind::TrainList(Direction::Outbound)),
            "Nobori" => Some(BlockKind::TrainList(Direction::Inbound)),
            "Ressya" => Some(BlockKind::Train),
            "DispProp" => Some(BlockKind::DisplayProperty),
            _ => None,
        }
    }

    /// The on-disk block name.
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Railway => "Rosen",
            BlockKind::Station => "Eki",
            BlockKind::StationTrackList => "EkiTrack2Cont",
            BlockKind::StationTrack => "EkiTrack2",
            BlockKind::OuterTerminal => "OuterTerminal",
            BlockKind::TrainType => "Ressyasyubetsu",
            BlockKind::Diagram => "Dia",
            BlockKind::TrainList(direction) => direction.key(),
            BlockKind::Train => "Ressya",
            BlockKind::DisplayProperty => "DispProp",
        }
    }
}

/// Keys that may repeat within one block and accumulate into a list.
/// Every other key keeps only its last value.
pub const ENUMERABLE_KEYS: [&str; 8] = [
    "Eki",
    "EkiTrack2",
    "OuterTerminal",
    "Ressyasyubetsu",
    "Dia",
    "Ressya",
    "JikokuhyouFont",
    "JikokuhyouBackColor",
];

pub fn is_enumerable(key: &str) -> bool {
    ENUMERABLE_KEYS.contains(&key)
}

/// Attribute keys starting with this prefix are kept as whole lines.
pub const OPERATION_PREFIX: &str = "Operation";

/// The single slot all `Operation*` lines of a block are stored under.
pub const OPERATION_SLOT: &str = "Operation";
