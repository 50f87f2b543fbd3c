//! The OuDia text format.
//!
//! Reading runs in two passes. [`parse_document`] turns lines into an
//! untyped [`RawNode`] tree, resolving every block name against the closed
//! [`BlockKind`] registry. [`FromRaw`] then builds the typed entity graph
//! from that tree, defaulting anything missing or malformed.
//!
//! Writing is a single pass over the entity graph, see [`write_document`].

mod build;
mod diagnostics;
mod lines;
mod parser;
mod raw;
mod registry;
mod writer;

pub use build::{FromRaw, build_train, track_list, train_list};
pub use diagnostics::Diagnostics;
pub use lines::{escape_text, single_line, split_lines, unescape_text};
pub use parser::{LineCursor, parse_document};
pub use raw::{RawNode, RawValue};
pub use registry::{BlockKind, ENUMERABLE_KEYS, OPERATION_PREFIX, OPERATION_SLOT, is_enumerable};
pub use writer::{BlockWriter, WriteBlock, write_document};
