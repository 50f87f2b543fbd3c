//! Recursive-descent block parser.
//!
//! The grammar is line based:
//!
//! - `key=value` is an attribute
//! - `Name.` opens a nested block of type `Name`
//! - `.` closes the current block
//! - blank lines are ignored
//!
//! The root block has no opening or closing line. Parsing produces an
//! untyped [`RawNode`] tree; entity construction happens afterwards.

use tracing::{debug, trace};

use super::diagnostics::Diagnostics;
use super::lines::split_lines;
use super::raw::{RawNode, RawValue};
use super::registry::{BlockKind, OPERATION_PREFIX, OPERATION_SLOT};
use crate::error::{ParseError, ParseWarning};

/// Parser position within the input lines.
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    next: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: split_lines(text),
            next: 0,
        }
    }

    /// Take the next line with its 1-based line number.
    fn advance(&mut self) -> Option<(usize, &'a str)> {
        let line = *self.lines.get(self.next)?;
        self.next += 1;
        Some((self.next, line))
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// What a single input line means.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Attribute { key: &'a str, value: &'a str },
    Close,
    Open(&'a str),
    Blank,
    Unrecognized,
}

fn classify(line: &str) -> Line<'_> {
    if let Some((key, value)) = line.split_once('=') {
        return Line::Attribute { key, value };
    }
    if line == "." {
        return Line::Close;
    }
    match line.strip_suffix('.') {
        Some(name) if !name.is_empty() => Line::Open(name),
        _ if line.trim().is_empty() => Line::Blank,
        _ => Line::Unrecognized,
    }
}

/// A block that has been opened and not yet closed.
#[derive(Clone, Copy)]
struct OpenBlock {
    kind: BlockKind,
    line: usize,
}

/// Parse a whole document into its root node.
pub fn parse_document(text: &str, diagnostics: &mut Diagnostics) -> Result<RawNode, ParseError> {
    let mut cursor = LineCursor::new(text);
    let root = parse_block(&mut cursor, None, diagnostics)?;
    debug!(
        lines = cursor.line_count(),
        warnings = diagnostics.warnings().len(),
        "parsed block structure"
    );
    Ok(root)
}

/// Parse lines until the block closes, recursing into nested blocks.
///
/// `open` is `None` for the root, which ends at end of input instead of
/// at a `.` line.
fn parse_block(
    cursor: &mut LineCursor<'_>,
    open: Option<OpenBlock>,
    diagnostics: &mut Diagnostics,
) -> Result<RawNode, ParseError> {
    let mut node = match open {
        Some(block) => RawNode::new(block.kind),
        None => RawNode::root(),
    };

    while let Some((line_number, line)) = cursor.advance() {
        match classify(line) {
            Line::Attribute { key, .. } if key.starts_with(OPERATION_PREFIX) => {
                node.replace(OPERATION_SLOT, RawValue::Text(line.to_string()));
            }
            Line::Attribute { key, value } => {
                node.store(key, RawValue::Text(value.to_string()));
            }
            Line::Close => match open {
                Some(_) => return Ok(node),
                None => {
                    diagnostics.warn(ParseWarning::UnexpectedBlockEnd { line: line_number });
                }
            },
            Line::Open(name) => {
                let kind = BlockKind::from_name(name).ok_or_else(|| ParseError::UnknownBlock {
                    line: line_number,
                    name: name.to_string(),
                })?;
                trace!(block = name, line = line_number, "entering block");
                let child = parse_block(
                    cursor,
                    Some(OpenBlock {
                        kind,
                        line: line_number,
                    }),
                    diagnostics,
                )?;
                node.store(name, RawValue::Block(child));
            }
            Line::Blank => {}
            Line::Unrecognized => diagnostics.warn(ParseWarning::UnrecognizedLine {
                line: line_number,
                content: line.to_string(),
            }),
        }
    }

    match open {
        None => Ok(node),
        Some(block) => Err(ParseError::UnterminatedBlock {
            line: block.line,
            name: block.kind.name(),
        }),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn line() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Rosen.".to_string()),
            Just("Eki.".to_string()),
            Just("Dia.".to_string()),
            Just(".".to_string()),
            Just(String::new()),
            "[A-Za-z]{1,8}=[ -~]{0,8}",
            "[ -~]{0,10}",
        ]
    }

    proptest! {
        /// Arbitrary input either parses or fails on a line that exists
        #[test]
        fn errors_point_inside_input(lines in prop::collection::vec(line(), 0..40)) {
            let text = lines.join("\n");
            let mut diagnostics = Diagnostics::new();
            match parse_document(&text, &mut diagnostics) {
                Ok(_) => {}
                Err(e) => {
                    let line = e.line().unwrap();
                    prop_assert!(line >= 1 && line <= lines.len());
                }
            }
            for warning in diagnostics.warnings() {
                if let Some(line) = warning.line() {
                    prop_assert!(line >= 1 && line <= lines.len());
                }
            }
        }

        /// Balanced station blocks are all kept, in order
        #[test]
        fn station_blocks_accumulate(names in prop::collection::vec("[A-Za-z0-9]{1,6}", 0..10)) {
            let mut text = String::from("Rosen.\n");
            for name in &names {
                text.push_str(&format!("Eki.\nEkimei={name}\n.\n"));
            }
            text.push_str(".\n");

            let mut diagnostics = Diagnostics::new();
            let root = parse_document(&text, &mut diagnostics).unwrap();
            let parsed: Vec<&str> = root
                .block("Rosen")
                .unwrap()
                .blocks("Eki")
                .into_iter()
                .filter_map(|station| station.text("Ekimei"))
                .collect();
            prop_assert_eq!(parsed, names.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
