//! Parse error and warning types.
//!
//! Fatal problems abort the parse with a [`ParseError`]. Everything else is
//! recovered from and reported as a [`ParseWarning`]: the document still
//! loads, with the offending line skipped or the offending field defaulted.

/// A fatal parse error. No document is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A block-opening line names a block type the format does not have
    #[error("line {line}: unknown block type `{name}`")]
    UnknownBlock { line: usize, name: String },

    /// A nested block is still open at end of input
    #[error("line {line}: block `{name}` is never closed")]
    UnterminatedBlock { line: usize, name: &'static str },

    /// Strict parsing was requested and the input produced warnings
    #[error("rejected in strict mode ({count} warning(s)), first: {first}")]
    Rejected { first: ParseWarning, count: usize },

    /// The background parse task failed to complete
    #[error("parse task failed: {0}")]
    Task(String),
}

impl ParseError {
    /// The 1-based input line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::UnknownBlock { line, .. }
            | ParseError::UnterminatedBlock { line, .. } => Some(*line),
            ParseError::Rejected { first, .. } => first.line(),
            ParseError::Task(_) => None,
        }
    }
}

/// A recoverable problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseWarning {
    /// A line that is neither an attribute, a block boundary, nor blank
    #[error("line {line}: unrecognized line `{content}`")]
    UnrecognizedLine { line: usize, content: String },

    /// A `.` line at the top level, with no block to close; it is ignored
    #[error("line {line}: `.` outside of any block")]
    UnexpectedBlockEnd { line: usize },

    /// An attribute whose value could not be interpreted; the field was defaulted
    #[error("{block}: invalid value `{value}` for `{key}`")]
    InvalidValue {
        block: &'static str,
        key: String,
        value: String,
    },

    /// A malformed field in a train's schedule string
    #[error("schedule field {index} `{segment}`: {reason}")]
    InvalidSchedule {
        index: usize,
        segment: String,
        reason: &'static str,
    },
}

impl ParseWarning {
    /// The 1-based input line the warning refers to, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseWarning::UnrecognizedLine { line, .. }
            | ParseWarning::UnexpectedBlockEnd { line } => Some(*line),
            _ => None,
        }
    }
}
