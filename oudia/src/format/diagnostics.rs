//! Collection of recoverable parse problems.

use crate::error::ParseWarning;

/// Warnings gathered during one parse.
///
/// Each warning is logged as it is recorded, so callers that only want a
/// diagnostic log can ignore the collected list.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<ParseWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: ParseWarning) {
        tracing::warn!(%warning, "recovered from malformed input");
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<ParseWarning> {
        self.warnings
    }
}
