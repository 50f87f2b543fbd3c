//! The document root.

use serde::{Deserialize, Serialize};

use super::{DisplayProperty, Railway};

/// A whole OuDia document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OuDiaFile {
    /// Format version tag as read, e.g. `OuDia.1.02`
    pub file_type: String,
    /// Free-text comment naming the application that wrote the file
    pub app_comment: String,
    pub railway: Railway,
    pub display: DisplayProperty,
}

impl OuDiaFile {
    /// A blank document holding an empty railway with the given name.
    pub fn new(railway_name: impl Into<String>) -> Self {
        Self {
            railway: Railway::new(railway_name),
            ..Self::default()
        }
    }

    /// Whether the version tag names the OuDiaSecond dialect.
    pub fn is_second_format(&self) -> bool {
        self.file_type.starts_with("OuDiaSecond")
    }
}
