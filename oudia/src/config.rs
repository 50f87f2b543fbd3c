//! Options for reading and writing documents.

/// Format version tag written at the top of every serialized document.
pub const DEFAULT_FILE_TYPE: &str = "OuDiaSecond.1.04";

/// Configuration for parsing.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Turn every warning into a fatal [`ParseError::Rejected`](crate::ParseError::Rejected).
    /// Off by default: malformed values are defaulted and reported.
    pub strict: bool,
}

impl ParseOptions {
    /// Create the default, lenient configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Configuration for serializing.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Version tag written as the first `FileType` line
    pub file_type: String,
    /// Application identifier written as the trailing `FileTypeAppComment`
    pub app_comment: String,
    /// Append `$track` to schedule fields that carry a track.
    /// The legacy compact form has no track suffix, so this is off by default.
    pub emit_tracks: bool,
}

impl WriteOptions {
    /// Create a config with the given application identifier.
    pub fn new(app_comment: impl Into<String>) -> Self {
        Self {
            app_comment: app_comment.into(),
            ..Self::default()
        }
    }

    /// Set a custom version tag.
    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = file_type.into();
        self
    }

    /// Enable or disable track suffixes in schedule fields.
    pub fn with_tracks(mut self, emit_tracks: bool) -> Self {
        self.emit_tracks = emit_tracks;
        self
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            file_type: DEFAULT_FILE_TYPE.to_string(),
            app_comment: String::new(),
            emit_tracks: false,
        }
    }
}
