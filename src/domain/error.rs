//! Domain error types.

/// Top-level error type for sectorcap.
#[derive(Debug, thiserror::Error)]
pub enum SectorcapError {
    #[error("failed to load {path}: {reason}")]
    DataLoad { path: String, reason: String },

    #[error("line {line}: {reason}")]
    DataParse { line: u64, reason: String },

    #[error("missing column {column} in header")]
    MissingColumn { column: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid {field}: {reason}")]
    Selection { field: String, reason: String },

    #[error("render error: {reason}")]
    Render { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SectorcapError {
    pub fn selection(field: &str, reason: impl Into<String>) -> Self {
        Self::Selection {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            SectorcapError::Io(_) => 1,
            SectorcapError::ConfigParse { .. } | SectorcapError::ConfigInvalid { .. } => 2,
            SectorcapError::DataLoad { .. }
            | SectorcapError::DataParse { .. }
            | SectorcapError::MissingColumn { .. } => 3,
            SectorcapError::Selection { .. } => 4,
            SectorcapError::Render { .. } => 5,
        }
    }
}

impl From<&SectorcapError> for std::process::ExitCode {
    fn from(err: &SectorcapError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
