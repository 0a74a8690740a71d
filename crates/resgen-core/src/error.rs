use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Malformed {kind} record '{name}': {reason}")]
    MalformedRecord {
        kind: String,
        name: String,
        reason: String,
    },

    #[error("File extension '{extension}' is not one of the supported extensions: {supported}")]
    UnsupportedExtension { extension: String, supported: String },
}

impl CoreError {
    pub fn malformed(
        kind: impl std::fmt::Display,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CoreError::MalformedRecord {
            kind: kind.to_string(),
            name: name.into(),
            reason: reason.into(),
        }
    }
}
