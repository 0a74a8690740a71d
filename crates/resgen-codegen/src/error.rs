//! Error types for namespace building and emission
//!
//! Only fatal problems end up here. Naming collisions and inconsistent
//! declarations are reported as [`resgen_core::Warning`] values instead.

use resgen_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Code generation error in {path}: {message}")]
    Generation { path: String, message: String },

    #[error("Format error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

impl CodegenError {
    pub fn generation(path: impl Into<String>, message: impl Into<String>) -> Self {
        CodegenError::Generation {
            path: path.into(),
            message: message.into(),
        }
    }
}
