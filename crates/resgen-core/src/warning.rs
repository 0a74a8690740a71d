//! Non-fatal problems found while building and validating the namespace
//!
//! Warnings are plain values: builders and the validator return them and the
//! caller decides how to report them.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WarningKind {
    /// Two entries of one scope generate the same identifier
    NameConflict,
    /// A resource is declared with different shapes across locales or files
    InconsistentDeclaration,
    /// A member cannot be emitted as valid code
    InvalidMember,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::NameConflict => write!(f, "NAME_CONFLICT"),
            WarningKind::InconsistentDeclaration => write!(f, "INCONSISTENT_DECLARATION"),
            WarningKind::InvalidMember => write!(f, "INVALID_MEMBER"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    /// Dotted path of the scope, e.g. `R.string.localizable`
    pub path: String,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }

    /// An entry that was dropped because another one already owns its name
    pub fn name_conflict(
        path: &str,
        entry: &str,
        sanitized_name: &str,
        kept_raw_name: &str,
        removed_raw_name: &str,
    ) -> Self {
        Self::new(
            WarningKind::NameConflict,
            path,
            format!(
                "Skipping {} '{}' because '{}' already generates '{}'",
                entry, removed_raw_name, kept_raw_name, sanitized_name
            ),
        )
    }

    pub fn inconsistent(path: &str, message: impl Into<String>) -> Self {
        Self::new(WarningKind::InconsistentDeclaration, path, message)
    }

    pub fn invalid_member(path: &str, message: impl Into<String>) -> Self {
        Self::new(WarningKind::InvalidMember, path, message)
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] in {}: {}", self.kind, self.path, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_conflict_display() {
        let warning = Warning::name_conflict("R.image", "image", "myIcon", "My Icon", "my-icon");
        assert_eq!(
            warning.to_string(),
            "[NAME_CONFLICT] in R.image: Skipping image 'my-icon' because 'My Icon' already generates 'myIcon'"
        );
    }
}
