//! Identifier sanitizing for generated Swift code.
//!
//! Raw resource names come from designers and file systems: they contain
//! spaces, dashes, dots, emoji, leading digits and the occasional Swift
//! keyword. [`sanitize`] turns any of them into a syntactically valid Swift
//! identifier. It is a pure function: the same raw name always yields the same
//! identifier and nothing about the surrounding scope is consulted.
//!
//! Scope awareness is layered on top with [`sanitize_in_scope`], which only
//! *reports* a [`NameConflict`]. Deciding who wins a conflict is the job of
//! the validator.
//!
//! # Examples
//! ```
//! use resgen_core::naming::{sanitize, IdentifierCase};
//! assert_eq!(sanitize("My Icon", IdentifierCase::Value).sanitized_name, "myIcon");
//! assert_eq!(sanitize("my-icon", IdentifierCase::Value).sanitized_name, "myIcon");
//! assert_eq!(sanitize("default", IdentifierCase::Value).sanitized_name, "`default`");
//! assert_eq!(sanitize("2x", IdentifierCase::Value).sanitized_name, "_2x");
//! assert_eq!(sanitize("login screen", IdentifierCase::Type).sanitized_name, "LoginScreen");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Swift reserved words that must be escaped with backticks.
pub const SWIFT_KEYWORDS: &[&str] = &[
    "Any", "Protocol", "Self", "Type", "as", "associatedtype", "break", "case", "catch", "class",
    "continue", "default", "defer", "deinit", "do", "else", "enum", "extension", "fallthrough",
    "false", "fileprivate", "for", "func", "guard", "if", "import", "in", "init", "inout",
    "internal", "is", "let", "nil", "open", "operator", "private", "precedencegroup",
    "protocol", "public", "repeat", "rethrows", "return", "self", "static", "struct", "subscript",
    "super", "switch", "throw", "throws", "true", "try", "typealias", "var", "where", "while",
];

/// Prefix used when a name would otherwise start with a digit.
const DIGIT_PREFIX: char = '_';

/// Name used when nothing survives sanitizing.
const EMPTY_NAME: &str = "_unnamed";

/// Which Swift case convention an identifier follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierCase {
    /// lowerCamelCase, used for properties, functions and namespace structs
    Value,
    /// UpperCamelCase, used for type-like names
    Type,
}

/// A raw resource name together with the identifier generated for it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub raw_name: String,
    pub sanitized_name: String,
    /// Set when uniqueness had to be forced with a suffix
    pub is_explicit: bool,
}

impl Identifier {
    /// Identifier for a name the generator controls and knows to be valid
    pub fn verbatim(name: &str) -> Self {
        Self {
            raw_name: name.to_string(),
            sanitized_name: name.to_string(),
            is_explicit: false,
        }
    }

    /// Force uniqueness by appending `n` underscores to the sanitized name.
    ///
    /// The raw name is kept so the identifier can still be traced back to
    /// the resource it came from.
    pub fn with_suffix(&self, n: usize) -> Self {
        let bare = unescape(&self.sanitized_name);
        let suffixed = format!("{}{}", bare, "_".repeat(n.max(1)));
        Self {
            raw_name: self.raw_name.clone(),
            sanitized_name: escape_keyword(suffixed),
            is_explicit: true,
        }
    }

    /// The sanitized name without keyword backticks
    pub fn bare(&self) -> &str {
        unescape(&self.sanitized_name)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sanitized_name)
    }
}

/// Two different raw names that sanitize to the same identifier in one scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameConflict {
    pub sanitized_name: String,
    pub existing_raw_name: String,
    pub new_raw_name: String,
}

impl fmt::Display for NameConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' and '{}' both generate '{}'",
            self.existing_raw_name, self.new_raw_name, self.sanitized_name
        )
    }
}

/// Names already bound in a scope, keyed by sanitized name
pub type UsedIdentifiers = BTreeMap<String, String>;

/// Sanitize a raw name into a valid Swift identifier
pub fn sanitize(raw_name: &str, case: IdentifierCase) -> Identifier {
    let joined = join_words(raw_name);

    // Case mapping can introduce combining marks, so filter once more
    let cased: String = match case {
        IdentifierCase::Value => lowercase_leading_run(&joined),
        IdentifierCase::Type => uppercase_first(&joined),
    }
    .chars()
    .filter(|c| is_identifier_char(*c))
    .collect();

    let prefixed = if cased.is_empty() || cased == "_" {
        EMPTY_NAME.to_string()
    } else if cased.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{}{}", DIGIT_PREFIX, cased)
    } else {
        cased
    };

    Identifier {
        raw_name: raw_name.to_string(),
        sanitized_name: escape_keyword(prefixed),
        is_explicit: false,
    }
}

/// Sanitize a raw name and report whether it collides with the scope.
///
/// A conflict is only reported when the sanitized name is already bound to a
/// *different* raw name; re-adding the same raw name is not a conflict.
pub fn sanitize_in_scope(
    raw_name: &str,
    case: IdentifierCase,
    existing: &UsedIdentifiers,
) -> (Identifier, Option<NameConflict>) {
    let identifier = sanitize(raw_name, case);
    let conflict = existing
        .get(&identifier.sanitized_name)
        .filter(|existing_raw| existing_raw.as_str() != raw_name)
        .map(|existing_raw| NameConflict {
            sanitized_name: identifier.sanitized_name.clone(),
            existing_raw_name: existing_raw.clone(),
            new_raw_name: raw_name.to_string(),
        });
    (identifier, conflict)
}

/// Check that a name is usable as a Swift identifier as-is.
///
/// Keywords are accepted only in their backtick-escaped form.
pub fn is_valid_identifier(name: &str) -> bool {
    let (bare, escaped) = match name.strip_prefix('`').and_then(|n| n.strip_suffix('`')) {
        Some(inner) => (inner, true),
        None => (name, false),
    };

    let mut chars = bare.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if first.is_ascii_digit() || !is_identifier_char(first) {
        return false;
    }
    if !chars.all(is_identifier_char) {
        return false;
    }
    if bare == "_" {
        return false;
    }

    is_keyword(bare) == escaped
}

pub fn is_keyword(name: &str) -> bool {
    SWIFT_KEYWORDS.contains(&name)
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || (!c.is_ascii() && c.is_alphabetic())
}

/// Drop invalid characters, upper-casing the first letter after each run
fn join_words(raw_name: &str) -> String {
    let mut result = String::with_capacity(raw_name.len());
    let mut at_word_start = false;

    for c in raw_name.chars() {
        if !is_identifier_char(c) {
            at_word_start = !result.is_empty();
            continue;
        }
        if at_word_start {
            result.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Lower-case the leading upper-case run: `URLImage` -> `urlImage`, `URL` -> `url`
fn lowercase_leading_run(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let run = chars.iter().take_while(|c| c.is_uppercase()).count();

    // Keep the last capital of a run when it starts the next word
    let lower_until = if run > 1 && run < chars.len() && chars[run].is_lowercase() {
        run - 1
    } else {
        run
    };

    let mut result = String::with_capacity(name.len());
    for (idx, c) in chars.iter().enumerate() {
        if idx < lower_until {
            result.extend(c.to_lowercase());
        } else {
            result.push(*c);
        }
    }
    result
}

fn uppercase_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

fn escape_keyword(name: String) -> String {
    if is_keyword(&name) {
        format!("`{}`", name)
    } else {
        name
    }
}

fn unescape(name: &str) -> &str {
    name.strip_prefix('`')
        .and_then(|n| n.strip_suffix('`'))
        .unwrap_or(name)
}
