//! printf-style placeholders in localized strings
//!
//! `"Hello %@, you have %d messages"` takes two arguments: an object and an
//! integer. Positional specifiers (`%2$@`) may reorder or repeat arguments.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Argument type required by a placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringParamKind {
    Object,
    Int,
    UInt,
    Double,
    Char,
    CString,
    Pointer,
}

impl StringParamKind {
    /// Swift spelling of the argument type
    pub fn swift_type(&self) -> &'static str {
        match self {
            StringParamKind::Object => "String",
            StringParamKind::Int => "Int",
            StringParamKind::UInt => "UInt",
            StringParamKind::Double => "Double",
            StringParamKind::Char => "CChar",
            StringParamKind::CString => "UnsafePointer<CChar>",
            StringParamKind::Pointer => "UnsafeRawPointer",
        }
    }

    fn from_conversion(conversion: char) -> Option<Self> {
        match conversion {
            '@' => Some(StringParamKind::Object),
            'd' | 'D' | 'i' => Some(StringParamKind::Int),
            'u' | 'U' | 'x' | 'X' | 'o' | 'O' => Some(StringParamKind::UInt),
            'f' | 'F' | 'e' | 'E' | 'g' | 'G' | 'a' | 'A' => Some(StringParamKind::Double),
            'c' | 'C' => Some(StringParamKind::Char),
            's' | 'S' => Some(StringParamKind::CString),
            'p' => Some(StringParamKind::Pointer),
            _ => None,
        }
    }
}

/// One argument of a parametrized string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StringParam {
    /// Argument label, when the source declares one
    #[serde(default)]
    pub name: Option<String>,
    pub kind: StringParamKind,
}

impl StringParam {
    pub fn new(kind: StringParamKind) -> Self {
        Self { name: None, kind }
    }
}

fn specifier_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"%(?:(\d+)\$)?[-+ #0']*\d*(?:\.\d+)?(?:hh|h|ll|l|q|z|t|j|L)?([@dDiuUxXoOfFeEgGaAcCsSp%])")
            .expect("format specifier regex is valid")
    })
}

/// Highest positional index accepted in a format string
pub const MAX_POSITION: usize = 64;

/// A specifier in a format string: its explicit position, if any, and kind.
///
/// An explicit position that does not fit a `usize` is reported as `usize::MAX`.
fn specifiers(format: &str) -> impl Iterator<Item = (Option<usize>, StringParamKind)> + '_ {
    specifier_regex().captures_iter(format).filter_map(|captures| {
        let conversion = captures
            .get(2)
            .and_then(|m| m.as_str().chars().next())
            .unwrap_or('%');
        let kind = StringParamKind::from_conversion(conversion)?;
        let position = captures
            .get(1)
            .map(|m| m.as_str().parse::<usize>().unwrap_or(usize::MAX))
            .filter(|&explicit| explicit > 0);
        Some((position, kind))
    })
}

/// Largest explicit position used in `format`, when it exceeds [`MAX_POSITION`]
pub fn excessive_position(format: &str) -> Option<usize> {
    specifiers(format)
        .filter_map(|(position, _)| position)
        .find(|&position| position > MAX_POSITION)
}

/// Extract the arguments a format string expects, in argument order.
///
/// Gaps left by positional specifiers are filled with object arguments; when a
/// position is used twice the first conversion wins. Positions above
/// [`MAX_POSITION`] are ignored; records carrying them are rejected when the
/// record set is built.
pub fn parse_format_specifiers(format: &str) -> Vec<StringParam> {
    let mut by_position: BTreeMap<usize, StringParamKind> = BTreeMap::new();
    let mut next_position = 1;

    for (explicit, kind) in specifiers(format) {
        let position = match explicit {
            Some(explicit) => explicit,
            None => {
                let position = next_position;
                next_position += 1;
                position
            }
        };
        if position <= MAX_POSITION {
            by_position.entry(position).or_insert(kind);
        }
    }

    let Some(&highest) = by_position.keys().next_back() else {
        return Vec::new();
    };

    (1..=highest)
        .map(|position| {
            StringParam::new(
                by_position
                    .get(&position)
                    .copied()
                    .unwrap_or(StringParamKind::Object),
            )
        })
        .collect()
}
