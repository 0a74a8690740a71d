//! Objective-C compatibility layer
//!
//! Swift structs are invisible to Objective-C, so every struct with at least
//! one representable member gets an `@objcMembers` class whose static
//! accessors forward to the Swift ones. Members with generic, runtime
//! library or C pointer types are skipped, as are structs left without any
//! member. The root's own plumbing (`hostingBundle`) is not forwarded.

use crate::swift::{call_argument, comment_text, parameter_declaration};
use crate::{Codegen, CodegenError};
use resgen_core::{AccessLevel, Member, MemberKind, Struct};
use std::fmt::Write;

/// Whether a member can be called from Objective-C
pub fn is_representable(member: &Member) -> bool {
    member.return_type.is_objc_representable()
        && member
            .parameters()
            .iter()
            .all(|p| p.ty.is_objc_representable())
}

#[derive(Debug, Clone, Default)]
pub struct ObjcCodegenConfig {
    pub access_level: AccessLevel,
    /// Prepended to every class name
    pub class_prefix: String,
}

pub struct ObjcCodegen {
    config: ObjcCodegenConfig,
    indent_size: usize,
}

impl Default for ObjcCodegen {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjcCodegen {
    pub fn new() -> Self {
        Self {
            config: ObjcCodegenConfig::default(),
            indent_size: 2,
        }
    }

    pub fn with_config(mut self, config: ObjcCodegenConfig) -> Self {
        self.config = config;
        self
    }

    fn indent(&self, level: usize) -> String {
        " ".repeat(level * self.indent_size)
    }

    /// `R_string_localizable` for `R.string.localizable`.
    ///
    /// Segments are joined with `_`, and an underscore inside a segment is
    /// written as `_0`. Identifiers never start with a digit, so `R.a_b`
    /// (`R_a_0b`) and `R.a.b` (`R_a_b`) keep distinct class names.
    fn class_name(&self, path: &[&Struct]) -> String {
        let segments: Vec<String> = path
            .iter()
            .map(|s| s.name.bare().replace('_', "_0"))
            .collect();
        format!("{}{}", self.config.class_prefix, segments.join("_"))
    }

    fn write_classes(&self, out: &mut String, path: &mut Vec<&Struct>) -> Result<(), CodegenError> {
        let Some(&current) = path.last() else {
            return Ok(());
        };

        let members: Vec<&Member> = current
            .sorted_members()
            .into_iter()
            .filter(|m| is_representable(m))
            .collect();
        if path.len() > 1 && !members.is_empty() {
            self.write_class(out, path, &members)?;
        }

        for child in current.sorted_children() {
            path.push(child);
            self.write_classes(out, path)?;
            path.pop();
        }
        Ok(())
    }

    fn write_class(&self, out: &mut String, path: &[&Struct], members: &[&Member]) -> Result<(), CodegenError> {
        let access = self.config.access_level.keyword();
        let swift_path: Vec<&str> = path.iter().map(|s| s.name.sanitized_name.as_str()).collect();
        let swift_path = swift_path.join(".");

        writeln!(out)?;
        writeln!(out, "/// Objective-C access to `{}`", swift_path)?;
        writeln!(out, "@objcMembers")?;
        writeln!(
            out,
            "{} class {}: Foundation.NSObject {{",
            access,
            self.class_name(path)
        )?;

        for member in members {
            self.write_forwarder(out, member, &swift_path)?;
            writeln!(out)?;
        }

        writeln!(out, "{}fileprivate override init() {{}}", self.indent(1))?;
        writeln!(out, "}}")?;
        Ok(())
    }

    fn write_forwarder(&self, out: &mut String, member: &Member, swift_path: &str) -> Result<(), CodegenError> {
        let indent = self.indent(1);
        let access = self.config.access_level.keyword();

        for line in &member.comment {
            writeln!(out, "{}/// {}", indent, comment_text(line))?;
        }
        if let Some(availability) = &member.availability {
            writeln!(out, "{}@available({}, *)", indent, availability)?;
        }

        match &member.kind {
            MemberKind::Property => {
                writeln!(
                    out,
                    "{}{} static var {}: {} {{ return {}.{} }}",
                    indent, access, member.identifier, member.return_type, swift_path, member.identifier
                )?;
            }
            MemberKind::Function { parameters } => {
                let declarations: Vec<String> = parameters
                    .iter()
                    .map(|p| parameter_declaration(p, false))
                    .collect();
                let arguments: Vec<String> = parameters.iter().map(call_argument).collect();
                writeln!(
                    out,
                    "{}{} static func {}({}) -> {} {{",
                    indent,
                    access,
                    member.identifier,
                    declarations.join(", "),
                    member.return_type
                )?;
                writeln!(
                    out,
                    "{}return {}.{}({})",
                    self.indent(2),
                    swift_path,
                    member.identifier,
                    arguments.join(", ")
                )?;
                writeln!(out, "{}}}", indent)?;
            }
        }
        Ok(())
    }
}

impl Codegen for ObjcCodegen {
    fn generate(&mut self, tree: &Struct) -> Result<String, CodegenError> {
        let mut output = String::new();
        let mut path = vec![tree];
        self.write_classes(&mut output, &mut path)?;
        Ok(output)
    }
}
