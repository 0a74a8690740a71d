//! Swift code generator
//!
//! Renders a validated namespace tree as nested Swift structs with static
//! accessors. Emission is purely syntactic: the tree is assumed to be
//! collision free and is never re-validated here.

use crate::properties::HOSTING_BUNDLE;
use crate::{Codegen, CodegenError};
use resgen_core::{AccessLevel, BundleSource, Lookup, Member, MemberKind, Parameter, Struct};
use std::fmt::Write;

pub const TOOL_NAME: &str = "resgen";

/// Banner placed at the top of every generated file
pub fn header() -> String {
    format!(
        "//\n// This is a generated file, do not edit!\n// Generated by {}\n//\n",
        TOOL_NAME
    )
}

/// Escape a string as a Swift string literal, quotes included
pub fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            '\0' => literal.push_str("\\0"),
            c if c.is_control() => {
                let _ = write!(literal, "\\u{{{:x}}}", c as u32);
            }
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

/// Keep a comment on one line
pub(crate) fn comment_text(line: &str) -> String {
    line.replace('\r', "\\r").replace('\n', "\\n")
}

/// `label name: Type = default`
pub(crate) fn parameter_declaration(parameter: &Parameter, with_default: bool) -> String {
    let mut declaration = match &parameter.label {
        None => format!("_ {}: {}", parameter.name, parameter.ty),
        Some(label) if *label == parameter.name => format!("{}: {}", parameter.name, parameter.ty),
        Some(label) => format!("{} {}: {}", label, parameter.name, parameter.ty),
    };
    if let (true, Some(default)) = (with_default, &parameter.default_value) {
        let _ = write!(declaration, " = {}", default);
    }
    declaration
}

/// `label: name` as written at a call site
pub(crate) fn call_argument(parameter: &Parameter) -> String {
    match &parameter.label {
        None => parameter.name.clone(),
        Some(label) => format!("{}: {}", label, parameter.name),
    }
}

/// Configuration for Swift code generation
#[derive(Debug, Clone, Default)]
pub struct SwiftCodegenConfig {
    pub access_level: AccessLevel,
    /// Emit `///` comments for structs and members
    pub include_docs: bool,
}

/// Swift code generator
pub struct SwiftCodegen {
    config: SwiftCodegenConfig,
    indent_size: usize,
}

impl Default for SwiftCodegen {
    fn default() -> Self {
        Self::new()
    }
}

impl SwiftCodegen {
    pub fn new() -> Self {
        Self {
            config: SwiftCodegenConfig {
                access_level: AccessLevel::default(),
                include_docs: true,
            },
            indent_size: 2,
        }
    }

    pub fn with_config(mut self, config: SwiftCodegenConfig) -> Self {
        self.config = config;
        self
    }

    fn indent(&self, level: usize) -> String {
        " ".repeat(level * self.indent_size)
    }

    fn write_docs(&self, out: &mut String, lines: &[String], level: usize) -> Result<(), CodegenError> {
        if !self.config.include_docs {
            return Ok(());
        }
        for line in lines {
            writeln!(out, "{}/// {}", self.indent(level), comment_text(line))?;
        }
        Ok(())
    }

    fn write_struct(
        &self,
        out: &mut String,
        tree: &Struct,
        root: &str,
        level: usize,
    ) -> Result<(), CodegenError> {
        let indent = self.indent(level);
        let access = self.config.access_level.keyword();

        self.write_docs(out, &tree.comment, level)?;
        writeln!(out, "{}{} struct {} {{", indent, access, tree.name)?;

        for member in tree.sorted_members() {
            self.write_member(out, member, root, level + 1)?;
            writeln!(out)?;
        }
        for child in tree.sorted_children() {
            self.write_struct(out, child, root, level + 1)?;
            writeln!(out)?;
        }

        writeln!(out, "{}fileprivate init() {{}}", self.indent(level + 1))?;
        writeln!(out, "{}}}", indent)?;
        Ok(())
    }

    fn write_member(
        &self,
        out: &mut String,
        member: &Member,
        root: &str,
        level: usize,
    ) -> Result<(), CodegenError> {
        let indent = self.indent(level);
        let access = self.config.access_level.keyword();

        self.write_docs(out, &member.comment, level)?;
        if let Some(availability) = &member.availability {
            writeln!(out, "{}@available({}, *)", indent, availability)?;
        }

        let body = lookup_expression(member, root);
        match &member.kind {
            MemberKind::Property => {
                writeln!(
                    out,
                    "{}{} static let {}: {} = {}",
                    indent, access, member.identifier, member.return_type, body
                )?;
            }
            MemberKind::Function { parameters } => {
                let parameters: Vec<String> = parameters
                    .iter()
                    .map(|p| parameter_declaration(p, true))
                    .collect();
                writeln!(
                    out,
                    "{}{} static func {}({}) -> {} {{",
                    indent,
                    access,
                    member.identifier,
                    parameters.join(", "),
                    member.return_type
                )?;
                writeln!(out, "{}return {}", self.indent(level + 1), body)?;
                writeln!(out, "{}}}", indent)?;
            }
        }
        Ok(())
    }
}

impl Codegen for SwiftCodegen {
    fn generate(&mut self, tree: &Struct) -> Result<String, CodegenError> {
        let mut output = String::new();
        self.write_struct(&mut output, tree, &tree.name.sanitized_name, 0)?;
        Ok(output)
    }
}

/// Name of the `index`th parameter, or `nil` when the member has none
fn argument(member: &Member, index: usize) -> &str {
    member
        .parameters()
        .get(index)
        .map(|p| p.name.as_str())
        .unwrap_or("nil")
}

/// Runtime expression an accessor evaluates
fn lookup_expression(member: &Member, root: &str) -> String {
    let bundle = format!("{}.{}", root, HOSTING_BUNDLE);
    let mut cast_type = member.return_type.clone();
    cast_type.optional = false;

    match &member.lookup {
        Lookup::Literal(value) => string_literal(value),
        Lookup::HostingBundle => bundle,
        Lookup::Bundle(BundleSource::Main) => "Foundation.Bundle.main".to_string(),
        Lookup::Bundle(BundleSource::Identifier(identifier)) => format!(
            "Foundation.Bundle(identifier: {}) ?? Foundation.Bundle.main",
            string_literal(identifier)
        ),
        Lookup::Image { name } => format!(
            "UIKit.UIImage(named: {}, in: {}, compatibleWith: {})",
            string_literal(name),
            bundle,
            argument(member, 0)
        ),
        Lookup::Color { name } => format!(
            "UIKit.UIColor(named: {}, in: {}, compatibleWith: {})",
            string_literal(name),
            bundle,
            argument(member, 0)
        ),
        Lookup::Font { postscript_name } => format!(
            "UIKit.UIFont(name: {}, size: {})",
            string_literal(postscript_name),
            argument(member, 0)
        ),
        Lookup::File { name, extension } => format!(
            "{}.url(forResource: {}, withExtension: {})",
            bundle,
            string_literal(name),
            extension
                .as_deref()
                .map(string_literal)
                .unwrap_or_else(|| "nil".to_string())
        ),
        Lookup::LocalizedString { table, key, .. } => {
            let localized = format!(
                "Foundation.NSLocalizedString({}, tableName: {}, bundle: {}, comment: \"\")",
                string_literal(key),
                string_literal(table),
                bundle
            );
            let parameters = member.parameters();
            if parameters.is_empty() {
                localized
            } else {
                let arguments: Vec<&str> = parameters.iter().map(|p| p.name.as_str()).collect();
                format!(
                    "String(format: {}, locale: Foundation.Locale.current, {})",
                    localized,
                    arguments.join(", ")
                )
            }
        }
        Lookup::InitialViewController { storyboard } => format!(
            "UIKit.UIStoryboard(name: {}, bundle: {}).instantiateInitialViewController() as? {}",
            string_literal(storyboard),
            bundle,
            cast_type
        ),
        Lookup::ViewController {
            storyboard,
            identifier,
        } => format!(
            "UIKit.UIStoryboard(name: {}, bundle: {}).instantiateViewController(withIdentifier: {}) as? {}",
            string_literal(storyboard),
            bundle,
            string_literal(identifier),
            cast_type
        ),
        Lookup::NibView { nib, index } => format!(
            "UIKit.UINib(nibName: {}, bundle: {}).instantiate(withOwner: {}, options: {})[{}] as? {}",
            string_literal(nib),
            bundle,
            argument(member, 0),
            argument(member, 1),
            index,
            cast_type
        ),
        Lookup::ReuseIdentifier { identifier } => {
            format!("Rswift.ReuseIdentifier(identifier: {})", string_literal(identifier))
        }
        Lookup::SegueIdentifier { identifier } => format!(
            "Rswift.StoryboardSegueIdentifier(identifier: {})",
            string_literal(identifier)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use resgen_core::{sanitize, Identifier, IdentifierCase, StructKind, TypeReference};

    #[test]
    fn test_string_literal_escaping() {
        assert_eq!(string_literal("plain"), "\"plain\"");
        assert_eq!(string_literal("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(string_literal("a\\b"), "\"a\\\\b\"");
        assert_eq!(string_literal("\u{1b}"), "\"\\u{1b}\"");
    }

    #[test]
    fn test_parameter_declaration() {
        let unnamed = Parameter::new(None, "value1", TypeReference::string());
        assert_eq!(parameter_declaration(&unnamed, true), "_ value1: String");
        assert_eq!(call_argument(&unnamed), "value1");

        let labelled = Parameter::new(
            Some("compatibleWith"),
            "traitCollection",
            TypeReference::uikit("UITraitCollection").optional(),
        )
        .with_default("nil");
        assert_eq!(
            parameter_declaration(&labelled, true),
            "compatibleWith traitCollection: UIKit.UITraitCollection? = nil"
        );
        assert_eq!(
            parameter_declaration(&labelled, false),
            "compatibleWith traitCollection: UIKit.UITraitCollection?"
        );
        assert_eq!(call_argument(&labelled), "compatibleWith: traitCollection");
    }

    #[test]
    fn test_generate_nested_structs() {
        let greeting = Member::function(
            sanitize("greeting", IdentifierCase::Value),
            vec![Parameter::new(None, "value1", TypeReference::string())],
            TypeReference::string(),
            Lookup::LocalizedString {
                table: "Localizable".to_string(),
                key: "greeting".to_string(),
                locales: Vec::new(),
            },
        )
        .with_comment("en translation: Hello %@");
        let tree = Struct::new(Identifier::verbatim("R"), StructKind::Root).with_child(
            Struct::new(Identifier::verbatim("string"), StructKind::Namespace).with_child(
                Struct::new(sanitize("Localizable", IdentifierCase::Value), StructKind::StringTable)
                    .with_member(greeting),
            ),
        );

        let mut codegen = SwiftCodegen::new().with_config(SwiftCodegenConfig {
            access_level: AccessLevel::Public,
            include_docs: true,
        });
        let output = codegen.generate(&tree).unwrap();
        let expected = r#"public struct R {
  public struct string {
    public struct localizable {
      /// en translation: Hello %@
      public static func greeting(_ value1: String) -> String {
        return String(format: Foundation.NSLocalizedString("greeting", tableName: "Localizable", bundle: R.hostingBundle, comment: ""), locale: Foundation.Locale.current, value1)
      }

      fileprivate init() {}
    }

    fileprivate init() {}
  }

  fileprivate init() {}
}
"#;
        assert_eq!(output, expected);
    }

    #[test]
    fn test_properties_and_availability() {
        let tree = Struct::new(Identifier::verbatim("color"), StructKind::Namespace)
            .with_member(
                Member::function(
                    sanitize("brand", IdentifierCase::Value),
                    vec![Parameter::new(
                        Some("compatibleWith"),
                        "traitCollection",
                        TypeReference::uikit("UITraitCollection").optional(),
                    )
                    .with_default("nil")],
                    TypeReference::uikit("UIColor").optional(),
                    Lookup::Color {
                        name: "brand".to_string(),
                    },
                )
                .with_availability("iOS 11.0, tvOS 11.0"),
            )
            .with_member(Member::property(
                Identifier::verbatim("name"),
                TypeReference::string(),
                Lookup::Literal("Main".to_string()),
            ));

        let mut codegen = SwiftCodegen::new();
        let output = codegen.generate(&tree).unwrap();
        assert!(output.contains("  @available(iOS 11.0, tvOS 11.0, *)\n  internal static func brand(compatibleWith traitCollection: UIKit.UITraitCollection? = nil) -> UIKit.UIColor? {\n    return UIKit.UIColor(named: \"brand\", in: color.hostingBundle, compatibleWith: traitCollection)\n  }\n"));
        assert!(output.contains("  internal static let name: String = \"Main\"\n"));
    }
}
