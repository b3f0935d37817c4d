use std::fmt::Write;

use crate::matcher::MemberDescriptor;
use crate::section::{SectionKind, Visibility};

/// One indentation level in generated stubs.
pub const INDENT: &str = "    ";

/// Renders a descriptor into its stub declaration fragment. A pure text
/// template: whatever text the matcher captured is reproduced as-is.
pub fn render_member(
    descriptor: &MemberDescriptor,
    kind: SectionKind,
    visibility: Visibility,
) -> String {
    let vis = visibility.keyword();
    let stat = if kind.is_static() { "static " } else { "" };
    match descriptor {
        MemberDescriptor::Function {
            return_type,
            name,
            params,
        } => {
            format!("{INDENT}{vis} {stat}{return_type} {name} {params} {{\n\n{INDENT}}}\n\n")
        }
        MemberDescriptor::Field {
            modifiers,
            ty,
            name,
            initializer,
        } => {
            let mut out = format!("{INDENT}{vis} {stat}");
            if !modifiers.is_empty() {
                out.push_str(modifiers);
                out.push(' ');
            }
            write!(out, "{ty} {name}").expect("write field declaration");
            if let Some(init) = initializer {
                write!(out, " = {init}").expect("write field initializer");
            }
            out.push_str(";\n");
            out
        }
        MemberDescriptor::NestedType { ty, name, members } => {
            let mut out = format!("{INDENT}{vis} {ty} {name} {{\n");
            for line in members.lines() {
                writeln!(out, "{INDENT}{INDENT}{line}").expect("write nested member");
            }
            out.push_str(INDENT);
            out.push_str("}\n\n");
            out
        }
    }
}
