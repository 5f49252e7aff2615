//! TypeScript code emission via the Emit trait.
//!
//! Each IR type implements `Emit`. Object types can also be emitted as
//! tab-indented blocks, which is how the nested endpoint mapping and the
//! structural schema declarations are laid out.

use super::types::{TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind};
use super::utils::quote_if_needed;

/// Trait for emitting TypeScript code from IR nodes.
pub trait Emit {
    /// Convert the IR node to its TypeScript string representation.
    fn emit(&self) -> String;
}

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string".to_string(),
            TsPrimitive::Number => "number".to_string(),
            TsPrimitive::Boolean => "boolean".to_string(),
            TsPrimitive::Any => "any".to_string(),
            TsPrimitive::Undefined => "undefined".to_string(),
        }
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                let inner_str = inner.emit();
                if matches!(**inner, TsType::Raw(ref raw) if raw.contains(['|', '&', ' '])) {
                    format!("({inner_str})[]")
                } else {
                    format!("{inner_str}[]")
                }
            }
            TsType::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    let parts: Vec<_> = props.iter().map(|p| p.emit()).collect();
                    format!("{{ {} }}", parts.join("; "))
                }
            }
            TsType::Ref(name) | TsType::Raw(name) => name.clone(),
        }
    }
}

impl TsType {
    /// Emit with the outermost `depth` object levels expanded one property
    /// per line, tab-indented from `indent`. Deeper levels stay inline.
    pub fn emit_block(&self, indent: usize, depth: usize) -> String {
        match self {
            TsType::Object(props) if depth > 0 && !props.is_empty() => {
                let prefix = "\t".repeat(indent + 1);
                let mut output = String::from("{\n");
                for prop in props {
                    output.push_str(&format!(
                        "{}{}{}: {};\n",
                        prefix,
                        quote_if_needed(&prop.name),
                        if prop.optional { "?" } else { "" },
                        prop.ty.emit_block(indent + 1, depth - 1)
                    ));
                }
                output.push_str(&"\t".repeat(indent));
                output.push('}');
                output
            }
            _ => self.emit(),
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { "?" } else { "" };
        format!("{}{}: {}", key, opt, self.ty.emit())
    }
}

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        match &self.kind {
            TypeDefKind::Structural { properties } => {
                let body = TsType::Object(properties.clone());
                if properties.is_empty() {
                    format!("export type {} = {{\n}};\n", self.name)
                } else {
                    format!("export type {} = {};\n", self.name, body.emit_block(0, 1))
                }
            }
            TypeDefKind::Alias { ty } => {
                format!("export type {} = {};\n", self.name, ty.emit())
            }
        }
    }
}
