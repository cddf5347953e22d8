//! Command schema IR
//!
//! Language-agnostic records describing the commands of a native component.
//! These are what the native-code emitters consume.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Primitive category of a command parameter.
///
/// Tag-only: none of the supported categories carry further structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ParamKind {
    /// `string`, string literals and unions of string literals
    #[serde(rename = "StringTypeAnnotation")]
    String,
    /// `boolean` and boolean literals
    #[serde(rename = "BooleanTypeAnnotation")]
    Boolean,
    /// `Int32` from the codegen types module
    #[serde(rename = "Int32TypeAnnotation")]
    Int32,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamKind::String => "string",
            ParamKind::Boolean => "boolean",
            ParamKind::Int32 => "Int32",
        };
        f.write_str(name)
    }
}

/// One exposed parameter of a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamShape {
    pub name: String,
    #[serde(rename = "typeAnnotation")]
    pub kind: ParamKind,
}

impl ParamShape {
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A validated command, ready for code generation.
///
/// The component handle parameter is never part of `parameters`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandTypeShape {
    pub name: String,
    pub optional: bool,
    pub parameters: Vec<ParamShape>,
}

impl CommandTypeShape {
    /// Parameter kinds in declaration order
    pub fn signature(&self) -> Vec<ParamKind> {
        self.parameters.iter().map(|p| p.kind).collect()
    }
}

/// All commands extracted for one component type in one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentCommands {
    pub path: PathBuf,
    pub type_name: String,
    pub commands: Vec<CommandTypeShape>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_kind_serializes_as_tagged_annotation() {
        let param = ParamShape::new("durationMs", ParamKind::Int32);
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "durationMs",
                "typeAnnotation": { "type": "Int32TypeAnnotation" }
            })
        );
    }

    #[test]
    fn test_signature_preserves_order() {
        let shape = CommandTypeShape {
            name: "setColor".into(),
            optional: false,
            parameters: vec![
                ParamShape::new("color", ParamKind::String),
                ParamShape::new("animated", ParamKind::Boolean),
            ],
        };
        assert_eq!(shape.signature(), vec![ParamKind::String, ParamKind::Boolean]);
    }

    #[test]
    fn test_param_kind_display() {
        assert_eq!(ParamKind::Int32.to_string(), "Int32");
        assert_eq!(ParamKind::String.to_string(), "string");
    }
}
