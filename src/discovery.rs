//! Command request discovery
//!
//! Component specs declare their commands with a factory call:
//!
//! ```typescript
//! export const Commands = codegenNativeCommands<NativeCommands>({
//!   supportedCommands: ['focus', 'setColor'],
//! });
//! ```
//!
//! This module finds those calls and turns them into the command type name
//! and the ordered list of command names to extract.

use crate::errors::{Error, Result};
use crate::parser::{node_line, string_value, ParsedSource};
use tree_sitter::Node;

/// Default command factory function names
pub const DEFAULT_FACTORIES: &[&str] = &["codegenNativeCommands"];

const SUPPORTED_COMMANDS: &str = "supportedCommands";

/// A command factory call found in a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredRequest {
    /// Name of the type passed as the factory's type argument
    pub type_name: String,
    /// Command names, in declaration order
    pub commands: Vec<String>,
    pub line: usize,
}

/// Find every command factory call in `parsed`.
pub fn discover_requests(
    parsed: &ParsedSource,
    factories: &[String],
) -> Result<Vec<DiscoveredRequest>> {
    let mut calls = Vec::new();
    collect_factory_calls(parsed.root(), parsed, factories, &mut calls);
    calls
        .into_iter()
        .map(|call| read_factory_call(call, parsed))
        .collect()
}

fn collect_factory_calls<'a>(
    node: Node<'a>,
    parsed: &ParsedSource,
    factories: &[String],
    calls: &mut Vec<Node<'a>>,
) {
    if node.kind() == "call_expression" {
        let is_factory = node
            .child_by_field_name("function")
            .map(|function| parsed.text(&function))
            .is_some_and(|name| factories.iter().any(|factory| factory == name));
        if is_factory {
            calls.push(node);
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_factory_calls(child, parsed, factories, calls);
    }
}

fn read_factory_call(call: Node, parsed: &ParsedSource) -> Result<DiscoveredRequest> {
    let line = node_line(&call);
    let fail = |message: String| Error::discovery(&parsed.path, format!("line {line}: {message}"));
    let factory = call
        .child_by_field_name("function")
        .map(|function| parsed.text(&function).to_string())
        .unwrap_or_default();

    let type_name = call
        .child_by_field_name("type_arguments")
        .and_then(|args| args.named_child(0))
        .filter(|arg| matches!(arg.kind(), "type_identifier" | "nested_type_identifier"))
        .map(|arg| parsed.text(&arg).to_string())
        .ok_or_else(|| fail(format!("`{factory}` needs the command type as its type argument")))?;

    let options = call
        .child_by_field_name("arguments")
        .and_then(|args| args.named_child(0))
        .filter(|arg| arg.kind() == "object")
        .ok_or_else(|| fail(format!("`{factory}` needs an options object")))?;

    let commands = supported_commands(options, parsed)
        .ok_or_else(|| {
            fail(format!(
                "`{factory}` options need `{SUPPORTED_COMMANDS}` as an array of string literals"
            ))
        })?;

    Ok(DiscoveredRequest {
        type_name,
        commands,
        line,
    })
}

fn supported_commands(options: Node, parsed: &ParsedSource) -> Option<Vec<String>> {
    let mut cursor = options.walk();
    let value = options
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "pair")
        .find(|pair| {
            pair.child_by_field_name("key").is_some_and(|key| {
                let name = match key.kind() {
                    "string" => string_value(&key, &parsed.source),
                    _ => parsed.text(&key).to_string(),
                };
                name == SUPPORTED_COMMANDS
            })
        })?
        .child_by_field_name("value")
        .filter(|value| value.kind() == "array")?;

    let mut value_cursor = value.walk();
    let commands = value
        .named_children(&mut value_cursor)
        .filter(|element| element.kind() != "comment")
        .map(|element| (element.kind() == "string").then(|| string_value(&element, &parsed.source)))
        .collect();
    commands
}
