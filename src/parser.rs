//! Tree-sitter parser integration for TypeScript
//!
//! Provides parsing of `.ts` / `.tsx` component specs using the tree-sitter
//! TypeScript grammars.

use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};
use tree_sitter::{Language, Node, Parser, Tree};

/// TypeScript dialect of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    TypeScript,
    Tsx,
}

impl Dialect {
    /// Determine the dialect from a file path; anything but `.tsx` is plain TypeScript
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("tsx") => Dialect::Tsx,
            _ => Dialect::TypeScript,
        }
    }

    fn language(self) -> Language {
        match self {
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// A parsed source file
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub tree: Tree,
    pub source: String,
    pub path: PathBuf,
    pub dialect: Dialect,
}

impl ParsedSource {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn text(&self, node: &Node) -> &str {
        node_text(node, &self.source)
    }
}

/// Parse TypeScript source code into a tree-sitter tree.
///
/// Syntax errors are fatal: a partially parsed spec could silently drop
/// command members.
pub fn parse_source(content: &str, path: &Path) -> Result<ParsedSource> {
    let dialect = Dialect::from_path(path);
    let mut parser = Parser::new();
    parser
        .set_language(&dialect.language())
        .map_err(|e| Error::parse(path, 1, 1, format!("Failed to set tree-sitter language: {e}")))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| Error::parse(path, 1, 1, "Failed to parse source code"))?;

    if let Some(node) = first_error(tree.root_node()) {
        return Err(Error::parse(
            path,
            node_line(&node),
            node_column(&node),
            format!("Syntax error near `{}`", snippet(node_text(&node, content))),
        ));
    }

    Ok(ParsedSource {
        tree,
        source: content.to_string(),
        path: path.to_path_buf(),
        dialect,
    })
}

/// Read and parse a file from disk
pub fn parse_file(path: &Path) -> Result<ParsedSource> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read source file", path, e))?;
    parse_source(&content, path)
}

fn first_error<'a>(node: Node<'a>) -> Option<Node<'a>> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error).or(Some(node))
}

fn snippet(text: &str) -> &str {
    let line = text.lines().next().unwrap_or_default();
    match line.char_indices().nth(40) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Value of a string literal node: its fragments with escapes decoded
pub fn string_value(node: &Node, source: &str) -> String {
    let mut cursor = node.walk();
    let value = node
        .named_children(&mut cursor)
        .map(|part| match part.kind() {
            "escape_sequence" => unescape(node_text(&part, source)),
            _ => node_text(&part, source).to_string(),
        })
        .collect();
    value
}

/// Decode one escape sequence, backslash included
fn unescape(sequence: &str) -> String {
    let body = sequence.strip_prefix('\\').unwrap_or(sequence);
    let code_point = |hex: &str| {
        u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
    };

    let decoded = match body {
        "n" => Some("\n".to_string()),
        "t" => Some("\t".to_string()),
        "r" => Some("\r".to_string()),
        "b" => Some("\u{8}".to_string()),
        "f" => Some("\u{c}".to_string()),
        "v" => Some("\u{b}".to_string()),
        "0" => Some("\0".to_string()),
        _ if body.starts_with(['\n', '\r']) => Some(String::new()),
        _ if body.starts_with("u{") => {
            code_point(body.trim_start_matches("u{").trim_end_matches('}'))
        }
        _ if body.starts_with(['u', 'x']) => code_point(&body[1..]),
        _ => None,
    };
    decoded.unwrap_or_else(|| body.to_string())
}

/// Get the line number for a tree-sitter node (1-indexed)
pub fn node_line(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Get the column number for a tree-sitter node (1-indexed)
pub fn node_column(node: &Node) -> usize {
    node.start_position().column + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_path() {
        assert_eq!(Dialect::from_path(Path::new("Native.ts")), Dialect::TypeScript);
        assert_eq!(Dialect::from_path(Path::new("Native.tsx")), Dialect::Tsx);
        assert_eq!(Dialect::from_path(Path::new("Native")), Dialect::TypeScript);
    }

    #[test]
    fn test_parse_interface() {
        let source = "interface NativeCommands { focus(viewRef: Ref<'V'>): void; }";
        let parsed = parse_source(source, Path::new("Native.ts")).unwrap();
        assert_eq!(parsed.root().kind(), "program");
        assert_eq!(parsed.text(&parsed.root()), source);
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let source = "interface NativeCommands {\n  focus(: void;\n}";
        let err = parse_source(source, Path::new("Native.ts")).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("Native.ts"));
    }

    fn only_string_value(source: &str) -> String {
        let parsed = parse_source(source, Path::new("a.ts")).unwrap();
        let mut strings = Vec::new();
        let mut stack = vec![parsed.root()];
        while let Some(node) = stack.pop() {
            if node.kind() == "string" {
                strings.push(node);
            }
            let mut cursor = node.walk();
            stack.extend(node.children(&mut cursor));
        }
        string_value(&strings[0], &parsed.source)
    }

    #[test]
    fn test_string_value_keeps_inner_quotes() {
        assert_eq!(only_string_value(r#"const a = "'a'";"#), "'a'");
        assert_eq!(only_string_value(r#"const a = '"quoted"';"#), "\"quoted\"");
        assert_eq!(only_string_value("const a = '';"), "");
    }

    #[test]
    fn test_string_value_decodes_escapes() {
        assert_eq!(only_string_value(r"const a = 'it\'s';"), "it's");
        assert_eq!(only_string_value(r"const a = 'a\tb\\c';"), "a\tb\\c");
        assert_eq!(only_string_value(r"const a = '\u0041\x42\u{43}';"), "ABC");
    }

    #[test]
    fn test_node_line() {
        let source = "type A = string;\ntype B = boolean;";
        let parsed = parse_source(source, Path::new("a.ts")).unwrap();
        let root = parsed.root();
        let second = root.named_child(1).unwrap();
        assert_eq!(node_line(&second), 2);
        assert_eq!(node_column(&second), 1);
    }
}
