//! Tree-sitter backed type oracle
//!
//! Resolves types within a single TypeScript file: interfaces (and the
//! interfaces they extend), type aliases, object and function type literals,
//! unions, literals and predefined types. Names declared outside the file are
//! left unresolved, except the configured `Int32` names which are recognized
//! by name the way the codegen types module declares them.

use super::{
    CallableDecl, DeclarationNode, ParameterDecl, ParameterSite, PropertyDecl, TypeArgument,
    TypeNodeShape, TypeOracle,
};
use crate::parser::{node_text, string_value, ParsedSource};
use std::collections::{HashMap, HashSet};
use tree_sitter::Node;

/// Alias chains deeper than this are treated as unresolvable
const MAX_RESOLUTION_DEPTH: usize = 32;

/// Names recognized as the codegen `Int32` type
pub const DEFAULT_INT32_NAMES: &[&str] = &["Int32", "CodegenTypes.Int32"];

/// A resolved type
#[derive(Debug, Clone)]
pub enum SourceType<'a> {
    Void,
    String,
    StringLiteral(String),
    Boolean,
    BooleanLiteral(bool),
    Number,
    Int32,
    Any,
    /// Object-like type. Each level holds the member lists of one interface
    /// (all of its merged declarations) or one object literal, most derived
    /// first.
    Object {
        text: String,
        levels: Vec<Vec<Node<'a>>>,
    },
    Function(Node<'a>),
    Union(Vec<SourceType<'a>>),
    /// Reference to a name that is not declared in the file
    Unresolved(String),
    /// Anything else (arrays, tuples, intersections, ...)
    Other(String),
}

/// Declaration sites of a named member
#[derive(Debug, Clone)]
pub struct SourceMember<'a> {
    pub name: String,
    pub sites: Vec<Node<'a>>,
}

/// A call signature: from a function type or a call signature member
#[derive(Debug, Clone, Copy)]
pub struct SourceSignature<'a> {
    pub type_parameters: Option<Node<'a>>,
    pub parameters: Option<Node<'a>>,
    pub return_type: Option<Node<'a>>,
}

impl<'a> SourceSignature<'a> {
    fn from_node(node: Node<'a>) -> Self {
        Self {
            type_parameters: node.child_by_field_name("type_parameters"),
            parameters: node.child_by_field_name("parameters"),
            return_type: node.child_by_field_name("return_type").map(unwrap_annotation),
        }
    }
}

/// Declarations entered while resolving one type
#[derive(Default)]
struct Visited<'a> {
    /// Interfaces already merged; each contributes its members once
    interfaces: HashSet<&'a str>,
    /// Aliases on the current resolution path
    aliases: HashSet<usize>,
}

/// Type oracle over one parsed TypeScript file
pub struct SourceOracle<'a> {
    parsed: &'a ParsedSource,
    /// Top-level declarations by name, in source order
    declarations: HashMap<&'a str, Vec<Node<'a>>>,
    int32_names: Vec<String>,
}

impl<'a> SourceOracle<'a> {
    pub fn new(parsed: &'a ParsedSource) -> Self {
        let mut declarations = HashMap::new();
        collect_declarations(parsed.root(), &parsed.source, &mut declarations);
        Self {
            parsed,
            declarations,
            int32_names: DEFAULT_INT32_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_int32_names(mut self, names: Vec<String>) -> Self {
        self.int32_names = names;
        self
    }

    /// First top-level `interface` or `type` declaration with the given name
    pub fn type_declaration(&self, name: &str) -> Option<Node<'a>> {
        self.declarations.get(name).and_then(|nodes| nodes.first().copied())
    }

    /// Names of all top-level type declarations, sorted
    pub fn declared_types(&self) -> Vec<&'a str> {
        let mut names: Vec<_> = self.declarations.keys().copied().collect();
        names.sort_unstable();
        names
    }

    fn text(&self, node: &Node) -> &'a str {
        node_text(node, &self.parsed.source)
    }

    fn is_int32_name(&self, name: &str) -> bool {
        self.int32_names.iter().any(|n| n == name)
    }

    fn resolve_at(
        &self,
        node: Node<'a>,
        depth: usize,
        visited: &mut Visited<'a>,
    ) -> SourceType<'a> {
        if depth > MAX_RESOLUTION_DEPTH {
            return SourceType::Other(self.text(&node).to_string());
        }
        let next = depth + 1;

        match node.kind() {
            "interface_declaration" => {
                let name = node
                    .child_by_field_name("name")
                    .map(|name| self.text(&name))
                    .unwrap_or_default();
                self.resolve_interface(name, next, visited)
            }
            "type_alias_declaration" => {
                if !visited.aliases.insert(node.id()) {
                    return SourceType::Other(self.text(&node).to_string());
                }
                let ty = node
                    .child_by_field_name("value")
                    .map(|value| self.resolve_at(value, next, visited))
                    .unwrap_or(SourceType::Any);
                visited.aliases.remove(&node.id());
                ty
            }
            "type_annotation" | "parenthesized_type" | "readonly_type" => node
                .named_child(0)
                .map(|inner| self.resolve_at(inner, next, visited))
                .unwrap_or(SourceType::Any),
            "predefined_type" => predefined(self.text(&node)),
            "literal_type" => self.resolve_literal(node),
            "type_identifier" | "nested_type_identifier" => {
                let name = self.text(&node);
                if self.is_int32_name(name) {
                    return SourceType::Int32;
                }
                match self.type_declaration(name) {
                    Some(declaration) => self.resolve_at(declaration, next, visited),
                    None => SourceType::Unresolved(name.to_string()),
                }
            }
            "generic_type" => {
                // Type arguments are not substituted; members keep their declared types.
                let declaration = node
                    .child_by_field_name("name")
                    .and_then(|name| self.type_declaration(self.text(&name)));
                match declaration {
                    Some(declaration) => self.resolve_at(declaration, next, visited),
                    None => SourceType::Unresolved(self.text(&node).to_string()),
                }
            }
            "object_type" => SourceType::Object {
                text: self.text(&node).to_string(),
                levels: vec![vec![node]],
            },
            "function_type" => SourceType::Function(node),
            "union_type" => {
                let mut cursor = node.walk();
                let variants = node
                    .named_children(&mut cursor)
                    .map(|child| self.resolve_at(child, next, visited))
                    .flat_map(|ty| match ty {
                        SourceType::Union(inner) => inner,
                        other => vec![other],
                    })
                    .collect();
                SourceType::Union(variants)
            }
            _ => SourceType::Other(self.text(&node).to_string()),
        }
    }

    /// Merge every declaration of interface `name` with its bases
    fn resolve_interface(
        &self,
        name: &'a str,
        depth: usize,
        visited: &mut Visited<'a>,
    ) -> SourceType<'a> {
        let mut levels = Vec::new();
        self.collect_interface_levels(name, depth, visited, &mut levels);
        SourceType::Object {
            text: name.to_string(),
            levels,
        }
    }

    fn collect_interface_levels(
        &self,
        name: &'a str,
        depth: usize,
        visited: &mut Visited<'a>,
        levels: &mut Vec<Vec<Node<'a>>>,
    ) {
        if depth > MAX_RESOLUTION_DEPTH || !visited.interfaces.insert(name) {
            return;
        }
        let merged: Vec<Node<'a>> = self
            .declarations
            .get(name)
            .into_iter()
            .flatten()
            .copied()
            .filter(|declaration| declaration.kind() == "interface_declaration")
            .collect();

        levels.push(
            merged
                .iter()
                .filter_map(|declaration| declaration.child_by_field_name("body"))
                .collect(),
        );
        for base in merged.iter().flat_map(|declaration| extended_types(*declaration)) {
            self.collect_base_levels(base, depth + 1, visited, levels);
        }
    }

    fn collect_base_levels(
        &self,
        base: Node<'a>,
        depth: usize,
        visited: &mut Visited<'a>,
        levels: &mut Vec<Vec<Node<'a>>>,
    ) {
        let name_node = match base.kind() {
            "generic_type" => base.child_by_field_name("name").unwrap_or(base),
            _ => base,
        };
        let name = self.text(&name_node);
        let is_interface = self
            .type_declaration(name)
            .is_some_and(|declaration| declaration.kind() == "interface_declaration");

        if is_interface {
            self.collect_interface_levels(name, depth, visited, levels);
        } else if let SourceType::Object {
            levels: base_levels,
            ..
        } = self.resolve_at(base, depth, visited)
        {
            levels.extend(base_levels);
        }
    }

    /// Named members of one member list
    fn members_named(&self, body: &Node<'a>, name: &str) -> Vec<Node<'a>> {
        let mut cursor = body.walk();
        let sites = body
            .named_children(&mut cursor)
            .filter(|child| matches!(child.kind(), "method_signature" | "property_signature"))
            .filter(|child| self.member_name(child).as_deref() == Some(name))
            .collect();
        sites
    }

    fn resolve_literal(&self, node: Node<'a>) -> SourceType<'a> {
        match node.named_child(0) {
            Some(literal) if literal.kind() == "string" => {
                SourceType::StringLiteral(string_value(&literal, &self.parsed.source))
            }
            Some(literal) if literal.kind() == "true" => SourceType::BooleanLiteral(true),
            Some(literal) if literal.kind() == "false" => SourceType::BooleanLiteral(false),
            _ => SourceType::Other(self.text(&node).to_string()),
        }
    }

    fn member_name(&self, node: &Node) -> Option<String> {
        let name = node.child_by_field_name("name")?;
        Some(match name.kind() {
            "string" => string_value(&name, &self.parsed.source),
            _ => self.text(&name).to_string(),
        })
    }

    fn declaration_node(&self, site: Node<'a>) -> DeclarationNode<Node<'a>> {
        match site.kind() {
            "method_signature" => {
                let signature = SourceSignature::from_node(site);
                DeclarationNode::Callable(CallableDecl {
                    optional: has_optional_marker(site),
                    type_parameters: count_type_parameters(signature.type_parameters),
                    parameters: self.parameter_sites(signature.parameters),
                    return_type: signature.return_type,
                })
            }
            "property_signature" => DeclarationNode::Property(PropertyDecl {
                optional: has_optional_marker(site),
                type_node: site.child_by_field_name("type").map(unwrap_annotation),
            }),
            other => DeclarationNode::Other {
                kind: other.to_string(),
            },
        }
    }

    fn parameter_sites(&self, parameters: Option<Node<'a>>) -> Vec<ParameterSite<Node<'a>>> {
        let Some(parameters) = parameters else {
            return Vec::new();
        };
        let mut cursor = parameters.walk();
        let sites = parameters
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .map(|child| self.parameter_site(child))
            .collect();
        sites
    }

    fn parameter_site(&self, node: Node<'a>) -> ParameterSite<Node<'a>> {
        let is_parameter = matches!(node.kind(), "required_parameter" | "optional_parameter");
        let pattern = node
            .child_by_field_name("pattern")
            .filter(|pattern| pattern.kind() == "identifier");

        match pattern {
            Some(pattern) if is_parameter => ParameterSite::Declaration(ParameterDecl::new(
                self.text(&pattern),
                node.child_by_field_name("type").map(unwrap_annotation),
            )),
            _ => ParameterSite::Other {
                text: self.text(&node).to_string(),
            },
        }
    }

    fn type_argument(&self, node: Node<'a>) -> TypeArgument {
        if node.kind() == "literal_type" {
            if let Some(literal) = node.named_child(0).filter(|l| l.kind() == "string") {
                return TypeArgument::StringLiteral(string_value(&literal, &self.parsed.source));
            }
        }
        TypeArgument::Other(self.text(&node).to_string())
    }
}

impl<'a> TypeOracle for SourceOracle<'a> {
    type Type = SourceType<'a>;
    type Member = SourceMember<'a>;
    type Signature = SourceSignature<'a>;
    type TypeNode = Node<'a>;

    fn resolve_type(&self, node: &Node<'a>) -> SourceType<'a> {
        self.resolve_at(*node, 0, &mut Visited::default())
    }

    fn member(&self, ty: &SourceType<'a>, name: &str) -> Option<SourceMember<'a>> {
        let SourceType::Object { levels, .. } = ty else {
            return None;
        };

        // A member redeclared in a derived interface hides the base declarations.
        levels.iter().find_map(|level| {
            let sites: Vec<_> = level
                .iter()
                .flat_map(|body| self.members_named(body, name))
                .collect();
            (!sites.is_empty()).then(|| SourceMember {
                name: name.to_string(),
                sites,
            })
        })
    }

    fn declarations(&self, member: &SourceMember<'a>) -> Vec<DeclarationNode<Node<'a>>> {
        member
            .sites
            .iter()
            .map(|site| self.declaration_node(*site))
            .collect()
    }

    fn call_signatures(&self, ty: &SourceType<'a>) -> Vec<SourceSignature<'a>> {
        match ty {
            SourceType::Function(node) => vec![SourceSignature::from_node(*node)],
            SourceType::Object { levels, .. } => levels
                .iter()
                .flatten()
                .flat_map(|body| {
                    let mut cursor = body.walk();
                    let signatures: Vec<_> = body
                        .named_children(&mut cursor)
                        .filter(|child| child.kind() == "call_signature")
                        .collect();
                    signatures
                })
                .map(SourceSignature::from_node)
                .collect(),
            _ => Vec::new(),
        }
    }

    fn signature_type_parameters(&self, signature: &SourceSignature<'a>) -> usize {
        count_type_parameters(signature.type_parameters)
    }

    fn return_type(&self, signature: &SourceSignature<'a>) -> SourceType<'a> {
        signature
            .return_type
            .map(|node| self.resolve_at(node, 0, &mut Visited::default()))
            .unwrap_or(SourceType::Any)
    }

    fn parameters(&self, signature: &SourceSignature<'a>) -> Vec<ParameterSite<Node<'a>>> {
        self.parameter_sites(signature.parameters)
    }

    fn is_string_like(&self, ty: &SourceType<'a>) -> bool {
        match ty {
            SourceType::String | SourceType::StringLiteral(_) => true,
            SourceType::Union(variants) => {
                !variants.is_empty() && variants.iter().all(|v| self.is_string_like(v))
            }
            _ => false,
        }
    }

    fn is_boolean_like(&self, ty: &SourceType<'a>) -> bool {
        match ty {
            SourceType::Boolean | SourceType::BooleanLiteral(_) => true,
            SourceType::Union(variants) => {
                !variants.is_empty() && variants.iter().all(|v| self.is_boolean_like(v))
            }
            _ => false,
        }
    }

    fn is_int32_like(&self, ty: &SourceType<'a>) -> bool {
        matches!(ty, SourceType::Int32)
    }

    fn is_void_like(&self, ty: &SourceType<'a>) -> bool {
        matches!(ty, SourceType::Void)
    }

    fn describe_node(&self, node: &Node<'a>) -> TypeNodeShape {
        match node.kind() {
            "type_identifier" | "nested_type_identifier" => TypeNodeShape::Reference {
                name: self.text(node).to_string(),
                arguments: Vec::new(),
            },
            "generic_type" => {
                let name = node
                    .child_by_field_name("name")
                    .map(|name| self.text(&name).to_string())
                    .unwrap_or_default();
                let arguments = node
                    .child_by_field_name("type_arguments")
                    .map(|args| {
                        let mut cursor = args.walk();
                        let arguments: Vec<_> = args
                            .named_children(&mut cursor)
                            .map(|arg| self.type_argument(arg))
                            .collect();
                        arguments
                    })
                    .unwrap_or_default();
                TypeNodeShape::Reference { name, arguments }
            }
            _ => TypeNodeShape::Other,
        }
    }

    fn node_text(&self, node: &Node<'a>) -> String {
        self.text(node).to_string()
    }

    fn type_text(&self, ty: &SourceType<'a>) -> String {
        match ty {
            SourceType::Void => "void".into(),
            SourceType::String => "string".into(),
            SourceType::StringLiteral(value) => format!("'{value}'"),
            SourceType::Boolean => "boolean".into(),
            SourceType::BooleanLiteral(value) => value.to_string(),
            SourceType::Number => "number".into(),
            SourceType::Int32 => "Int32".into(),
            SourceType::Any => "any".into(),
            SourceType::Object { text, .. } => text.clone(),
            SourceType::Function(node) => self.text(node).to_string(),
            SourceType::Union(variants) => variants
                .iter()
                .map(|v| self.type_text(v))
                .collect::<Vec<_>>()
                .join(" | "),
            SourceType::Unresolved(text) | SourceType::Other(text) => text.clone(),
        }
    }
}

fn predefined(name: &str) -> SourceType<'static> {
    match name {
        "void" => SourceType::Void,
        "string" => SourceType::String,
        "boolean" => SourceType::Boolean,
        "number" => SourceType::Number,
        "any" => SourceType::Any,
        other => SourceType::Other(other.to_string()),
    }
}

/// `: T` annotations wrap the type node itself
fn unwrap_annotation(node: Node) -> Node {
    match node.kind() {
        "type_annotation" => node.named_child(0).unwrap_or(node),
        _ => node,
    }
}

fn has_optional_marker(node: Node) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| child.kind() == "?");
    found
}

fn count_type_parameters(type_parameters: Option<Node>) -> usize {
    type_parameters.map_or(0, |params| {
        let mut cursor = params.walk();
        let count = params
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "type_parameter")
            .count();
        count
    })
}

/// Types named in an interface's `extends` clause
fn extended_types(declaration: Node) -> Vec<Node> {
    let mut cursor = declaration.walk();
    let clause = declaration
        .named_children(&mut cursor)
        .find(|child| child.kind() == "extends_type_clause");
    clause.map_or_else(Vec::new, |clause| {
        let mut clause_cursor = clause.walk();
        let bases = clause.named_children(&mut clause_cursor).collect();
        bases
    })
}

fn collect_declarations<'a>(
    node: Node<'a>,
    source: &'a str,
    out: &mut HashMap<&'a str, Vec<Node<'a>>>,
) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "interface_declaration" | "type_alias_declaration" => {
                if let Some(name) = child.child_by_field_name("name") {
                    out.entry(node_text(&name, source)).or_default().push(child);
                }
            }
            "export_statement" | "ambient_declaration" => collect_declarations(child, source, out),
            _ => {}
        }
    }
}
