//! In-memory type oracle.

use crate::oracle::{
    CallableDecl, DeclarationNode, ParameterDecl, ParameterSite, PropertyDecl, TypeArgument,
    TypeNodeShape, TypeOracle,
};

/// Semantic type understood by [`MockOracle`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockType {
    Void,
    String,
    Boolean,
    Int32,
    Number,
    /// Any other type, described by its text
    Opaque(String),
    Object(Vec<(String, DeclarationNode<MockNode>)>),
    Function(Vec<MockSignature>),
}

/// Syntactic type node: text, the type it resolves to, and its shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockNode {
    pub text: String,
    pub ty: MockType,
    pub shape: TypeNodeShape,
}

impl MockNode {
    pub fn new(text: impl Into<String>, ty: MockType) -> Self {
        Self {
            text: text.into(),
            ty,
            shape: TypeNodeShape::Other,
        }
    }

    pub fn string() -> Self {
        Self::new("string", MockType::String)
    }

    pub fn boolean() -> Self {
        Self::new("boolean", MockType::Boolean)
    }

    pub fn number() -> Self {
        Self::new("number", MockType::Number)
    }

    pub fn void() -> Self {
        Self::new("void", MockType::Void)
    }

    pub fn int32() -> Self {
        Self {
            shape: TypeNodeShape::Reference {
                name: "Int32".into(),
                arguments: vec![],
            },
            ..Self::new("Int32", MockType::Int32)
        }
    }

    pub fn opaque(text: &str) -> Self {
        Self::new(text, MockType::Opaque(text.to_string()))
    }

    /// `Ref<'view'>`
    pub fn view_ref(view: &str) -> Self {
        Self::reference("Ref", vec![TypeArgument::StringLiteral(view.to_string())])
    }

    /// A type reference with the given name and arguments
    pub fn reference(name: &str, arguments: Vec<TypeArgument>) -> Self {
        let text = if arguments.is_empty() {
            name.to_string()
        } else {
            let args: Vec<String> = arguments
                .iter()
                .map(|arg| match arg {
                    TypeArgument::StringLiteral(value) => format!("'{value}'"),
                    TypeArgument::Other(text) => text.clone(),
                })
                .collect();
            format!("{name}<{}>", args.join(", "))
        };
        Self {
            shape: TypeNodeShape::Reference {
                name: name.to_string(),
                arguments,
            },
            ..Self::new(text.clone(), MockType::Opaque(text))
        }
    }

    /// A function type with the given call signatures
    pub fn function(signatures: Vec<MockSignature>) -> Self {
        Self::new("(...) => void", MockType::Function(signatures))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockSignature {
    pub type_parameters: usize,
    pub parameters: Vec<ParameterSite<MockNode>>,
    pub return_type: MockType,
}

impl MockSignature {
    /// A non-generic signature returning `void`
    pub fn new(parameters: Vec<ParameterSite<MockNode>>) -> Self {
        Self {
            type_parameters: 0,
            parameters,
            return_type: MockType::Void,
        }
    }

    pub fn generic(mut self, type_parameters: usize) -> Self {
        self.type_parameters = type_parameters;
        self
    }

    pub fn returns(mut self, return_type: MockType) -> Self {
        self.return_type = return_type;
        self
    }
}

/// Builder around a [`DeclarationNode`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockDeclaration(pub DeclarationNode<MockNode>);

impl MockDeclaration {
    pub fn optional(mut self) -> Self {
        match &mut self.0 {
            DeclarationNode::Callable(decl) => decl.optional = true,
            DeclarationNode::Property(decl) => decl.optional = true,
            DeclarationNode::Other { .. } => {}
        }
        self
    }

    /// Only affects method declarations
    pub fn generic(mut self, type_parameters: usize) -> Self {
        if let DeclarationNode::Callable(decl) = &mut self.0 {
            decl.type_parameters = type_parameters;
        }
        self
    }

    /// Only affects method declarations
    pub fn returns(mut self, return_type: MockNode) -> Self {
        if let DeclarationNode::Callable(decl) = &mut self.0 {
            decl.return_type = Some(return_type);
        }
        self
    }
}

/// `name(...params): void`
pub fn method(parameters: Vec<ParameterSite<MockNode>>) -> MockDeclaration {
    MockDeclaration(DeclarationNode::Callable(CallableDecl {
        optional: false,
        type_parameters: 0,
        parameters,
        return_type: Some(MockNode::void()),
    }))
}

/// `name: type`
pub fn property(type_node: MockNode) -> MockDeclaration {
    MockDeclaration(DeclarationNode::Property(PropertyDecl {
        optional: false,
        type_node: Some(type_node),
    }))
}

pub fn param(name: &str, type_node: MockNode) -> ParameterSite<MockNode> {
    ParameterSite::Declaration(param_decl(name, type_node))
}

pub fn param_decl(name: &str, type_node: MockNode) -> ParameterDecl<MockNode> {
    ParameterDecl::new(name, Some(type_node))
}

/// A component type declaration under construction
#[derive(Debug, Clone, Default)]
pub struct MockComponent {
    name: String,
    members: Vec<(String, DeclarationNode<MockNode>)>,
}

impl MockComponent {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: Vec::new(),
        }
    }

    /// Add a declaration site; repeating a name adds another site
    pub fn member(mut self, name: &str, declaration: MockDeclaration) -> Self {
        self.members.push((name.to_string(), declaration.0));
        self
    }

    pub fn declaration(&self) -> MockNode {
        MockNode::new(
            format!("interface {} {{ ... }}", self.name),
            MockType::Object(self.members.clone()),
        )
    }
}

/// Oracle answering from [`MockType`] values carried by the nodes themselves
#[derive(Debug, Clone, Copy, Default)]
pub struct MockOracle;

impl MockOracle {
    pub fn new() -> Self {
        Self
    }
}

impl TypeOracle for MockOracle {
    type Type = MockType;
    type Member = Vec<DeclarationNode<MockNode>>;
    type Signature = MockSignature;
    type TypeNode = MockNode;

    fn resolve_type(&self, node: &MockNode) -> MockType {
        node.ty.clone()
    }

    fn member(&self, ty: &MockType, name: &str) -> Option<Self::Member> {
        let MockType::Object(members) = ty else {
            return None;
        };
        let sites: Vec<_> = members
            .iter()
            .filter(|(member, _)| member == name)
            .map(|(_, declaration)| declaration.clone())
            .collect();
        (!sites.is_empty()).then_some(sites)
    }

    fn declarations(&self, member: &Self::Member) -> Vec<DeclarationNode<MockNode>> {
        member.clone()
    }

    fn call_signatures(&self, ty: &MockType) -> Vec<MockSignature> {
        match ty {
            MockType::Function(signatures) => signatures.clone(),
            _ => Vec::new(),
        }
    }

    fn signature_type_parameters(&self, signature: &MockSignature) -> usize {
        signature.type_parameters
    }

    fn return_type(&self, signature: &MockSignature) -> MockType {
        signature.return_type.clone()
    }

    fn parameters(&self, signature: &MockSignature) -> Vec<ParameterSite<MockNode>> {
        signature.parameters.clone()
    }

    fn is_string_like(&self, ty: &MockType) -> bool {
        matches!(ty, MockType::String)
    }

    fn is_boolean_like(&self, ty: &MockType) -> bool {
        matches!(ty, MockType::Boolean)
    }

    fn is_int32_like(&self, ty: &MockType) -> bool {
        matches!(ty, MockType::Int32)
    }

    fn is_void_like(&self, ty: &MockType) -> bool {
        matches!(ty, MockType::Void)
    }

    fn describe_node(&self, node: &MockNode) -> TypeNodeShape {
        node.shape.clone()
    }

    fn node_text(&self, node: &MockNode) -> String {
        node.text.clone()
    }

    fn type_text(&self, ty: &MockType) -> String {
        match ty {
            MockType::Void => "void".into(),
            MockType::String => "string".into(),
            MockType::Boolean => "boolean".into(),
            MockType::Int32 => "Int32".into(),
            MockType::Number => "number".into(),
            MockType::Opaque(text) => text.clone(),
            MockType::Object(_) => "{ ... }".into(),
            MockType::Function(_) => "(...) => unknown".into(),
        }
    }
}
