//! Type resolution oracle
//!
//! The extraction pipeline never inspects source code on its own. It asks a
//! [`TypeOracle`] for semantic types, members, declaration sites and call
//! signatures, and classifies the answers. The oracle is assumed to be fully
//! loaded before extraction starts and is only ever read.
//!
//! Declaration sites and parameters are returned as small syntactic records
//! ([`DeclarationNode`], [`ParameterSite`]) generic over the oracle's type node
//! handle, so the pipeline can branch on declaration style without knowing
//! the underlying syntax tree.
//!
//! - [`source::SourceOracle`]: tree-sitter backed oracle over one TypeScript file

pub mod source;

pub use source::SourceOracle;

/// Semantic type-checking capability the extraction pipeline depends on.
pub trait TypeOracle {
    /// Resolved (semantic) type
    type Type;
    /// Named member of a type
    type Member;
    /// Call signature of a callable type
    type Signature;
    /// Syntactic type reference / declaration handle
    type TypeNode: Clone;

    /// Resolve a syntactic type node (or type declaration) to its semantic type
    fn resolve_type(&self, node: &Self::TypeNode) -> Self::Type;

    /// Look up a named member, `None` when the type has no such member
    fn member(&self, ty: &Self::Type, name: &str) -> Option<Self::Member>;

    /// Every declaration site of a member, in source order
    fn declarations(&self, member: &Self::Member) -> Vec<DeclarationNode<Self::TypeNode>>;

    /// Call signatures of a type, empty when the type is not callable
    fn call_signatures(&self, ty: &Self::Type) -> Vec<Self::Signature>;

    /// Number of type parameters declared on a signature
    fn signature_type_parameters(&self, signature: &Self::Signature) -> usize;

    fn return_type(&self, signature: &Self::Signature) -> Self::Type;

    fn parameters(&self, signature: &Self::Signature) -> Vec<ParameterSite<Self::TypeNode>>;

    fn is_string_like(&self, ty: &Self::Type) -> bool;
    fn is_boolean_like(&self, ty: &Self::Type) -> bool;
    fn is_int32_like(&self, ty: &Self::Type) -> bool;
    fn is_void_like(&self, ty: &Self::Type) -> bool;

    /// Syntactic shape of a type node
    fn describe_node(&self, node: &Self::TypeNode) -> TypeNodeShape;

    /// Source text of a node, used in diagnostics
    fn node_text(&self, node: &Self::TypeNode) -> String;

    /// Printable form of a semantic type, used in diagnostics
    fn type_text(&self, ty: &Self::Type) -> String;
}

/// One declaration site of a member
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationNode<N> {
    /// `name(...): R` or a call signature
    Callable(CallableDecl<N>),
    /// `name: T`, where `T` may be a callable type
    Property(PropertyDecl<N>),
    /// Anything else (index signatures, constructors, ...)
    Other { kind: String },
}

/// Method-style or call-signature-style declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableDecl<N> {
    pub optional: bool,
    pub type_parameters: usize,
    pub parameters: Vec<ParameterSite<N>>,
    /// Declared return type; `None` when the annotation is missing
    pub return_type: Option<N>,
}

/// Property declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl<N> {
    pub optional: bool,
    /// Declared type; `None` when the annotation is missing
    pub type_node: Option<N>,
}

/// A parameter as reported by the oracle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterSite<N> {
    Declaration(ParameterDecl<N>),
    /// Resolved to something that is not a plain parameter declaration
    Other { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDecl<N> {
    /// Source-level identifier text
    pub name: String,
    pub type_node: Option<N>,
}

impl<N> ParameterDecl<N> {
    pub fn new(name: impl Into<String>, type_node: Option<N>) -> Self {
        Self {
            name: name.into(),
            type_node,
        }
    }
}

/// Syntactic shape of a type node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNodeShape {
    /// `Name`, `Ns.Name` or `Name<Args>`
    Reference {
        name: String,
        arguments: Vec<TypeArgument>,
    },
    Other,
}

/// Type argument of a reference, as far as the ref check cares
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArgument {
    StringLiteral(String),
    Other(String),
}
