//! Member resolution
//!
//! Locates a command's declaration on the component type and normalizes it
//! into a [`ResolvedSignature`], whichever of the two legal declaration styles
//! was used:
//!
//! ```typescript
//! interface NativeCommands {
//!   focus(viewRef: Ref<'MyView'>): void;                    // direct callable
//!   setColor: (viewRef: Ref<'MyView'>, c: string) => void;  // callable property
//! }
//! ```

use super::CommandContext;
use crate::errors::ExtractionError;
use crate::oracle::{
    CallableDecl, DeclarationNode, ParameterDecl, ParameterSite, PropertyDecl, TypeOracle,
};
use tracing::trace;

/// How a command member was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationStyle {
    DirectCallable,
    PropertyCallable,
}

/// A command's signature, independent of declaration style
pub struct ResolvedSignature<O: TypeOracle> {
    pub style: DeclarationStyle,
    pub optional: bool,
    /// `None` when the declaration has no return annotation
    pub return_type: Option<O::Type>,
    pub parameters: Vec<ParameterDecl<O::TypeNode>>,
}

/// Resolve the command named by `ctx` on `owner_type`.
pub fn resolve_member<O: TypeOracle>(
    oracle: &O,
    owner_type: &O::Type,
    ctx: &CommandContext<'_>,
) -> Result<ResolvedSignature<O>, ExtractionError> {
    let member = oracle
        .member(owner_type, ctx.command)
        .ok_or_else(|| ctx.member_not_found())?;

    let mut declarations = oracle.declarations(&member);
    if declarations.len() != 1 {
        return Err(ctx.ambiguous(declarations.len()));
    }

    match declarations.remove(0) {
        DeclarationNode::Callable(decl) => resolve_direct(oracle, decl, ctx),
        DeclarationNode::Property(decl) => resolve_property(oracle, decl, ctx),
        DeclarationNode::Other { kind } => {
            trace!(command = ctx.command, kind = %kind, "Unsupported declaration kind");
            Err(ctx.not_a_function())
        }
    }
}

fn resolve_direct<O: TypeOracle>(
    oracle: &O,
    decl: CallableDecl<O::TypeNode>,
    ctx: &CommandContext<'_>,
) -> Result<ResolvedSignature<O>, ExtractionError> {
    if decl.type_parameters > 0 {
        return Err(ctx.generic());
    }

    Ok(ResolvedSignature {
        style: DeclarationStyle::DirectCallable,
        optional: decl.optional,
        return_type: decl.return_type.as_ref().map(|node| oracle.resolve_type(node)),
        parameters: parameter_declarations(decl.parameters, ctx)?,
    })
}

fn resolve_property<O: TypeOracle>(
    oracle: &O,
    decl: PropertyDecl<O::TypeNode>,
    ctx: &CommandContext<'_>,
) -> Result<ResolvedSignature<O>, ExtractionError> {
    let type_node = decl.type_node.ok_or_else(|| ctx.not_a_function())?;
    let property_type = oracle.resolve_type(&type_node);

    // Overloaded and non-callable properties are both rejected.
    let mut signatures = oracle.call_signatures(&property_type);
    if signatures.len() != 1 {
        trace!(
            command = ctx.command,
            signatures = signatures.len(),
            "Property is not a single-signature callable"
        );
        return Err(ctx.not_a_function());
    }
    let signature = signatures.remove(0);

    if oracle.signature_type_parameters(&signature) > 0 {
        return Err(ctx.generic());
    }

    Ok(ResolvedSignature {
        style: DeclarationStyle::PropertyCallable,
        optional: decl.optional,
        return_type: Some(oracle.return_type(&signature)),
        parameters: parameter_declarations(oracle.parameters(&signature), ctx)?,
    })
}

fn parameter_declarations<N>(
    sites: Vec<ParameterSite<N>>,
    ctx: &CommandContext<'_>,
) -> Result<Vec<ParameterDecl<N>>, ExtractionError> {
    sites
        .into_iter()
        .map(|site| match site {
            ParameterSite::Declaration(decl) => Ok(decl),
            ParameterSite::Other { text } => Err(ctx.malformed_parameter(text)),
        })
        .collect()
}
