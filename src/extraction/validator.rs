//! Command shape contract
//!
//! A command must return `void` and take the component ref as its first
//! parameter. Everything after the ref is handed to the parameter mapper.

use super::resolver::ResolvedSignature;
use super::CommandContext;
use crate::errors::ExtractionError;
use crate::oracle::{ParameterDecl, TypeArgument, TypeNodeShape, TypeOracle};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Text used for a missing type annotation, which TypeScript treats as `any`
pub(crate) const IMPLICIT_ANY: &str = "any";

/// How strictly the leading ref parameter is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefCheck {
    /// Any type reference is accepted (`Ref<'MyView'>`, `MyViewRef`, ...)
    #[default]
    Reference,
    /// Only a ref wrapper with exactly one string literal argument
    StringLiteral,
}

/// Settings for the ref parameter check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefPolicy {
    pub check: RefCheck,
    /// Names accepted as ref wrappers under [`RefCheck::StringLiteral`]
    pub wrappers: Vec<String>,
}

impl Default for RefPolicy {
    fn default() -> Self {
        Self {
            check: RefCheck::Reference,
            wrappers: vec!["Ref".to_string(), "React.Ref".to_string()],
        }
    }
}

impl RefPolicy {
    fn is_string_literal_ref(&self, shape: &TypeNodeShape) -> bool {
        match shape {
            TypeNodeShape::Reference { name, arguments } => {
                self.wrappers.iter().any(|wrapper| wrapper == name)
                    && matches!(arguments.as_slice(), [TypeArgument::StringLiteral(_)])
            }
            TypeNodeShape::Other => false,
        }
    }

    /// Whether `shape` is acceptable as the leading ref parameter
    pub fn accepts(&self, shape: &TypeNodeShape) -> bool {
        match self.check {
            RefCheck::Reference => matches!(shape, TypeNodeShape::Reference { .. }),
            RefCheck::StringLiteral => self.is_string_literal_ref(shape),
        }
    }
}

/// A signature that passed the contract
#[derive(Debug)]
pub struct ValidatedCommand<N> {
    pub optional: bool,
    /// Parameters after the ref
    pub parameters: Vec<ParameterDecl<N>>,
}

pub fn validate_signature<O: TypeOracle>(
    oracle: &O,
    resolved: ResolvedSignature<O>,
    policy: &RefPolicy,
    ctx: &CommandContext<'_>,
) -> Result<ValidatedCommand<O::TypeNode>, ExtractionError> {
    match &resolved.return_type {
        Some(ty) if oracle.is_void_like(ty) => {}
        Some(ty) => return Err(ctx.non_void_return(oracle.type_text(ty))),
        None => return Err(ctx.non_void_return(IMPLICIT_ANY)),
    }

    let mut parameters = resolved.parameters.into_iter();
    let view_ref = parameters.next().ok_or_else(|| ctx.missing_ref())?;
    check_ref_parameter(oracle, &view_ref, policy, ctx)?;

    Ok(ValidatedCommand {
        optional: resolved.optional,
        parameters: parameters.collect(),
    })
}

fn check_ref_parameter<O: TypeOracle>(
    oracle: &O,
    view_ref: &ParameterDecl<O::TypeNode>,
    policy: &RefPolicy,
    ctx: &CommandContext<'_>,
) -> Result<(), ExtractionError> {
    let type_node = view_ref
        .type_node
        .as_ref()
        .ok_or_else(|| ctx.invalid_ref(IMPLICIT_ANY))?;

    let shape = oracle.describe_node(type_node);
    if !policy.accepts(&shape) {
        return Err(ctx.invalid_ref(oracle.node_text(type_node)));
    }
    if !policy.is_string_literal_ref(&shape) {
        debug!(
            command = ctx.command,
            ref_type = %oracle.node_text(type_node),
            "Accepting ref parameter without a view name literal"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::extraction::resolver::DeclarationStyle;
    use crate::testkit::{param_decl, MockNode, MockOracle, MockType};

    fn signature(
        return_type: Option<MockType>,
        parameters: Vec<ParameterDecl<MockNode>>,
    ) -> ResolvedSignature<MockOracle> {
        ResolvedSignature {
            style: DeclarationStyle::DirectCallable,
            optional: false,
            return_type,
            parameters,
        }
    }

    fn validate(
        resolved: ResolvedSignature<MockOracle>,
        policy: &RefPolicy,
    ) -> Result<ValidatedCommand<MockNode>, ExtractionError> {
        let ctx = CommandContext::new("focus", "interface NativeCommands");
        validate_signature(&MockOracle::new(), resolved, policy, &ctx)
    }

    #[test]
    fn test_ref_is_dropped_from_parameters() {
        let resolved = signature(
            Some(MockType::Void),
            vec![
                param_decl("viewRef", MockNode::view_ref("MyView")),
                param_decl("durationMs", MockNode::int32()),
            ],
        );
        let validated = validate(resolved, &RefPolicy::default()).unwrap();
        assert_eq!(validated.parameters.len(), 1);
        assert_eq!(validated.parameters[0].name, "durationMs");
    }

    #[test]
    fn test_non_void_return_rejected() {
        let resolved = signature(
            Some(MockType::Boolean),
            vec![param_decl("viewRef", MockNode::view_ref("MyView"))],
        );
        let err = validate(resolved, &RefPolicy::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonVoidReturn);
        assert!(err.to_string().contains("boolean"));
    }

    #[test]
    fn test_missing_return_annotation_rejected() {
        let resolved = signature(None, vec![param_decl("viewRef", MockNode::view_ref("V"))]);
        let err = validate(resolved, &RefPolicy::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonVoidReturn);
    }

    #[test]
    fn test_zero_parameters_rejected() {
        let err = validate(signature(Some(MockType::Void), vec![]), &RefPolicy::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRefParameter);
    }

    #[test]
    fn test_non_reference_first_parameter_rejected() {
        let resolved = signature(
            Some(MockType::Void),
            vec![param_decl("viewRef", MockNode::string())],
        );
        let err = validate(resolved, &RefPolicy::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRefParameter);
    }

    #[test]
    fn test_bare_reference_accepted_by_default() {
        let resolved = signature(
            Some(MockType::Void),
            vec![param_decl("viewRef", MockNode::reference("MyViewRef", vec![]))],
        );
        assert!(validate(resolved, &RefPolicy::default()).is_ok());
    }

    #[test]
    fn test_strict_policy_requires_view_name_literal() {
        let policy = RefPolicy {
            check: RefCheck::StringLiteral,
            ..RefPolicy::default()
        };

        let bare = signature(
            Some(MockType::Void),
            vec![param_decl("viewRef", MockNode::reference("MyViewRef", vec![]))],
        );
        let err = validate(bare, &policy).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRefParameter);

        let literal = signature(
            Some(MockType::Void),
            vec![param_decl("viewRef", MockNode::view_ref("MyView"))],
        );
        assert!(validate(literal, &policy).is_ok());
    }

    #[test]
    fn test_optional_flag_carried_through() {
        let mut resolved = signature(
            Some(MockType::Void),
            vec![param_decl("viewRef", MockNode::view_ref("MyView"))],
        );
        resolved.optional = true;
        assert!(validate(resolved, &RefPolicy::default()).unwrap().optional);
    }
}
