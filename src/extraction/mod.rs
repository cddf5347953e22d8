//! Command schema extraction.
//!
//! Turns the command members of a component's type declaration into
//! [`CommandTypeShape`] records. For every requested command name, in order:
//!
//! 1. [`resolver`]: find the member and normalize it to a signature
//! 2. [`validator`]: enforce the `void` return and leading ref parameter
//! 3. [`params`]: map the remaining parameters to primitive kinds
//! 4. [`assembler`]: build the IR record
//!
//! The first failure aborts the whole extraction. There is no partial output:
//! a silently incomplete schema would generate incomplete native code.
//!
//! # Example
//!
//! ```rust,ignore
//! use command_shapes::extraction::{extract_command_shapes, CommandRequest, ExtractionOptions};
//!
//! let request = CommandRequest::new(declaration, ["focus", "blur"]);
//! let commands = extract_command_shapes(&oracle, &request, &ExtractionOptions::default())?;
//! ```

pub mod assembler;
pub mod params;
pub mod resolver;
pub mod validator;

pub use resolver::{DeclarationStyle, ResolvedSignature};
pub use validator::{RefCheck, RefPolicy};

use crate::errors::ExtractionError;
use crate::oracle::TypeOracle;
use crate::schema::CommandTypeShape;
use tracing::{debug, debug_span};

/// Input to an extraction: the component's type declaration and the command
/// names to extract, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest<N> {
    pub declaration: N,
    pub commands: Vec<String>,
}

impl<N> CommandRequest<N> {
    pub fn new<I, S>(declaration: N, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            declaration,
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionOptions {
    pub ref_policy: RefPolicy,
}

/// The command being extracted and the text of its owning declaration.
///
/// Builds every [`ExtractionError`] so each one names both.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    pub command: &'a str,
    pub owner: &'a str,
}

impl<'a> CommandContext<'a> {
    pub fn new(command: &'a str, owner: &'a str) -> Self {
        Self { command, owner }
    }

    fn command(&self) -> String {
        self.command.to_string()
    }

    fn owner(&self) -> String {
        self.owner.to_string()
    }

    pub(crate) fn member_not_found(&self) -> ExtractionError {
        ExtractionError::MemberNotFound {
            command: self.command(),
            owner: self.owner(),
        }
    }

    pub(crate) fn not_a_function(&self) -> ExtractionError {
        ExtractionError::NotAFunction {
            command: self.command(),
            owner: self.owner(),
        }
    }

    pub(crate) fn ambiguous(&self, count: usize) -> ExtractionError {
        ExtractionError::AmbiguousDeclaration {
            command: self.command(),
            owner: self.owner(),
            count,
        }
    }

    pub(crate) fn generic(&self) -> ExtractionError {
        ExtractionError::GenericNotAllowed {
            command: self.command(),
            owner: self.owner(),
        }
    }

    pub(crate) fn malformed_parameter(&self, parameter: impl Into<String>) -> ExtractionError {
        ExtractionError::MalformedParameter {
            command: self.command(),
            owner: self.owner(),
            parameter: parameter.into(),
        }
    }

    pub(crate) fn non_void_return(&self, return_type: impl Into<String>) -> ExtractionError {
        ExtractionError::NonVoidReturn {
            command: self.command(),
            owner: self.owner(),
            return_type: return_type.into(),
        }
    }

    pub(crate) fn missing_ref(&self) -> ExtractionError {
        ExtractionError::MissingRefParameter {
            command: self.command(),
            owner: self.owner(),
        }
    }

    pub(crate) fn invalid_ref(&self, type_text: impl Into<String>) -> ExtractionError {
        ExtractionError::InvalidRefParameter {
            command: self.command(),
            owner: self.owner(),
            type_text: type_text.into(),
        }
    }

    pub(crate) fn unsupported_param(
        &self,
        parameter: &str,
        type_text: impl Into<String>,
    ) -> ExtractionError {
        ExtractionError::UnsupportedParamType {
            command: self.command(),
            owner: self.owner(),
            parameter: parameter.to_string(),
            type_text: type_text.into(),
        }
    }
}

/// Extract one [`CommandTypeShape`] per requested command, in request order.
pub fn extract_command_shapes<O: TypeOracle>(
    oracle: &O,
    request: &CommandRequest<O::TypeNode>,
    options: &ExtractionOptions,
) -> Result<Vec<CommandTypeShape>, ExtractionError> {
    let owner = oracle.node_text(&request.declaration);
    let _span = debug_span!("extract_commands", commands = request.commands.len()).entered();

    let owner_type = oracle.resolve_type(&request.declaration);
    request
        .commands
        .iter()
        .map(|name| {
            let ctx = CommandContext::new(name, &owner);
            extract_command(oracle, &owner_type, options, &ctx)
        })
        .collect()
}

fn extract_command<O: TypeOracle>(
    oracle: &O,
    owner_type: &O::Type,
    options: &ExtractionOptions,
    ctx: &CommandContext<'_>,
) -> Result<CommandTypeShape, ExtractionError> {
    let resolved = resolver::resolve_member(oracle, owner_type, ctx)?;
    let style = resolved.style;
    let validated = validator::validate_signature(oracle, resolved, &options.ref_policy, ctx)?;
    let parameters = params::map_parameters(oracle, &validated.parameters, ctx)?;

    debug!(
        command = ctx.command,
        style = ?style,
        optional = validated.optional,
        parameters = parameters.len(),
        "Extracted command"
    );
    Ok(assembler::assemble(ctx.command, validated.optional, parameters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::oracle::ParameterSite;
    use crate::schema::{ParamKind, ParamShape};
    use crate::testkit::{
        method, param, property, MockComponent, MockNode, MockOracle, MockSignature, MockType,
    };
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn extract(
        component: &MockComponent,
        commands: &[&str],
    ) -> Result<Vec<CommandTypeShape>, ExtractionError> {
        let request = CommandRequest::new(component.declaration(), commands.iter().copied());
        extract_command_shapes(&MockOracle::new(), &request, &ExtractionOptions::default())
    }

    fn view_commands() -> MockComponent {
        let set_color = MockSignature::new(vec![
            param("ref", MockNode::view_ref("MyView")),
            param("color", MockNode::string()),
            param("animated", MockNode::boolean()),
        ]);
        MockComponent::new("NativeCommands")
            .member(
                "focus",
                method(vec![
                    param("viewRef", MockNode::view_ref("MyView")),
                    param("durationMs", MockNode::int32()),
                ]),
            )
            .member("setColor", property(MockNode::function(vec![set_color])))
            .member(
                "blur",
                method(vec![param("viewRef", MockNode::view_ref("MyView"))]).optional(),
            )
    }

    #[test]
    fn test_direct_method_command() {
        let commands = extract(&view_commands(), &["focus"]).unwrap();
        assert_eq!(
            commands,
            vec![CommandTypeShape {
                name: "focus".into(),
                optional: false,
                parameters: vec![ParamShape::new("durationMs", ParamKind::Int32)],
            }]
        );
    }

    #[test]
    fn test_callable_property_command() {
        let commands = extract(&view_commands(), &["setColor"]).unwrap();
        assert_eq!(
            commands,
            vec![CommandTypeShape {
                name: "setColor".into(),
                optional: false,
                parameters: vec![
                    ParamShape::new("color", ParamKind::String),
                    ParamShape::new("animated", ParamKind::Boolean),
                ],
            }]
        );
    }

    #[test]
    fn test_output_follows_request_order() {
        let commands = extract(&view_commands(), &["blur", "setColor", "focus"]).unwrap();
        let names: Vec<_> = commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["blur", "setColor", "focus"]);
        assert!(commands[0].optional);
        assert!(!commands[1].optional);
    }

    #[test]
    fn test_generic_command_fails_whole_request() {
        let component = view_commands().member(
            "scrollTo",
            method(vec![param("viewRef", MockNode::view_ref("MyView"))]).generic(1),
        );
        let err = extract(&component, &["focus", "scrollTo"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GenericNotAllowed);
        assert_eq!(err.command(), "scrollTo");
        assert_eq!(err.owner(), "interface NativeCommands { ... }");
    }

    #[test]
    fn test_missing_command_names_it() {
        let err = extract(&view_commands(), &["focus", "reload"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MemberNotFound);
        assert_eq!(err.command(), "reload");
    }

    #[test]
    fn test_non_void_command() {
        let component = MockComponent::new("NativeCommands").member(
            "measure",
            method(vec![param("viewRef", MockNode::view_ref("MyView"))])
                .returns(MockNode::int32()),
        );
        let err = extract(&component, &["measure"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonVoidReturn);
    }

    #[test]
    fn test_property_returning_value_rejected() {
        let signature = MockSignature::new(vec![param("ref", MockNode::view_ref("MyView"))])
            .returns(MockType::String);
        let component = MockComponent::new("NativeCommands")
            .member("read", property(MockNode::function(vec![signature])));
        let err = extract(&component, &["read"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonVoidReturn);
    }

    #[test]
    fn test_direct_method_with_rest_parameter_rejected() {
        let component = MockComponent::new("NativeCommands").member(
            "call",
            method(vec![
                param("viewRef", MockNode::view_ref("MyView")),
                ParameterSite::Other {
                    text: "...args".into(),
                },
            ]),
        );
        let err = extract(&component, &["call"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedParameter);
    }

    #[test]
    fn test_empty_request_yields_empty_output() {
        assert!(extract(&view_commands(), &[]).unwrap().is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let component = view_commands();
        let first = extract(&component, &["focus", "setColor", "blur"]).unwrap();
        let second = extract(&component, &["focus", "setColor", "blur"]).unwrap();
        assert_eq!(first, second);
    }

    fn kind_node(kind: ParamKind) -> MockNode {
        match kind {
            ParamKind::String => MockNode::string(),
            ParamKind::Boolean => MockNode::boolean(),
            ParamKind::Int32 => MockNode::int32(),
        }
    }

    fn param_kind() -> impl Strategy<Value = ParamKind> {
        prop_oneof![
            Just(ParamKind::String),
            Just(ParamKind::Boolean),
            Just(ParamKind::Int32),
        ]
    }

    proptest! {
        #[test]
        fn prop_output_matches_request(
            specs in prop::collection::vec(
                (any::<bool>(), any::<bool>(), prop::collection::vec(param_kind(), 0..4)),
                1..6,
            ),
            reversed in any::<bool>(),
        ) {
            let mut component = MockComponent::new("NativeCommands");
            let mut names = Vec::new();
            for (index, (optional, as_property, kinds)) in specs.iter().enumerate() {
                let name = format!("command{index}");
                let mut parameters = vec![param("viewRef", MockNode::view_ref("MyView"))];
                parameters.extend(
                    kinds
                        .iter()
                        .enumerate()
                        .map(|(i, kind)| param(&format!("arg{i}"), kind_node(*kind))),
                );
                let declaration = if *as_property {
                    property(MockNode::function(vec![MockSignature::new(parameters)]))
                } else {
                    method(parameters)
                };
                let declaration = if *optional { declaration.optional() } else { declaration };
                component = component.member(&name, declaration);
                names.push(name);
            }
            if reversed {
                names.reverse();
            }

            let requested: Vec<&str> = names.iter().map(String::as_str).collect();
            let commands = extract(&component, &requested).unwrap();

            prop_assert_eq!(commands.len(), names.len());
            for (command, name) in commands.iter().zip(&names) {
                prop_assert_eq!(&command.name, name);
                let index: usize = name.trim_start_matches("command").parse().unwrap();
                let (optional, _, kinds) = &specs[index];
                prop_assert_eq!(command.optional, *optional);
                prop_assert_eq!(&command.signature(), kinds);
            }
        }
    }
}
