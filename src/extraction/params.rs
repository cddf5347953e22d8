//! Parameter type mapping
//!
//! Each exposed parameter must resolve to one of the supported primitive
//! categories, checked in a fixed order: string, boolean, Int32.

use super::validator::IMPLICIT_ANY;
use super::CommandContext;
use crate::errors::ExtractionError;
use crate::oracle::{ParameterDecl, TypeOracle};
use crate::schema::{ParamKind, ParamShape};

/// Classify a resolved type, `None` when it is outside the supported set
pub fn classify<O: TypeOracle>(oracle: &O, ty: &O::Type) -> Option<ParamKind> {
    if oracle.is_string_like(ty) {
        Some(ParamKind::String)
    } else if oracle.is_boolean_like(ty) {
        Some(ParamKind::Boolean)
    } else if oracle.is_int32_like(ty) {
        Some(ParamKind::Int32)
    } else {
        None
    }
}

pub fn map_parameters<O: TypeOracle>(
    oracle: &O,
    parameters: &[ParameterDecl<O::TypeNode>],
    ctx: &CommandContext<'_>,
) -> Result<Vec<ParamShape>, ExtractionError> {
    parameters
        .iter()
        .map(|parameter| map_parameter(oracle, parameter, ctx))
        .collect()
}

fn map_parameter<O: TypeOracle>(
    oracle: &O,
    parameter: &ParameterDecl<O::TypeNode>,
    ctx: &CommandContext<'_>,
) -> Result<ParamShape, ExtractionError> {
    let type_node = parameter
        .type_node
        .as_ref()
        .ok_or_else(|| ctx.unsupported_param(&parameter.name, IMPLICIT_ANY))?;

    let ty = oracle.resolve_type(type_node);
    classify(oracle, &ty)
        .map(|kind| ParamShape::new(parameter.name.clone(), kind))
        .ok_or_else(|| ctx.unsupported_param(&parameter.name, oracle.node_text(type_node)))
}
