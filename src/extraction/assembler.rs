use crate::schema::{CommandTypeShape, ParamShape};

/// Compose one validated command into its IR record.
pub fn assemble(name: &str, optional: bool, parameters: Vec<ParamShape>) -> CommandTypeShape {
    CommandTypeShape {
        name: name.to_string(),
        optional,
        parameters,
    }
}
