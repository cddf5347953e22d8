// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod extraction;
pub mod observability;
pub mod oracle;
pub mod output;
pub mod parser;
pub mod schema;
pub mod testkit;

// Re-export commonly used types
pub use crate::errors::{Error, ErrorKind, ExtractionError};
pub use crate::extraction::{
    extract_command_shapes, CommandRequest, ExtractionOptions, RefCheck, RefPolicy,
};
pub use crate::oracle::{SourceOracle, TypeOracle};
pub use crate::schema::{CommandTypeShape, ComponentCommands, ParamKind, ParamShape};
