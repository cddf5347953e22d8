//! Error types for command extraction.
//!
//! Two layers:
//!
//! - [`ExtractionError`]: the fatal, data-carrying rejections produced by the
//!   extraction pipeline. Every variant names the offending command and the
//!   text of the owning type declaration so a failure can be located without
//!   further tooling.
//! - [`Error`]: tool-level failures (file access, parsing, discovery, config)
//!   that wrap extraction errors when the pipeline runs inside the CLI.
//!
//! # Example
//!
//! ```rust
//! use command_shapes::errors::{ErrorKind, ExtractionError};
//!
//! let err = ExtractionError::MemberNotFound {
//!     command: "focus".into(),
//!     owner: "interface NativeCommands {}".into(),
//! };
//! assert_eq!(err.kind(), ErrorKind::MemberNotFound);
//! assert_eq!(err.command(), "focus");
//! ```

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Discriminant of an [`ExtractionError`], for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MemberNotFound,
    NotAFunction,
    AmbiguousDeclaration,
    GenericNotAllowed,
    MalformedParameter,
    NonVoidReturn,
    MissingRefParameter,
    InvalidRefParameter,
    UnsupportedParamType,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MemberNotFound => "MemberNotFound",
            ErrorKind::NotAFunction => "NotAFunction",
            ErrorKind::AmbiguousDeclaration => "AmbiguousDeclaration",
            ErrorKind::GenericNotAllowed => "GenericNotAllowed",
            ErrorKind::MalformedParameter => "MalformedParameter",
            ErrorKind::NonVoidReturn => "NonVoidReturn",
            ErrorKind::MissingRefParameter => "MissingRefParameter",
            ErrorKind::InvalidRefParameter => "InvalidRefParameter",
            ErrorKind::UnsupportedParamType => "UnsupportedParamType",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A command declaration that cannot be turned into a command schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Cannot find command `{command}` in type: {owner}")]
    MemberNotFound { command: String, owner: String },

    #[error("Command `{command}` should be a function in type: {owner}")]
    NotAFunction { command: String, owner: String },

    #[error(
        "Command `{command}` must have exactly one declaration, found {count} in type: {owner}"
    )]
    AmbiguousDeclaration {
        command: String,
        owner: String,
        count: usize,
    },

    #[error("Command `{command}` should not be generic in type: {owner}")]
    GenericNotAllowed { command: String, owner: String },

    #[error(
        "Parameter `{parameter}` of command `{command}` is not a parameter declaration in type: {owner}"
    )]
    MalformedParameter {
        command: String,
        owner: String,
        parameter: String,
    },

    #[error(
        "Command `{command}` should return void, found `{return_type}` in type: {owner}"
    )]
    NonVoidReturn {
        command: String,
        owner: String,
        return_type: String,
    },

    #[error(
        "The first parameter of command `{command}` should be a component ref, but the command has no parameters in type: {owner}"
    )]
    MissingRefParameter { command: String, owner: String },

    #[error(
        "The first parameter of command `{command}` should be a component ref like Ref<'ViewName'>, found `{type_text}` in type: {owner}"
    )]
    InvalidRefParameter {
        command: String,
        owner: String,
        type_text: String,
    },

    #[error(
        "Parameter `{parameter}` of command `{command}` has unsupported type `{type_text}` (expected string, boolean or Int32) in type: {owner}"
    )]
    UnsupportedParamType {
        command: String,
        owner: String,
        parameter: String,
        type_text: String,
    },
}

impl ExtractionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractionError::MemberNotFound { .. } => ErrorKind::MemberNotFound,
            ExtractionError::NotAFunction { .. } => ErrorKind::NotAFunction,
            ExtractionError::AmbiguousDeclaration { .. } => ErrorKind::AmbiguousDeclaration,
            ExtractionError::GenericNotAllowed { .. } => ErrorKind::GenericNotAllowed,
            ExtractionError::MalformedParameter { .. } => ErrorKind::MalformedParameter,
            ExtractionError::NonVoidReturn { .. } => ErrorKind::NonVoidReturn,
            ExtractionError::MissingRefParameter { .. } => ErrorKind::MissingRefParameter,
            ExtractionError::InvalidRefParameter { .. } => ErrorKind::InvalidRefParameter,
            ExtractionError::UnsupportedParamType { .. } => ErrorKind::UnsupportedParamType,
        }
    }

    /// Name of the command that was rejected
    pub fn command(&self) -> &str {
        match self {
            ExtractionError::MemberNotFound { command, .. }
            | ExtractionError::NotAFunction { command, .. }
            | ExtractionError::AmbiguousDeclaration { command, .. }
            | ExtractionError::GenericNotAllowed { command, .. }
            | ExtractionError::MalformedParameter { command, .. }
            | ExtractionError::NonVoidReturn { command, .. }
            | ExtractionError::MissingRefParameter { command, .. }
            | ExtractionError::InvalidRefParameter { command, .. }
            | ExtractionError::UnsupportedParamType { command, .. } => command,
        }
    }

    /// Text of the type declaration that owns the command
    pub fn owner(&self) -> &str {
        match self {
            ExtractionError::MemberNotFound { owner, .. }
            | ExtractionError::NotAFunction { owner, .. }
            | ExtractionError::AmbiguousDeclaration { owner, .. }
            | ExtractionError::GenericNotAllowed { owner, .. }
            | ExtractionError::MalformedParameter { owner, .. }
            | ExtractionError::NonVoidReturn { owner, .. }
            | ExtractionError::MissingRefParameter { owner, .. }
            | ExtractionError::InvalidRefParameter { owner, .. }
            | ExtractionError::UnsupportedParamType { owner, .. } => owner,
        }
    }

    /// Offending parameter, for the kinds that name one
    pub fn parameter(&self) -> Option<&str> {
        match self {
            ExtractionError::MalformedParameter { parameter, .. }
            | ExtractionError::UnsupportedParamType { parameter, .. } => Some(parameter),
            _ => None,
        }
    }
}

/// Tool-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The source file could not be parsed
    #[error("Parse error in {}:{line}:{column}: {message}", file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The requested component type is not declared in the file
    #[error("Type `{name}` is not declared in {}", file.display())]
    TypeNotFound { name: String, file: PathBuf },

    /// Command requests could not be discovered
    #[error("Discovery error in {}: {message}", file.display())]
    Discovery { file: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Command extraction failed
    #[error("{}: {source}", file.display())]
    Extraction {
        file: PathBuf,
        #[source]
        source: ExtractionError,
    },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Create a parse error with location
    pub fn parse(
        file: impl Into<PathBuf>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            column,
            message: message.into(),
        }
    }

    pub fn discovery(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Discovery {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn extraction(file: impl Into<PathBuf>, source: ExtractionError) -> Self {
        Self::Extraction {
            file: file.into(),
            source,
        }
    }

    /// Extraction kind, when this error came out of the pipeline
    pub fn extraction_kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Extraction { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
