//! Testing infrastructure for command extraction.
//!
//! Provides [`MockOracle`], an in-memory [`TypeOracle`](crate::oracle::TypeOracle)
//! whose types and declarations are built directly in Rust, so the pipeline
//! can be exercised without parsing any TypeScript.
//!
//! # Quick Start
//!
//! ```rust
//! use command_shapes::extraction::{extract_command_shapes, CommandRequest, ExtractionOptions};
//! use command_shapes::testkit::{method, param, MockComponent, MockNode, MockOracle};
//!
//! let component = MockComponent::new("NativeCommands").member(
//!     "focus",
//!     method(vec![param("viewRef", MockNode::view_ref("MyView"))]),
//! );
//! let request = CommandRequest::new(component.declaration(), ["focus"]);
//! let options = ExtractionOptions::default();
//! let commands = extract_command_shapes(&MockOracle::new(), &request, &options).unwrap();
//! assert_eq!(commands[0].name, "focus");
//! ```

pub mod mock_oracle;

pub use mock_oracle::{
    method, param, param_decl, property, MockComponent, MockDeclaration, MockNode, MockOracle,
    MockSignature, MockType,
};
