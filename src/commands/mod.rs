//! CLI command implementations.
//!
//! Available commands:
//! - **extract**: Extract command schemas from component spec files
//! - **init**: Initialize a new configuration file

pub mod extract;
pub mod init;

pub use extract::{extract_file, extract_source, handle_extract, ExtractConfig, RequestSelection};
pub use init::init_config;
