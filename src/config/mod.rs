//! Configuration for command extraction.
//!
//! Settings live in `.command-shapes.toml`, found by walking up from the
//! current directory. Every section is optional; missing values fall back to
//! the defaults written by `command-shapes init`.

pub mod core;
pub mod loader;

pub use core::{DiscoveryConfig, OutputConfig, RefCheckConfig, ShapesConfig, TypesConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

/// Contents written by `command-shapes init`
pub const DEFAULT_CONFIG: &str = r#"# command-shapes configuration

[types]
# Type names treated as the codegen Int32 type
int32 = ["Int32", "CodegenTypes.Int32"]
# Ref wrappers accepted when [ref_check] mode is "string-literal"
ref_wrappers = ["Ref", "React.Ref"]

[ref_check]
# "reference": the first command parameter must be any type reference
# "string-literal": it must be a ref wrapper with one view name literal, e.g. Ref<'MyView'>
mode = "reference"

[discovery]
factories = ["codegenNativeCommands"]

[output]
format = "json"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::RefCheck;
    use crate::output::OutputFormat;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config = parse_and_validate_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.int32_names(), ShapesConfig::default().int32_names());
        assert_eq!(config.ref_policy(), ShapesConfig::default().ref_policy());
        assert_eq!(config.factories(), vec!["codegenNativeCommands".to_string()]);
        assert_eq!(config.output_format(), Some(OutputFormat::Json));
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = parse_and_validate_config("[types]\nint32 = [\"MyInt\"]\n").unwrap();
        assert_eq!(config.int32_names(), vec!["MyInt".to_string()]);
        assert_eq!(config.ref_policy().wrappers, vec!["Ref", "React.Ref"]);
    }

    #[test]
    fn test_string_literal_mode() {
        let config = parse_and_validate_config("[ref_check]\nmode = \"string-literal\"\n").unwrap();
        assert_eq!(config.ref_policy().check, RefCheck::StringLiteral);
    }

    #[test]
    fn test_empty_int32_names_rejected() {
        let err = parse_and_validate_config("[types]\nint32 = []\n").unwrap_err();
        assert!(err.contains("int32"));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let err = parse_and_validate_config("[ref_check]\nmode = \"sometimes\"\n").unwrap_err();
        assert!(err.contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_discover_config_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[discovery]\nfactories = [\"makeCommands\"]\n",
        )
        .unwrap();
        let nested = dir.path().join("src").join("components");
        fs::create_dir_all(&nested).unwrap();

        let config = discover_config(nested);
        assert_eq!(config.factories(), vec!["makeCommands".to_string()]);
    }

    #[test]
    fn test_load_config_from_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_config_from(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_directory_ancestors_limited() {
        let ancestors: Vec<_> =
            directory_ancestors(std::path::PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(ancestors.len(), 2);
    }
}
