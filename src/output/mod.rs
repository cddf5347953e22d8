//! Output writers for extracted command schemas.

pub mod json;
pub mod terminal;
pub mod yaml;

use crate::errors::Result;
use crate::schema::ComponentCommands;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

pub use json::JsonWriter;
pub use terminal::TerminalWriter;
pub use yaml::YamlWriter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
    Terminal,
}

pub trait OutputWriter {
    fn write_results(&mut self, results: &[ComponentCommands]) -> Result<()>;
}

pub fn create_writer<'w, W: Write + 'w>(
    format: OutputFormat,
    writer: W,
) -> Box<dyn OutputWriter + 'w> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Yaml => Box::new(YamlWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

/// Write results to `output_file`, or stdout when none is given
pub fn output_results(
    results: &[ComponentCommands],
    format: OutputFormat,
    output_file: Option<&Path>,
) -> Result<()> {
    match output_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = fs::File::create(path)?;
            create_writer(format, file).write_results(results)
        }
        None => {
            let stdout = std::io::stdout();
            create_writer(format, stdout.lock()).write_results(results)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CommandTypeShape, ParamKind, ParamShape};
    use std::path::PathBuf;
    use tempfile::TempDir;

    pub(crate) fn sample() -> Vec<ComponentCommands> {
        vec![ComponentCommands {
            path: PathBuf::from("src/MyViewNativeComponent.ts"),
            type_name: "NativeCommands".into(),
            commands: vec![
                CommandTypeShape {
                    name: "focus".into(),
                    optional: false,
                    parameters: vec![ParamShape::new("durationMs", ParamKind::Int32)],
                },
                CommandTypeShape {
                    name: "blur".into(),
                    optional: true,
                    parameters: vec![],
                },
            ],
        }]
    }

    #[test]
    fn test_output_results_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("nested").join("commands.json");

        output_results(&sample(), OutputFormat::Json, Some(&nested_path)).unwrap();

        let content = fs::read_to_string(&nested_path).unwrap();
        let parsed: Vec<ComponentCommands> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, sample());
    }
}
