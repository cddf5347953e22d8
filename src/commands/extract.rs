//! `extract` command: component spec files in, command schemas out.
//!
//! Each file is parsed and extracted on its own, so files are processed in
//! parallel. Within a file the first rejected command fails that file.

use crate::config::{load_config, load_config_from, ShapesConfig};
use crate::discovery::discover_requests;
use crate::errors::{Error, Result};
use crate::extraction::{extract_command_shapes, CommandRequest, RefCheck};
use crate::oracle::SourceOracle;
use crate::output::{output_results, OutputFormat};
use crate::parser::{parse_file, ParsedSource};
use crate::schema::ComponentCommands;
use colored::*;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, debug_span, info};

/// Which commands to extract from a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestSelection {
    /// Every command factory call in the file
    #[default]
    Discovered,
    /// The factory call for one type
    DiscoveredType(String),
    /// An explicit type and command list
    Explicit { type_name: String, commands: Vec<String> },
}

impl RequestSelection {
    pub fn from_args(type_name: Option<String>, commands: Option<Vec<String>>) -> Self {
        match (type_name, commands) {
            (Some(type_name), Some(commands)) => RequestSelection::Explicit {
                type_name,
                commands,
            },
            (Some(type_name), None) => RequestSelection::DiscoveredType(type_name),
            (None, _) => RequestSelection::Discovered,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub files: Vec<PathBuf>,
    pub selection: RequestSelection,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub strict_refs: bool,
    pub jobs: Option<usize>,
}

pub fn handle_extract(config: ExtractConfig) -> anyhow::Result<()> {
    let mut settings = match &config.config {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };
    if config.strict_refs {
        settings.ref_check.get_or_insert_with(Default::default).mode = RefCheck::StringLiteral;
    }

    let run = || extract_files(&config.files, &config.selection, &settings);
    let outcomes = match config.jobs {
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()?
            .install(run),
        None => run(),
    };

    let mut results = Vec::new();
    let mut failures = 0;
    for outcome in outcomes {
        match outcome {
            Ok(components) => results.extend(components),
            Err(err) => {
                failures += 1;
                eprintln!("{} {}", "error:".red().bold(), err);
            }
        }
    }
    if failures > 0 {
        anyhow::bail!(
            "command extraction failed for {} of {} files",
            failures,
            config.files.len()
        );
    }

    let format = config
        .format
        .or(settings.output_format())
        .unwrap_or(OutputFormat::Json);
    info!(components = results.len(), "Writing command schemas");
    output_results(&results, format, config.output.as_deref())?;
    Ok(())
}

/// Extract every file in parallel, keeping input order
pub fn extract_files(
    files: &[PathBuf],
    selection: &RequestSelection,
    settings: &ShapesConfig,
) -> Vec<Result<Vec<ComponentCommands>>> {
    files
        .par_iter()
        .map(|path| extract_file(path, selection, settings))
        .collect()
}

pub fn extract_file(
    path: &Path,
    selection: &RequestSelection,
    settings: &ShapesConfig,
) -> Result<Vec<ComponentCommands>> {
    let parsed = parse_file(path)?;
    extract_parsed(&parsed, selection, settings)
}

/// Extract from in-memory source; `path` is only used for the dialect and diagnostics
pub fn extract_source(
    content: &str,
    path: &Path,
    selection: &RequestSelection,
    settings: &ShapesConfig,
) -> Result<Vec<ComponentCommands>> {
    let parsed = crate::parser::parse_source(content, path)?;
    extract_parsed(&parsed, selection, settings)
}

fn extract_parsed(
    parsed: &ParsedSource,
    selection: &RequestSelection,
    settings: &ShapesConfig,
) -> Result<Vec<ComponentCommands>> {
    let _span = debug_span!("extract_file", path = %parsed.path.display()).entered();

    let oracle = SourceOracle::new(parsed).with_int32_names(settings.int32_names());
    let options = settings.extraction_options();

    resolve_selection(parsed, selection, settings)?
        .into_iter()
        .map(|(type_name, commands)| -> Result<ComponentCommands> {
            let declaration = oracle
                .type_declaration(&type_name)
                .ok_or_else(|| {
                    debug!(declared = ?oracle.declared_types(), "Command type not declared");
                    Error::TypeNotFound {
                        name: type_name.clone(),
                        file: parsed.path.clone(),
                    }
                })?;
            debug!(type_name = %type_name, commands = ?commands, "Extracting commands");

            let request = CommandRequest::new(declaration, commands);
            let commands = extract_command_shapes(&oracle, &request, &options)
                .map_err(|e| Error::extraction(&parsed.path, e))?;
            Ok(ComponentCommands {
                path: parsed.path.clone(),
                type_name,
                commands,
            })
        })
        .collect()
}

fn resolve_selection(
    parsed: &ParsedSource,
    selection: &RequestSelection,
    settings: &ShapesConfig,
) -> Result<Vec<(String, Vec<String>)>> {
    if let RequestSelection::Explicit {
        type_name,
        commands,
    } = selection
    {
        return Ok(vec![(type_name.clone(), commands.clone())]);
    }

    let factories = settings.factories();
    let discovered: Vec<_> = discover_requests(parsed, &factories)?
        .into_iter()
        .filter(|request| match selection {
            RequestSelection::DiscoveredType(name) => &request.type_name == name,
            _ => true,
        })
        .map(|request| (request.type_name, request.commands))
        .collect();

    if discovered.is_empty() {
        let target = match selection {
            RequestSelection::DiscoveredType(name) => format!(" for `{name}`"),
            _ => String::new(),
        };
        return Err(Error::discovery(
            &parsed.path,
            format!("no {} call found{target}", factories.join(" / ")),
        ));
    }
    Ok(discovered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use indoc::indoc;

    const SPEC: &str = indoc! {"
        import type {Int32} from 'react-native/Libraries/Types/CodegenTypes';

        interface NativeCommands {
          focus(viewRef: Ref<'MyView'>, durationMs: Int32): void;
          blur(viewRef: Ref<'MyView'>): void;
        }

        export const Commands = codegenNativeCommands<NativeCommands>({
          supportedCommands: ['blur', 'focus'],
        });
    "};

    fn extract(selection: RequestSelection) -> Result<Vec<ComponentCommands>> {
        extract_source(
            SPEC,
            Path::new("MyViewNativeComponent.ts"),
            &selection,
            &ShapesConfig::default(),
        )
    }

    #[test]
    fn test_discovered_request_follows_supported_commands_order() {
        let components = extract(RequestSelection::Discovered).unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].type_name, "NativeCommands");
        let names: Vec<_> = components[0].commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["blur", "focus"]);
    }

    #[test]
    fn test_explicit_selection() {
        let components = extract(RequestSelection::from_args(
            Some("NativeCommands".into()),
            Some(vec!["focus".into()]),
        ))
        .unwrap();
        assert_eq!(components[0].commands.len(), 1);
        assert_eq!(components[0].commands[0].name, "focus");
    }

    #[test]
    fn test_unknown_type_selection() {
        let err = extract(RequestSelection::DiscoveredType("Other".into())).unwrap_err();
        assert!(matches!(err, Error::Discovery { .. }));
    }

    #[test]
    fn test_explicit_type_not_declared() {
        let err = extract(RequestSelection::from_args(
            Some("Missing".into()),
            Some(vec!["focus".into()]),
        ))
        .unwrap_err();
        assert!(matches!(err, Error::TypeNotFound { .. }));
    }

    #[test]
    fn test_extraction_error_keeps_kind() {
        let err = extract(RequestSelection::from_args(
            Some("NativeCommands".into()),
            Some(vec!["scroll".into()]),
        ))
        .unwrap_err();
        assert_eq!(err.extraction_kind(), Some(ErrorKind::MemberNotFound));
        assert!(err.to_string().contains("MyViewNativeComponent.ts"));
    }
}
