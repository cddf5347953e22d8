use anyhow::Result;
use clap::Parser;
use command_shapes::cli::{Cli, Commands};
use command_shapes::commands::{self, ExtractConfig, RequestSelection};
use command_shapes::observability::init_tracing;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match cli.command {
        Commands::Extract {
            files,
            type_name,
            commands,
            format,
            output,
            config,
            strict_refs,
            jobs,
        } => {
            let extract_config = ExtractConfig {
                files,
                selection: RequestSelection::from_args(type_name, commands),
                format,
                output,
                config,
                strict_refs,
                jobs,
            };
            commands::handle_extract(extract_config)
        }
        Commands::Init { force } => commands::init_config(force),
    }
}
