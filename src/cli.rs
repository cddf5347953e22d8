use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "command-shapes")]
#[command(about = "Extract native component command schemas from TypeScript specs")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract command schemas from component spec files
    Extract {
        /// Component spec files (.ts / .tsx)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Command type to extract (defaults to the type passed to the command factory)
        #[arg(long = "type", value_name = "NAME")]
        type_name: Option<String>,

        /// Command names to extract, in output order (defaults to the factory's supportedCommands)
        #[arg(short = 'c', long = "command", value_delimiter = ',', requires = "type_name")]
        commands: Option<Vec<String>>,

        /// Output format (defaults to the config file, then json)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file (defaults to the nearest .command-shapes.toml)
        #[arg(long, env = "COMMAND_SHAPES_CONFIG")]
        config: Option<PathBuf>,

        /// Require the first parameter to be a ref wrapper with a view name literal
        #[arg(long = "strict-refs")]
        strict_refs: bool,

        /// Number of parallel jobs (defaults to the number of CPUs)
        #[arg(short = 'j', long = "jobs")]
        jobs: Option<usize>,
    },

    /// Initialize a .command-shapes.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}
