mod glob_util;
mod inspect;
mod render;
mod schema;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

/// Default glob for mapping files
const DEFAULT_INPUT: &str = "./*.yml";

#[derive(Parser, Debug)]
#[command(name = "doctrine-erd")]
#[command(version)]
#[command(about = "Generate entity relationship diagrams from Doctrine YAML metadata", long_about = None)]
pub struct Cli {
    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a diagram of the entities declared in mapping files
    Render {
        /// Glob pattern for metadata yml files (repeatable)
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: Vec<String>,

        /// Output file; the extension selects the format, "-" writes to stdout
        #[arg(short, long, default_value = "./diagram.svg")]
        output: PathBuf,

        /// Diagram title (overrides the configuration file)
        #[arg(short, long)]
        title: Option<String>,

        /// Output format: svg, png, pdf, dot, json (default: from output extension)
        #[arg(short, long)]
        format: Option<String>,

        /// Layout direction: lr (left-right) or tb (top-bottom)
        #[arg(long)]
        layout: Option<String>,

        /// Style configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the resolved entity model as JSON
    Inspect {
        /// Glob pattern for metadata yml files (repeatable)
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: Vec<String>,

        /// Style configuration file (palette and title)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the JSON schema of the JSON export
    Schema {
        /// Write the schema to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Render {
            input,
            output,
            title,
            format,
            layout,
            config,
        } => render::run(render::RenderArgs {
            input,
            output,
            title,
            format,
            layout,
            config,
        }),
        Commands::Inspect { input, config } => inspect::run(input, config),
        Commands::Schema { output } => schema::run(output),
        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "doctrine-erd",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
