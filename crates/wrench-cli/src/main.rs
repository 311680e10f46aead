//! wrench CLI - Schema declarations from reflected host classes
//!
//! Commands:
//! - `wrench generate` - Generate one schema file per marked class
//! - `wrench check` - Show what would be generated without writing files

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

mod check;
mod generate;
mod logging;
mod settings;

#[derive(Parser)]
#[command(name = "wrench")]
#[command(author, version, about = "Generate schema class declarations from host classes", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease log verbosity (-q warn, -qq error)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate schema files for every marked class
    Generate {
        /// AST dump produced by the analysis service (JSON)
        ast: PathBuf,

        /// Path to wrench.toml (default: ./wrench.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for generated files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Extension of generated files
        #[arg(short, long)]
        extension: Option<String>,

        /// Qualified name of the marker template
        #[arg(short, long)]
        marker: Option<String>,

        /// Do not print rendered declarations to stdout
        #[arg(long)]
        no_preview: bool,
    },

    /// Collect and reflect marked classes without writing files
    Check {
        /// AST dump produced by the analysis service (JSON)
        ast: PathBuf,

        /// Path to wrench.toml (default: ./wrench.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            ast,
            config,
            output_dir,
            extension,
            marker,
            no_preview,
        } => {
            let overrides = settings::Overrides {
                output_dir,
                extension,
                marker,
                no_preview,
            };
            let config = settings::load(config.as_deref(), &overrides)?;
            logging::init(&config.log_level, cli.verbose, cli.quiet);
            generate::run(&ast, config)?;
        }
        Commands::Check { ast, config } => {
            let config = settings::load(config.as_deref(), &settings::Overrides::default())?;
            logging::init(&config.log_level, cli.verbose, cli.quiet);
            check::run(&ast, config)?;
        }
    }

    Ok(())
}
