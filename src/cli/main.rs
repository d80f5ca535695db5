//! relmodel - compile annotated designs into relational models

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use relational_model::cli::commands::compile::handle_compile;
use relational_model::cli::output::OutputFormat;

/// Compile annotated type designs into relational model descriptors
#[derive(Parser)]
#[command(name = "relmodel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile every aggregate of a design file
    Compile {
        /// Design file (.yaml, .yml, .json), or `-` for stdin
        input: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,

        /// Compiler configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            input,
            format,
            config,
        } => {
            handle_compile(&input, format, config.as_deref())
                .with_context(|| format!("failed to compile design {}", input))?;
        }
    }

    Ok(())
}
