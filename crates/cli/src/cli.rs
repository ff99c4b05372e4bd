//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lexi",
    version,
    about = "Jurisdiction compliance tools for generated legal drafts"
)]
pub struct CliArgs {
    /// YAML rule file overriding the builtin seed set.
    #[arg(long, env = "LEXI_RULES_PATH", global = true)]
    pub rules: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all rule sets, or resolve the requirements for one key.
    Rules {
        /// Document type to resolve (requires --jurisdiction).
        #[arg(long)]
        document_type: Option<String>,
        /// Jurisdiction to resolve (requires --document-type).
        #[arg(long)]
        jurisdiction: Option<String>,
    },
    /// Validate a draft file against a jurisdiction's requirements.
    Validate {
        /// Path to the draft text file.
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        jurisdiction: String,
        #[arg(long)]
        document_type: String,
        /// Print the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}
