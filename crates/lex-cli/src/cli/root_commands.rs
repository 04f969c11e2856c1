use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{AuthCommands, CustomerCommands, DocxCommands, PetitionCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Account and session management.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Customer records.
    Customers {
        #[command(subcommand)]
        action: CustomerCommands,
    },
    /// Stored petitions.
    Petitions {
        #[command(subcommand)]
        action: PetitionCommands,
    },
    /// Draft a petition with the LLM and wait for the result.
    Generate(GenerateArgs),
    /// Save a petition as a .docx file.
    Download(DownloadArgs),
    /// Local .docx utilities.
    Docx {
        #[command(subcommand)]
        action: DocxCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct GenerateArgs {
    /// JSON file with the petition form fields.
    #[arg(long)]
    pub file: PathBuf,
    /// Print the job ID and return without polling.
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(Clone, Debug, Args)]
pub struct DownloadArgs {
    /// Petition ID.
    pub id: String,
    /// Output path (defaults to the server-suggested file name).
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}
