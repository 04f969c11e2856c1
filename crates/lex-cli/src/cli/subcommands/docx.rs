use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Clone, Debug, Subcommand)]
pub enum DocxCommands {
    /// List parts, paragraphs and placeholders of a .docx file.
    Inspect(DocxInspectArgs),
}

#[derive(Clone, Debug, Args)]
pub struct DocxInspectArgs {
    pub file: PathBuf,
}
