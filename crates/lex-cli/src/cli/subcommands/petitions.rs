use clap::{Args, Subcommand};

use super::customers::ListArgs;

#[derive(Clone, Debug, Subcommand)]
pub enum PetitionCommands {
    /// List your petitions, newest first.
    List(ListArgs),
    /// Show one petition.
    Get(PetitionIdArgs),
    /// Delete a petition.
    Delete(PetitionIdArgs),
}

#[derive(Clone, Debug, Args)]
pub struct PetitionIdArgs {
    pub id: String,
}
