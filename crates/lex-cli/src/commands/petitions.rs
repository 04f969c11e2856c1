use lex_core::entities::Petition;
use lex_core::responses::MessageResponse;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PetitionCommands;
use crate::client::{ApiClient, with_limit};
use crate::output::output;

pub async fn handle(action: &PetitionCommands, flags: &GlobalFlags, client: &ApiClient) -> anyhow::Result<()> {
    match action {
        PetitionCommands::List(args) => {
            let petitions: Vec<Petition> = client.get(&with_limit("/api/petitions", args.limit)).await?;
            output(&petitions, flags.format)
        }
        PetitionCommands::Get(args) => {
            let petition: Petition = client.get(&format!("/api/petitions/{}", args.id)).await?;
            output(&petition, flags.format)
        }
        PetitionCommands::Delete(args) => {
            let message: MessageResponse = client.delete(&format!("/api/petitions/{}", args.id)).await?;
            output(&message, flags.format)
        }
    }
}
