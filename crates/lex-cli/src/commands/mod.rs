mod auth;
mod customers;
mod docx;
mod download;
mod generate;
mod petitions;

use lex_config::LexConfig;

use crate::cli::{Commands, GlobalFlags};
use crate::client::ApiClient;

pub async fn dispatch(command: Commands, flags: &GlobalFlags, config: &LexConfig) -> anyhow::Result<()> {
    match command {
        Commands::Docx { action } => docx::handle(&action, flags),
        Commands::Auth { action } => auth::handle(&action, flags, &client(flags, config)?).await,
        Commands::Customers { action } => {
            customers::handle(&action, flags, &client(flags, config)?).await
        }
        Commands::Petitions { action } => {
            petitions::handle(&action, flags, &client(flags, config)?).await
        }
        Commands::Generate(args) => {
            generate::handle(&args, flags, config, &client(flags, config)?).await
        }
        Commands::Download(args) => download::handle(&args, flags, &client(flags, config)?).await,
    }
}

/// Client for `--server` (or `client.server_url`) carrying the stored token.
fn client(flags: &GlobalFlags, config: &LexConfig) -> anyhow::Result<ApiClient> {
    let base_url = flags
        .server
        .as_deref()
        .unwrap_or(&config.client.server_url);
    tracing::debug!(base_url, "using server");
    Ok(ApiClient::new(base_url, lex_auth::resolve_token())?)
}
