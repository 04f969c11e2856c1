use std::io::IsTerminal;

use anyhow::Context;
use lex_core::input::{LoginRequest, SignupRequest};
use lex_core::responses::{MessageResponse, SessionResponse, UserView};
use serde::Serialize;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::client::{ApiClient, ClientError};
use crate::output::output;

#[derive(Serialize)]
struct AuthResponse {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<UserView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<String>,
}

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

pub async fn handle(action: &AuthCommands, flags: &GlobalFlags, client: &ApiClient) -> anyhow::Result<()> {
    match action {
        AuthCommands::Signup(args) => {
            let request = SignupRequest {
                name: args.name.clone(),
                email: args.email.clone(),
                password: read_password(args.password.as_deref())?,
            };
            request.validate()?;
            let session: SessionResponse = client.post_public("/api/auth/signup", &request).await?;
            remember(session, flags)
        }
        AuthCommands::Login(args) => {
            let request = LoginRequest {
                email: args.email.clone(),
                password: read_password(args.password.as_deref())?,
            };
            let session: SessionResponse = client.post_public("/api/auth/login", &request).await?;
            remember(session, flags)
        }
        AuthCommands::Logout => {
            // Tokens are stateless; the server call only matters for cookies.
            if let Err(error) = client
                .post_public::<_, MessageResponse>("/api/auth/logout", &json!({}))
                .await
            {
                tracing::debug!(%error, "server logout failed");
            }
            lex_auth::logout()?;
            output(&AuthLogoutResponse { cleared: true }, flags.format)
        }
        AuthCommands::Status => status(flags, client).await,
    }
}

fn remember(session: SessionResponse, flags: &GlobalFlags) -> anyhow::Result<()> {
    lex_auth::token_store::store(&session.token).context("failed to store session token")?;
    output(
        &AuthResponse {
            authenticated: true,
            source: None,
            user: Some(session.user),
            expires_at: Some(session.expires_at.to_rfc3339()),
        },
        flags.format,
    )
}

async fn status(flags: &GlobalFlags, client: &ApiClient) -> anyhow::Result<()> {
    let Some((_, source)) = lex_auth::token_store::load_with_source() else {
        return output(&not_authenticated(None), flags.format);
    };

    match client.get::<UserView>("/api/auth/session").await {
        Ok(user) => output(
            &AuthResponse {
                authenticated: true,
                source: Some(source.as_str()),
                user: Some(user),
                expires_at: None,
            },
            flags.format,
        ),
        Err(ClientError::Api { status: 401, .. }) => {
            output(&not_authenticated(Some(source.as_str())), flags.format)
        }
        Err(error) => Err(error.into()),
    }
}

const fn not_authenticated(source: Option<&'static str>) -> AuthResponse {
    AuthResponse {
        authenticated: false,
        source,
        user: None,
        expires_at: None,
    }
}

/// `--password`, or one line from stdin.
fn read_password(flag: Option<&str>) -> anyhow::Result<String> {
    if let Some(password) = flag {
        return Ok(password.to_string());
    }
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprint!("Senha: ");
    }
    let mut line = String::new();
    stdin
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("password required (--password or stdin)");
    }
    Ok(password)
}
