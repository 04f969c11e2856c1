use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Create an account and log in.
    Signup(AuthSignupArgs),
    /// Log in with email and password.
    Login(AuthLoginArgs),
    /// End the server session and clear stored credentials.
    Logout,
    /// Show where the token comes from and who it belongs to.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthSignupArgs {
    /// Display name.
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    /// Password (read from stdin when omitted).
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub email: String,
    /// Password (read from stdin when omitted).
    #[arg(long)]
    pub password: Option<String>,
}
