use anyhow::Context;
use lex_config::LexConfig;
use lex_db::service::LexService;
use lex_llm::PetitionDrafter;
use lex_server::{AppState, build_router, jobs};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("lexd error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    init_tracing()?;

    let config = LexConfig::load_with_dotenv().context("failed to load configuration")?;
    config
        .require_server()
        .context("invalid server configuration")?;
    let addr = config.server.socket_addr()?;

    let service = LexService::new_local(&config.database.path)
        .await
        .with_context(|| format!("failed to open database '{}'", config.database.path))?;
    service
        .fail_stale_jobs(jobs::MSG_JOB_INTERRUPTED)
        .await
        .context("failed to close unfinished generation jobs")?;

    let drafter = match PetitionDrafter::from_config(&config.llm) {
        Ok(drafter) => {
            tracing::info!(providers = ?drafter.provider_names(), "LLM providers ready");
            drafter
        }
        Err(error) => {
            tracing::warn!(%error, "LLM not configured; generation requests will fail");
            PetitionDrafter::new(Vec::new(), config.llm.max_attempts)
        }
    };

    let state = AppState::new(service, drafter, config.auth, config.general);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "lexd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("lexd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for Ctrl-C");
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("LEX_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
