use std::sync::Arc;

use chrono::TimeDelta;
use lex_auth::TokenSigner;
use lex_config::{AuthConfig, GeneralConfig};
use lex_db::service::LexService;
use lex_llm::PetitionDrafter;

/// Upper bound on `?limit=` for list endpoints.
pub const MAX_LIST_LIMIT: u32 = 500;

/// Shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LexService>,
    pub drafter: Arc<PetitionDrafter>,
    pub signer: Arc<TokenSigner>,
    pub auth: AuthConfig,
    pub general: GeneralConfig,
}

impl AppState {
    #[must_use]
    pub fn new(
        service: LexService,
        drafter: PetitionDrafter,
        auth: AuthConfig,
        general: GeneralConfig,
    ) -> Self {
        let signer = TokenSigner::new(&auth.jwt_secret, session_ttl(&auth));
        Self {
            service: Arc::new(service),
            drafter: Arc::new(drafter),
            signer: Arc::new(signer),
            auth,
            general,
        }
    }

    /// Resolve a client-supplied list limit, defaulting from config.
    #[must_use]
    pub fn list_limit(&self, requested: Option<u32>) -> u32 {
        resolve_limit(requested, self.general.default_limit)
    }
}

fn resolve_limit(requested: Option<u32>, default: u32) -> u32 {
    requested.unwrap_or(default).clamp(1, MAX_LIST_LIMIT)
}

/// Session lifetime, capped at ten years.
fn session_ttl(auth: &AuthConfig) -> TimeDelta {
    const TEN_YEARS: i64 = 10 * 365 * 24 * 60 * 60;
    let secs = i64::try_from(auth.token_ttl_secs).unwrap_or(TEN_YEARS).min(TEN_YEARS);
    TimeDelta::seconds(secs)
}
