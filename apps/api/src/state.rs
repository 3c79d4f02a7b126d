use std::sync::Arc;

use crate::config::Config;
use crate::game::session::SessionStore;
use crate::search::matcher::JobMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable search backend. Default: whole-text. Swap via FUZZY_TOKENIZED env.
    pub matcher: Arc<dyn JobMatcher>,
    /// Live negotiation sessions, one lock per session id.
    pub sessions: SessionStore,
}
