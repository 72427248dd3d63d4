use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::store::MemoryStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    /// Generative-language backend. `LlmClient` in production.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
}
