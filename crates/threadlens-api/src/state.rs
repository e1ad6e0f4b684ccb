use std::sync::Arc;

use threadlens_auth::IdentityVerifier;
use threadlens_core::{AnalysisEngine, ConversationEngine};
use threadlens_persist::ConversationStore;

use crate::config::Config;

/// Shared application state passed to all handlers.
///
/// Every collaborator is constructed once in `main` and injected here; the
/// handlers hold no other state, so each request is an independent unit of
/// work.
pub struct AppState {
    pub config: Arc<Config>,
    pub analysis: AnalysisEngine,
    pub conversation: ConversationEngine,
    pub store: Arc<dyn ConversationStore>,
    pub verifier: Arc<dyn IdentityVerifier>,
}

impl AppState {
    pub fn new(
        config: Config,
        analysis: AnalysisEngine,
        conversation: ConversationEngine,
        store: Arc<dyn ConversationStore>,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            analysis,
            conversation,
            store,
            verifier,
        }
    }
}
