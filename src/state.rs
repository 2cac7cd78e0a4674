use std::sync::Arc;

use crate::audit::AuditLog;
use crate::auth::TokenKeys;
use crate::config::AppConfig;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: Arc<TokenKeys>,
    pub audit: AuditLog,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Builds the shared state and starts the audit writer. Needs a Tokio runtime.
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Self {
        let tokens = Arc::new(TokenKeys::new(&config.jwt_secret, config.token_ttl_hours));
        let audit = AuditLog::spawn(store.clone(), config.audit_queue_capacity);
        Self {
            store,
            tokens,
            audit,
            config: Arc::new(config),
        }
    }
}
