use std::sync::Arc;

use axum::extract::{OriginalUri, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::auth::bearer_token;
use crate::errors::ErrorMessage;
use crate::models::{Actor, AuditEntry};
use crate::state::AppState;
use crate::store::Store;

/// Sending half of the audit queue. Recording never blocks the request.
#[derive(Clone)]
pub struct AuditLog {
    tx: mpsc::Sender<AuditEntry>,
}

impl AuditLog {
    /// Starts the background writer draining the queue into `store`.
    pub fn spawn(store: Arc<dyn Store>, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        tokio::spawn(run_writer(store, rx));
        Self { tx }
    }

    pub fn record(&self, entry: AuditEntry) {
        match self.tx.try_send(entry) {
            Ok(()) => {}
            Err(TrySendError::Full(entry)) => {
                warn!(
                    "Audit queue full, dropping entry for {} {}",
                    entry.http_method, entry.endpoint
                );
            }
            Err(TrySendError::Closed(entry)) => {
                warn!(
                    "Audit writer stopped, dropping entry for {} {}",
                    entry.http_method, entry.endpoint
                );
            }
        }
    }
}

async fn run_writer(store: Arc<dyn Store>, mut rx: mpsc::Receiver<AuditEntry>) {
    while let Some(entry) = rx.recv().await {
        if let Err(e) = store.insert_audit(&entry).await {
            warn!(
                "Failed to write audit entry for {} {}: {}",
                entry.http_method, entry.endpoint, e
            );
        }
    }
    debug!("Audit writer finished");
}

/// Middleware recording the outcome of every request it wraps.
pub async fn audit_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let http_method = request.method().to_string();
    let endpoint = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let token_actor = bearer_token(request.headers())
        .and_then(|token| state.tokens.verify(token).ok())
        .map(|claims| Actor { user_id: Some(claims.sub), email: Some(claims.email) })
        .unwrap_or_default();

    let response = next.run(request).await;

    let actor = response.extensions().get::<Actor>().cloned().unwrap_or(token_actor);
    let error_message = response
        .extensions()
        .get::<ErrorMessage>()
        .map(|message| message.0.clone());

    state.audit.record(AuditEntry {
        user_id: actor.user_id,
        email: actor.email,
        endpoint,
        http_method,
        status_code: i32::from(response.status().as_u16()),
        error_message,
        created_at: Utc::now(),
    });

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::time::Duration;

    fn entry(endpoint: &str) -> AuditEntry {
        AuditEntry {
            user_id: None,
            email: Some("audit@example.com".to_string()),
            endpoint: endpoint.to_string(),
            http_method: "GET".to_string(),
            status_code: 200,
            error_message: None,
            created_at: Utc::now(),
        }
    }

    async fn wait_for_entries(store: &MemoryStore, count: usize) -> Vec<AuditEntry> {
        for _ in 0..50 {
            let entries = store.audit_entries();
            if entries.len() >= count {
                return entries;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        store.audit_entries()
    }

    #[tokio::test]
    async fn test_writer_persists_recorded_entries() {
        let store = Arc::new(MemoryStore::new());
        let log = AuditLog::spawn(store.clone(), 8);

        log.record(entry("/api/products"));
        log.record(entry("/api/investments"));

        let entries = wait_for_entries(&store, 2).await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].endpoint, "/api/products");
    }

    #[tokio::test]
    async fn test_failing_store_does_not_stop_writer() {
        let store = Arc::new(MemoryStore::new());
        store.set_audit_fails(true);
        let log = AuditLog::spawn(store.clone(), 8);

        log.record(entry("/api/lost"));
        tokio::time::sleep(Duration::from_millis(50)).await;
        store.set_audit_fails(false);
        log.record(entry("/api/kept"));

        let entries = wait_for_entries(&store, 1).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].endpoint, "/api/kept");
    }
}
