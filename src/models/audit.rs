use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Who a request was made by, as far as the handler or token could tell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Actor {
    pub user_id: Option<Uuid>,
    pub email: Option<String>,
}

/// One recorded API request outcome.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuditEntry {
    pub user_id: Option<Uuid>,
    pub email: Option<String>,
    pub endpoint: String,
    pub http_method: String,
    pub status_code: i32,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}
