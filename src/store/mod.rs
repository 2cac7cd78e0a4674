mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    AuditEntry, Investment, InvestmentDetails, InvestmentProduct, NewUser, ProductFilter,
    RiskLevel, User,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence handle injected into every service.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_user(&self, user: &NewUser) -> Result<User, StoreError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn list_products(&self, filter: &ProductFilter)
        -> Result<Vec<InvestmentProduct>, StoreError>;
    async fn find_product(&self, id: Uuid) -> Result<Option<InvestmentProduct>, StoreError>;
    /// Products of exactly `risk_level`, highest yield first.
    async fn top_products_for_risk(
        &self,
        risk_level: RiskLevel,
        limit: i64,
    ) -> Result<Vec<InvestmentProduct>, StoreError>;

    async fn insert_investment(&self, investment: &Investment)
        -> Result<Investment, StoreError>;
    /// All of a user's investments, newest first.
    async fn investments_for_user(&self, user_id: Uuid)
        -> Result<Vec<InvestmentDetails>, StoreError>;
    async fn find_investment(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<InvestmentDetails>, StoreError>;
    /// Sets status to cancelled only if the row is still active and was
    /// invested strictly after `cutoff`. Returns the number of rows changed.
    async fn cancel_if_active(
        &self,
        id: Uuid,
        user_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, StoreError>;

    async fn insert_audit(&self, entry: &AuditEntry) -> Result<(), StoreError>;
    async fn ping(&self) -> Result<(), StoreError>;
}
