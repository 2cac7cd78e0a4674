use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::db;
use crate::models::{
    AuditEntry, Investment, InvestmentDetails, InvestmentProduct, NewUser, ProductFilter,
    RiskLevel, User,
};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_unique(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::Database(err) if err.is_unique_violation() => {
            StoreError::UniqueViolation(err.constraint().unwrap_or("unknown").to_string())
        }
        e => StoreError::Database(e),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: &NewUser) -> Result<User, StoreError> {
        db::user_queries::insert(&self.pool, user)
            .await
            .map_err(map_unique)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(db::user_queries::fetch_one(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(db::user_queries::fetch_by_email(&self.pool, email).await?)
    }

    async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<InvestmentProduct>, StoreError> {
        Ok(db::product_queries::fetch_all(&self.pool, filter).await?)
    }

    async fn find_product(&self, id: Uuid) -> Result<Option<InvestmentProduct>, StoreError> {
        Ok(db::product_queries::fetch_one(&self.pool, id).await?)
    }

    async fn top_products_for_risk(
        &self,
        risk_level: RiskLevel,
        limit: i64,
    ) -> Result<Vec<InvestmentProduct>, StoreError> {
        Ok(db::product_queries::fetch_top_for_risk(&self.pool, risk_level, limit).await?)
    }

    async fn insert_investment(&self, investment: &Investment) -> Result<Investment, StoreError> {
        db::investment_queries::insert(&self.pool, investment)
            .await
            .map_err(map_unique)
    }

    async fn investments_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<InvestmentDetails>, StoreError> {
        Ok(db::investment_queries::fetch_all_for_user(&self.pool, user_id).await?)
    }

    async fn find_investment(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<InvestmentDetails>, StoreError> {
        Ok(db::investment_queries::fetch_one(&self.pool, id, user_id).await?)
    }

    async fn cancel_if_active(
        &self,
        id: Uuid,
        user_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        Ok(db::investment_queries::cancel_if_active(&self.pool, id, user_id, cutoff).await?)
    }

    async fn insert_audit(&self, entry: &AuditEntry) -> Result<(), StoreError> {
        Ok(db::audit_queries::insert(&self.pool, entry).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(db::ping(&self.pool).await?)
    }
}
