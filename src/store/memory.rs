use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::{
    AuditEntry, Investment, InvestmentDetails, InvestmentProduct, InvestmentStatus, NewUser,
    ProductFilter, ProductSort, RiskLevel, User,
};

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    products: Vec<InvestmentProduct>,
    investments: Vec<Investment>,
    audit: Vec<AuditEntry>,
}

/// In-process store with the same semantics as [`super::PgStore`].
/// Rows keep insertion order unless a query asks for an ordering.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    audit_fails: AtomicBool,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<InvestmentProduct>) -> Self {
        let store = Self::default();
        store.inner.write().products = products;
        store
    }

    pub fn add_product(&self, product: InvestmentProduct) {
        self.inner.write().products.push(product);
    }

    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.inner.read().audit.clone()
    }

    /// Makes every audit write fail.
    pub fn set_audit_fails(&self, fails: bool) {
        self.audit_fails.store(fails, Ordering::SeqCst);
    }

    /// Makes `ping` fail, as an unreachable database would.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn details(inner: &Inner, investment: &Investment) -> Option<InvestmentDetails> {
        let product = inner.products.iter().find(|p| p.id == investment.product_id)?;
        Some(InvestmentDetails {
            investment: investment.clone(),
            product_name: product.name.clone(),
            investment_type: product.investment_type,
            risk_level: product.risk_level,
            description: product.description.clone(),
            annual_yield: product.annual_yield.clone(),
            tenure_months: product.tenure_months,
        })
    }
}

fn sort_desc(products: &mut [InvestmentProduct], sort: ProductSort) {
    match sort {
        ProductSort::AnnualYield => products.sort_by(|a, b| b.annual_yield.cmp(&a.annual_yield)),
        ProductSort::TenureMonths => products.sort_by(|a, b| b.tenure_months.cmp(&a.tenure_months)),
        ProductSort::MinInvestment => {
            products.sort_by(|a, b| b.min_investment.cmp(&a.min_investment))
        }
        ProductSort::CreatedAt => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write();
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::UniqueViolation("users_email_key".to_string()));
        }
        let created = User {
            id: Uuid::new_v4(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            risk_appetite: user.risk_appetite,
            created_at: Utc::now(),
        };
        inner.users.push(created.clone());
        Ok(created)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<InvestmentProduct>, StoreError> {
        let mut products: Vec<InvestmentProduct> = self
            .inner
            .read()
            .products
            .iter()
            .filter(|p| filter.risk_level.map_or(true, |r| p.risk_level == r))
            .filter(|p| filter.investment_type.map_or(true, |t| p.investment_type == t))
            .cloned()
            .collect();
        if let Some(sort) = filter.sort {
            sort_desc(&mut products, sort);
        }
        Ok(products)
    }

    async fn find_product(&self, id: Uuid) -> Result<Option<InvestmentProduct>, StoreError> {
        Ok(self.inner.read().products.iter().find(|p| p.id == id).cloned())
    }

    async fn top_products_for_risk(
        &self,
        risk_level: RiskLevel,
        limit: i64,
    ) -> Result<Vec<InvestmentProduct>, StoreError> {
        let mut products: Vec<InvestmentProduct> = self
            .inner
            .read()
            .products
            .iter()
            .filter(|p| p.risk_level == risk_level)
            .cloned()
            .collect();
        sort_desc(&mut products, ProductSort::AnnualYield);
        products.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(products)
    }

    async fn insert_investment(&self, investment: &Investment) -> Result<Investment, StoreError> {
        let mut inner = self.inner.write();
        if inner.investments.iter().any(|i| i.id == investment.id) {
            return Err(StoreError::UniqueViolation("investments_pkey".to_string()));
        }
        inner.investments.push(investment.clone());
        Ok(investment.clone())
    }

    async fn investments_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<InvestmentDetails>, StoreError> {
        let inner = self.inner.read();
        let mut rows: Vec<InvestmentDetails> = inner
            .investments
            .iter()
            .filter(|i| i.user_id == user_id)
            .filter_map(|i| Self::details(&inner, i))
            .collect();
        rows.sort_by(|a, b| b.investment.invested_at.cmp(&a.investment.invested_at));
        Ok(rows)
    }

    async fn find_investment(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<InvestmentDetails>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .investments
            .iter()
            .find(|i| i.id == id && i.user_id == user_id)
            .and_then(|i| Self::details(&inner, i)))
    }

    async fn cancel_if_active(
        &self,
        id: Uuid,
        user_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let mut inner = self.inner.write();
        let target = inner.investments.iter_mut().find(|i| {
            i.id == id
                && i.user_id == user_id
                && i.status == InvestmentStatus::Active
                && i.invested_at > cutoff
        });
        match target {
            Some(investment) => {
                investment.status = InvestmentStatus::Cancelled;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn insert_audit(&self, entry: &AuditEntry) -> Result<(), StoreError> {
        if self.audit_fails.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        self.inner.write().audit.push(entry.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::product;
    use bigdecimal::BigDecimal;

    #[tokio::test]
    async fn test_cancel_if_active_is_one_shot() {
        let store = MemoryStore::with_products(vec![product("Gold Bond", RiskLevel::Low, 8, 12)]);
        let product_id = store.inner.read().products[0].id;
        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let investment = Investment {
            id: Uuid::new_v4(),
            user_id,
            product_id,
            amount: BigDecimal::from(5000),
            invested_at: now,
            status: InvestmentStatus::Active,
            expected_return: BigDecimal::from(5400),
            maturity_date: now.date_naive(),
        };
        store.insert_investment(&investment).await.unwrap();

        let cutoff = now - chrono::Duration::hours(24);
        assert_eq!(store.cancel_if_active(investment.id, user_id, cutoff).await.unwrap(), 1);
        assert_eq!(store.cancel_if_active(investment.id, user_id, cutoff).await.unwrap(), 0);
        assert_eq!(
            store.cancel_if_active(investment.id, Uuid::new_v4(), cutoff).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let store = MemoryStore::new();
        let user = NewUser {
            first_name: "Asha".to_string(),
            last_name: String::new(),
            email: "asha@example.com".to_string(),
            password_hash: "hash".to_string(),
            risk_appetite: RiskLevel::Low,
        };
        store.insert_user(&user).await.unwrap();
        let err = store.insert_user(&user).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }
}
