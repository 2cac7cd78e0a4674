use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{InvestmentProduct, ProductFilter, RiskLevel};
use crate::store::Store;

pub const RECOMMENDATION_LIMIT: i64 = 5;

pub async fn fetch_all(
    store: &dyn Store,
    filter: &ProductFilter,
) -> Result<Vec<InvestmentProduct>, AppError> {
    Ok(store.list_products(filter).await?)
}

pub async fn fetch_one(store: &dyn Store, id: Uuid) -> Result<InvestmentProduct, AppError> {
    store
        .find_product(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}

/// Highest-yield products whose risk level equals the user's appetite.
pub async fn recommend(
    store: &dyn Store,
    user_id: Uuid,
) -> Result<(Vec<InvestmentProduct>, RiskLevel), AppError> {
    let user = store
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    let products = store
        .top_products_for_risk(user.risk_appetite, RECOMMENDATION_LIMIT)
        .await?;
    Ok((products, user.risk_appetite))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InvestmentType, NewUser, ProductSort};
    use crate::store::MemoryStore;
    use crate::test_support::product;

    fn catalog() -> MemoryStore {
        let mut etf = product("Nifty ETF", RiskLevel::High, 14, 24);
        etf.investment_type = InvestmentType::Etf;
        let mut fd = product("Bank FD", RiskLevel::Low, 7, 12);
        fd.investment_type = InvestmentType::Fd;
        MemoryStore::with_products(vec![
            product("Corporate Bond", RiskLevel::Moderate, 9, 36),
            etf,
            fd,
            product("Gilt Bond", RiskLevel::Low, 8, 60),
        ])
    }

    fn names(products: &[InvestmentProduct]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_filters_are_equality_matches() {
        let store = catalog();
        let filter = ProductFilter { risk_level: Some(RiskLevel::Low), ..Default::default() };
        let products = fetch_all(&store, &filter).await.unwrap();
        assert_eq!(names(&products), vec!["Bank FD", "Gilt Bond"]);

        let filter = ProductFilter {
            risk_level: Some(RiskLevel::Low),
            investment_type: Some(InvestmentType::Bond),
            sort: None,
        };
        assert_eq!(names(&fetch_all(&store, &filter).await.unwrap()), vec!["Gilt Bond"]);
    }

    #[tokio::test]
    async fn test_sorts_descending_by_allowed_column() {
        let store = catalog();
        let filter = ProductFilter { sort: Some(ProductSort::TenureMonths), ..Default::default() };
        let products = fetch_all(&store, &filter).await.unwrap();
        assert_eq!(names(&products), vec!["Gilt Bond", "Corporate Bond", "Nifty ETF", "Bank FD"]);
    }

    #[tokio::test]
    async fn test_unknown_sort_key_keeps_default_order() {
        let store = catalog();
        let filter = ProductFilter {
            sort: ProductSort::from_param("droptable"),
            ..Default::default()
        };
        let products = fetch_all(&store, &filter).await.unwrap();
        assert_eq!(names(&products), vec!["Corporate Bond", "Nifty ETF", "Bank FD", "Gilt Bond"]);
    }

    #[tokio::test]
    async fn test_recommendations_match_appetite_and_cap_at_five() {
        let store = catalog();
        for yield_pct in 1..=6 {
            let name = format!("Low {}", yield_pct);
            store.add_product(product(&name, RiskLevel::Low, yield_pct, 12));
        }
        let user = store
            .insert_user(&NewUser {
                first_name: "Meera".to_string(),
                last_name: String::new(),
                email: "meera@example.com".to_string(),
                password_hash: "hash".to_string(),
                risk_appetite: RiskLevel::Low,
            })
            .await
            .unwrap();

        let (products, appetite) = recommend(&store, user.id).await.unwrap();

        assert_eq!(appetite, RiskLevel::Low);
        assert_eq!(products.len(), 5);
        assert!(products.iter().all(|p| p.risk_level == RiskLevel::Low));
        assert_eq!(names(&products)[..2], ["Gilt Bond", "Bank FD"]);
        assert!(products.windows(2).all(|w| w[0].annual_yield >= w[1].annual_yield));
    }

    #[tokio::test]
    async fn test_recommend_for_unknown_user_is_not_found() {
        let store = catalog();
        let err = recommend(&store, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_fetch_one_missing_product() {
        let err = fetch_one(&catalog(), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Product not found"));
    }
}
