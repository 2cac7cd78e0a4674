use bigdecimal::{BigDecimal, Zero};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{InvestmentDetails, InvestmentStatus, PortfolioSummary};
use crate::store::Store;

/// Folds investments of every status into totals; only `active_investments`
/// looks at status.
pub fn summarize_investments(investments: &[InvestmentDetails]) -> PortfolioSummary {
    let (total_invested, total_expected_return, active_investments) = investments.iter().fold(
        (BigDecimal::zero(), BigDecimal::zero(), 0u64),
        |(invested, expected, active), details| {
            let inv = &details.investment;
            let active = active + u64::from(inv.status == InvestmentStatus::Active);
            (invested + &inv.amount, expected + &inv.expected_return, active)
        },
    );

    PortfolioSummary {
        total_gain: &total_expected_return - &total_invested,
        total_invested,
        total_expected_return,
        active_investments,
    }
}

/// A user's investments, newest first, with their summary.
pub async fn summarize(
    store: &dyn Store,
    user_id: Uuid,
) -> Result<(Vec<InvestmentDetails>, PortfolioSummary), AppError> {
    let investments = store.investments_for_user(user_id).await?;
    let summary = summarize_investments(&investments);
    Ok((investments, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLevel;
    use crate::services::investment_service;
    use crate::store::MemoryStore;
    use crate::test_support::product;
    use chrono::{Duration, Utc};
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[tokio::test]
    async fn test_empty_portfolio_is_all_zeros() {
        let store = MemoryStore::new();
        let (investments, summary) = summarize(&store, Uuid::new_v4()).await.unwrap();
        assert!(investments.is_empty());
        assert_eq!(summary, PortfolioSummary::default());
        assert_eq!(summary.total_gain, BigDecimal::zero());
    }

    #[tokio::test]
    async fn test_totals_include_cancelled_but_count_only_active() {
        let fd = product("Bank FD", RiskLevel::Low, 8, 12);
        let fund = product("Index Fund", RiskLevel::High, 12, 6);
        let (fd_id, fund_id) = (fd.id, fund.id);
        let store = MemoryStore::with_products(vec![fd, fund]);
        let user_id = Uuid::new_v4();
        let now = Utc::now();

        let two_hours_ago = now - Duration::hours(2);
        let first =
            investment_service::create_at(&store, user_id, fd_id, dec("10000"), two_hours_ago)
                .await
                .unwrap();
        let hour_ago = now - Duration::hours(1);
        investment_service::create_at(&store, user_id, fund_id, dec("20000"), hour_ago)
            .await
            .unwrap();
        investment_service::cancel_at(&store, first.investment.id, user_id, now).await.unwrap();
        // Someone else's holdings are never folded in.
        investment_service::create_at(&store, Uuid::new_v4(), fd_id, dec("50000"), now)
            .await
            .unwrap();

        let (investments, summary) = summarize(&store, user_id).await.unwrap();

        assert_eq!(investments.len(), 2);
        assert_eq!(investments[0].product_name, "Index Fund");
        assert_eq!(summary.total_invested, dec("30000"));
        // 10000 -> 10800, 20000 -> 21200
        assert_eq!(summary.total_expected_return, dec("32000"));
        assert_eq!(summary.total_gain, dec("2000"));
        assert_eq!(summary.active_investments, 1);
    }
}
