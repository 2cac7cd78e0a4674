use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    Investment, InvestmentDetails, InvestmentProduct, InvestmentStatus, MONEY_SCALE,
};
use crate::services::returns::calculate_return;
use crate::store::Store;

/// How long after creation an investment may still be cancelled.
pub fn cancellation_window() -> Duration {
    Duration::hours(24)
}

/// Calendar-month addition. A day that does not exist in the target month
/// is clamped to that month's last day.
pub fn maturity_date(
    invested_at: DateTime<Utc>,
    tenure_months: i32,
) -> Result<NaiveDate, AppError> {
    let months = u32::try_from(tenure_months)
        .ok()
        .filter(|m| *m > 0)
        .ok_or_else(|| AppError::Internal(format!("Invalid product tenure: {}", tenure_months)))?;
    invested_at
        .date_naive()
        .checked_add_months(Months::new(months))
        .ok_or_else(|| AppError::Internal("Maturity date out of range".to_string()))
}

fn check_amount(product: &InvestmentProduct, amount: &BigDecimal) -> Result<(), AppError> {
    if *amount < product.min_investment {
        return Err(AppError::InvalidAmount(format!(
            "Minimum investment amount is ₹{}",
            product.min_investment
        )));
    }
    if let Some(max) = &product.max_investment {
        if amount > max {
            return Err(AppError::InvalidAmount(format!(
                "Maximum investment amount is ₹{}",
                max
            )));
        }
    }
    Ok(())
}

pub async fn create(
    store: &dyn Store,
    user_id: Uuid,
    product_id: Uuid,
    amount: BigDecimal,
) -> Result<InvestmentDetails, AppError> {
    create_at(store, user_id, product_id, amount, Utc::now()).await
}

pub async fn create_at(
    store: &dyn Store,
    user_id: Uuid,
    product_id: Uuid,
    amount: BigDecimal,
    now: DateTime<Utc>,
) -> Result<InvestmentDetails, AppError> {
    let product = store
        .find_product(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Investment product not found".to_string()))?;

    check_amount(&product, &amount)?;

    let expected_return = calculate_return(&amount, &product.annual_yield, product.tenure_months)
        .round(MONEY_SCALE);
    let investment = Investment {
        id: Uuid::new_v4(),
        user_id,
        product_id,
        amount,
        invested_at: now,
        status: InvestmentStatus::Active,
        expected_return,
        maturity_date: maturity_date(now, product.tenure_months)?,
    };
    let investment = store.insert_investment(&investment).await?;
    info!(
        "Created investment {} for user {} in product {}",
        investment.id, user_id, product.id
    );

    Ok(InvestmentDetails {
        investment,
        product_name: product.name,
        investment_type: product.investment_type,
        risk_level: product.risk_level,
        description: product.description,
        annual_yield: product.annual_yield,
        tenure_months: product.tenure_months,
    })
}

pub async fn fetch_one(
    store: &dyn Store,
    id: Uuid,
    user_id: Uuid,
) -> Result<InvestmentDetails, AppError> {
    store
        .find_investment(id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Investment not found".to_string()))
}

pub async fn cancel(store: &dyn Store, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
    cancel_at(store, id, user_id, Utc::now()).await
}

/// Cancels in a single conditional write; the follow-up read only picks the error.
pub async fn cancel_at(
    store: &dyn Store,
    id: Uuid,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let cutoff = now - cancellation_window();
    if store.cancel_if_active(id, user_id, cutoff).await? > 0 {
        info!("Cancelled investment {} for user {}", id, user_id);
        return Ok(());
    }

    let existing = fetch_one(store, id, user_id).await?;
    if existing.investment.status != InvestmentStatus::Active {
        warn!("Investment {} is {}, not cancellable", id, existing.investment.status);
        return Err(AppError::InvalidState);
    }
    warn!(
        "Investment {} is outside the cancellation window (invested at {})",
        id, existing.investment.invested_at
    );
    Err(AppError::WindowExpired)
}
