use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Investment, InvestmentDetails, InvestmentStatus};

const DETAIL_SELECT: &str = "SELECT i.id, i.user_id, i.product_id, i.amount, i.invested_at,
        i.status, i.expected_return, i.maturity_date,
        p.name AS product_name, p.investment_type, p.risk_level, p.description,
        p.annual_yield, p.tenure_months
    FROM investments i
    JOIN investment_products p ON i.product_id = p.id";

pub async fn insert(pool: &PgPool, input: &Investment) -> Result<Investment, sqlx::Error> {
    sqlx::query_as::<_, Investment>(
        "INSERT INTO investments
            (id, user_id, product_id, amount, invested_at, status, expected_return, maturity_date)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING id, user_id, product_id, amount, invested_at, status, expected_return,
                   maturity_date",
    )
    .bind(input.id)
    .bind(input.user_id)
    .bind(input.product_id)
    .bind(&input.amount)
    .bind(input.invested_at)
    .bind(input.status)
    .bind(&input.expected_return)
    .bind(input.maturity_date)
    .fetch_one(pool)
    .await
}

pub async fn fetch_all_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<InvestmentDetails>, sqlx::Error> {
    sqlx::query_as::<_, InvestmentDetails>(&format!(
        "{} WHERE i.user_id = $1 ORDER BY i.invested_at DESC",
        DETAIL_SELECT
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<InvestmentDetails>, sqlx::Error> {
    sqlx::query_as::<_, InvestmentDetails>(&format!(
        "{} WHERE i.id = $1 AND i.user_id = $2",
        DETAIL_SELECT
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn cancel_if_active(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    cutoff: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE investments
         SET status = $1
         WHERE id = $2 AND user_id = $3 AND status = $4 AND invested_at > $5",
    )
    .bind(InvestmentStatus::Cancelled)
    .bind(id)
    .bind(user_id)
    .bind(InvestmentStatus::Active)
    .bind(cutoff)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
