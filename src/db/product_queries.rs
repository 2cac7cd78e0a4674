use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{InvestmentProduct, ProductFilter, RiskLevel};

const PRODUCT_COLUMNS: &str = "id, name, investment_type, tenure_months, annual_yield, risk_level,
    min_investment, max_investment, description, created_at, updated_at";

pub async fn fetch_all(
    pool: &PgPool,
    filter: &ProductFilter,
) -> Result<Vec<InvestmentProduct>, sqlx::Error> {
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
    query.push(PRODUCT_COLUMNS);
    query.push(" FROM investment_products WHERE 1=1");

    if let Some(risk_level) = filter.risk_level {
        query.push(" AND risk_level = ").push_bind(risk_level);
    }
    if let Some(investment_type) = filter.investment_type {
        query.push(" AND investment_type = ").push_bind(investment_type);
    }
    // Column names come from the ProductSort allow-list, never from the client.
    if let Some(sort) = filter.sort {
        query.push(" ORDER BY ").push(sort.column()).push(" DESC");
    }

    query
        .build_query_as::<InvestmentProduct>()
        .fetch_all(pool)
        .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<InvestmentProduct>, sqlx::Error> {
    sqlx::query_as::<_, InvestmentProduct>(&format!(
        "SELECT {} FROM investment_products WHERE id = $1",
        PRODUCT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_top_for_risk(
    pool: &PgPool,
    risk_level: RiskLevel,
    limit: i64,
) -> Result<Vec<InvestmentProduct>, sqlx::Error> {
    sqlx::query_as::<_, InvestmentProduct>(&format!(
        "SELECT {} FROM investment_products
         WHERE risk_level = $1
         ORDER BY annual_yield DESC
         LIMIT $2",
        PRODUCT_COLUMNS
    ))
    .bind(risk_level)
    .bind(limit)
    .fetch_all(pool)
    .await
}
