pub mod audit_queries;
pub mod investment_queries;
pub mod product_queries;
pub mod user_queries;

use sqlx::PgPool;

pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
