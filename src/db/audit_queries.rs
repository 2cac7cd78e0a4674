use sqlx::PgPool;

use crate::models::AuditEntry;

pub async fn insert(pool: &PgPool, entry: &AuditEntry) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO transaction_logs
            (user_id, email, endpoint, http_method, status_code, error_message, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(entry.user_id)
    .bind(&entry.email)
    .bind(&entry.endpoint)
    .bind(&entry.http_method)
    .bind(entry.status_code)
    .bind(&entry.error_message)
    .bind(entry.created_at)
    .execute(pool)
    .await?;
    Ok(())
}
