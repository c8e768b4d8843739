use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::config::StoreConfig;
use crate::errors::AppError;
use crate::models::cv::{CvRecordRow, CvUpdate, ExtractedRecord};
use crate::store::RecordStore;

/// PostgreSQL-backed record store. The table name comes from `StoreConfig`,
/// which guarantees it is a bare identifier, so it is safe to splice into SQL.
pub struct PgRecordStore {
    pool: PgPool,
    queries: Queries,
}

struct Queries {
    insert: String,
    select_one: String,
    select_all: String,
    select_by_email: String,
    update: String,
}

impl Queries {
    fn for_table(table: &str) -> Self {
        Queries {
            insert: format!(
                r#"
                INSERT INTO {table}
                    (name, email, phone, linkedin, education, work_experience, projects, skills)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id
                "#
            ),
            select_one: format!("SELECT * FROM {table} WHERE id = $1"),
            select_all: format!("SELECT * FROM {table} ORDER BY id"),
            select_by_email: format!("SELECT * FROM {table} WHERE email = $1 ORDER BY id LIMIT 1"),
            // NULL parameters keep the existing column value.
            update: format!(
                r#"
                UPDATE {table} SET
                    name = COALESCE($1, name),
                    email = COALESCE($2, email),
                    phone = COALESCE($3, phone),
                    linkedin = COALESCE($4, linkedin),
                    updated_at = now()
                WHERE id = $5
                RETURNING *
                "#
            ),
        }
    }
}

impl PgRecordStore {
    /// Wraps `pool` and creates the record table if it does not exist yet.
    pub async fn connect(pool: PgPool, config: &StoreConfig) -> Result<Self> {
        let table = config.table();
        ensure_schema(&pool, table)
            .await
            .with_context(|| format!("Failed to prepare table '{table}'"))?;
        info!("Record store ready (table: {table})");

        Ok(PgRecordStore {
            pool,
            queries: Queries::for_table(table),
        })
    }
}

async fn ensure_schema(pool: &PgPool, table: &str) -> Result<(), sqlx::Error> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            linkedin TEXT,
            education TEXT,
            work_experience TEXT,
            projects TEXT,
            skills TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS {table}_email_idx ON {table} (email)"
    ))
    .execute(pool)
    .await?;

    Ok(())
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn create(&self, record: ExtractedRecord) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar(&self.queries.insert)
            .bind(record.name)
            .bind(record.email)
            .bind(record.phone)
            .bind(record.linkedin)
            .bind(record.education)
            .bind(record.work_experience)
            .bind(record.projects)
            .bind(record.skills)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<CvRecordRow>, AppError> {
        let row = sqlx::query_as::<_, CvRecordRow>(&self.queries.select_one)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<CvRecordRow>, AppError> {
        let rows = sqlx::query_as::<_, CvRecordRow>(&self.queries.select_all)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<CvRecordRow>, AppError> {
        let row = sqlx::query_as::<_, CvRecordRow>(&self.queries.select_by_email)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, update: &CvUpdate) -> Result<Option<CvRecordRow>, AppError> {
        let row = sqlx::query_as::<_, CvRecordRow>(&self.queries.update)
            .bind(update.name.as_deref())
            .bind(update.email.as_deref())
            .bind(update.phone.as_deref())
            .bind(update.linkedin.as_deref())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_target_configured_table() {
        let q = Queries::for_table("resumes");
        assert!(q.insert.contains("INSERT INTO resumes"));
        assert!(q.insert.contains("RETURNING id"));
        assert_eq!(q.select_one, "SELECT * FROM resumes WHERE id = $1");
        assert!(q.select_by_email.ends_with("ORDER BY id LIMIT 1"));
        assert!(q.update.contains("UPDATE resumes SET"));
    }

    #[test]
    fn test_update_query_binds_id_last() {
        let q = Queries::for_table("cv_details");
        assert!(q.update.contains("WHERE id = $5"));
        assert!(!q.update.contains("education"));
    }
}
