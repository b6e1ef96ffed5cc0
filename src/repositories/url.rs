// Data access for the `urls` table
use async_trait::async_trait;
use log::{debug, error};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::models::{NewUrlRecord, UrlRecord};

type Result<T> = std::result::Result<T, RepositoryError>;

const RECORD_COLUMNS: &str = "id, url_original, hash, url_short, created_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepositoryTrait: Send + Sync {
    /// Inserts a new mapping and returns the stored row
    ///
    /// ### Errors
    /// * `RepositoryError::Conflict` - The hash (or id) is already taken
    /// * `RepositoryError::InvalidData` - The row violates a column constraint
    /// * `RepositoryError::Database` - Any other database failure
    async fn create(&self, record: &NewUrlRecord) -> Result<UrlRecord>;

    /// Looks a mapping up by its short alias
    ///
    /// ### Returns
    /// * `Result<Option<UrlRecord>>` - The mapping if found, or `None`
    async fn find_by_hash(&self, hash: &str) -> Result<Option<UrlRecord>>;

    /// Looks a mapping up by its primary key
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UrlRecord>>;

    /// Returns every mapping, oldest first
    async fn find_all(&self) -> Result<Vec<UrlRecord>>;

    /// Deletes a mapping by its primary key
    ///
    /// ### Returns
    /// * `Result<Option<UrlRecord>>` - The deleted row, or `None` if nothing matched
    async fn delete_by_id(&self, id: &Uuid) -> Result<Option<UrlRecord>>;
}

pub struct UrlRepository {
    pool: PgPool,
}

impl UrlRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepositoryTrait for UrlRepository {
    async fn create(&self, record: &NewUrlRecord) -> Result<UrlRecord> {
        let query = format!(
            "INSERT INTO urls (id, url_original, hash, url_short) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            RECORD_COLUMNS
        );

        sqlx::query_as::<_, UrlRecord>(&query)
            .bind(record.id)
            .bind(&record.url_original)
            .bind(&record.hash)
            .bind(&record.url_short)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                let err = RepositoryError::from(e);
                if !err.is_conflict() {
                    error!("Failed to insert URL with hash '{}': {}", record.hash, err);
                }
                err
            })
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<UrlRecord>> {
        let query = format!("SELECT {} FROM urls WHERE hash = $1", RECORD_COLUMNS);

        let record = sqlx::query_as::<_, UrlRecord>(&query)
            .bind(hash)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UrlRecord>> {
        let query = format!("SELECT {} FROM urls WHERE id = $1", RECORD_COLUMNS);

        let record = sqlx::query_as::<_, UrlRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<UrlRecord>> {
        let query = format!(
            "SELECT {} FROM urls ORDER BY created_at ASC, id ASC",
            RECORD_COLUMNS
        );

        let records = sqlx::query_as::<_, UrlRecord>(&query)
            .fetch_all(&self.pool)
            .await?;

        debug!("Fetched {} URL records", records.len());
        Ok(records)
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<Option<UrlRecord>> {
        let query = format!("DELETE FROM urls WHERE id = $1 RETURNING {}", RECORD_COLUMNS);

        let deleted = sqlx::query_as::<_, UrlRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        debug!("Delete of URL {} matched: {}", id, deleted.is_some());
        Ok(deleted)
    }
}
