// In-process store used by the HTTP tests
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::UrlRepositoryTrait;
use crate::errors::RepositoryError;
use crate::models::{NewUrlRecord, UrlRecord};

type Result<T> = std::result::Result<T, RepositoryError>;

/// Keeps rows in insertion order and rejects duplicate hashes the same way
/// the `urls_hash_key` constraint does.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    records: RwLock<Vec<UrlRecord>>,
    unavailable: AtomicBool,
}

impl InMemoryUrlRepository {
    /// Makes every subsequent call fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UrlRepositoryTrait for InMemoryUrlRepository {
    async fn create(&self, record: &NewUrlRecord) -> Result<UrlRecord> {
        self.check_available()?;
        let mut records = self.records.write().await;

        if records
            .iter()
            .any(|r| r.hash == record.hash || r.id == record.id)
        {
            return Err(RepositoryError::Conflict(
                "Unique constraint 'urls_hash_key' violated".to_string(),
            ));
        }

        let stored = UrlRecord {
            id: record.id,
            url_original: record.url_original.clone(),
            hash: record.hash.clone(),
            url_short: record.url_short.clone(),
            created_at: Utc::now(),
        };
        records.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<UrlRecord>> {
        self.check_available()?;
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.hash == hash).cloned())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UrlRecord>> {
        self.check_available()?;
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == *id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<UrlRecord>> {
        self.check_available()?;
        Ok(self.records.read().await.clone())
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<Option<UrlRecord>> {
        self.check_available()?;
        let mut records = self.records.write().await;
        let position = records.iter().position(|r| r.id == *id);
        Ok(position.map(|index| records.remove(index)))
    }
}
