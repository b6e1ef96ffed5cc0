// Business logic for creating, resolving, listing and deleting URL mappings
use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info, warn};
use rand::{rngs::StdRng, RngCore};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{AppError, RepositoryError};
use crate::models::{CreateUrlDto, NewUrlRecord, UrlRecord};
use crate::repositories::UrlRepositoryTrait;
use crate::types::Result;
use crate::utils::CodeGenerator;
use crate::validations::validate_hash_param;

/// How many hashes `create` draws before giving up on collisions
pub const MAX_CODE_ATTEMPTS: usize = 5;

#[async_trait]
pub trait UrlServiceTrait: Send + Sync {
    async fn create(&self, dto: CreateUrlDto) -> Result<UrlRecord>;
    async fn resolve(&self, hash: &str) -> Result<UrlRecord>;
    async fn list(&self) -> Result<Vec<UrlRecord>>;
    async fn delete(&self, id: &str) -> Result<UrlRecord>;
}

pub struct UrlService<T: UrlRepositoryTrait, R = StdRng> {
    repository: Arc<T>,
    generator: CodeGenerator<R>,
    base_url: String,
}

impl<T: UrlRepositoryTrait, R: RngCore> UrlService<T, R> {
    pub fn new(repository: Arc<T>, generator: CodeGenerator<R>, base_url: &str) -> Self {
        Self {
            repository,
            generator,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Logs the store failure and hides its details behind `message`.
fn store_failure(context: &str, message: &str, err: RepositoryError) -> AppError {
    error!("{}: {}", context, err);
    AppError::Internal(message.to_string())
}

#[async_trait]
impl<T, R> UrlServiceTrait for UrlService<T, R>
where
    T: UrlRepositoryTrait,
    R: RngCore + Send,
{
    async fn create(&self, dto: CreateUrlDto) -> Result<UrlRecord> {
        dto.validate()?;
        let url_original = dto
            .url_original
            .ok_or_else(|| AppError::Validation("Missing original URL".to_string()))?;

        // The unique index on hash is the source of truth; a collision just
        // means another draw.
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let record = NewUrlRecord::new(
                url_original.as_str(),
                self.generator.generate(),
                &self.base_url,
            );

            match self.repository.create(&record).await {
                Ok(stored) => {
                    info!("Created short URL '{}' for '{}'", stored.hash, stored.url_original);
                    return Ok(stored);
                }
                Err(RepositoryError::Conflict(reason)) => {
                    warn!(
                        "Hash '{}' collided on attempt {}/{}: {}",
                        record.hash, attempt, MAX_CODE_ATTEMPTS, reason
                    );
                }
                Err(RepositoryError::InvalidData(reason)) => {
                    return Err(AppError::Validation(reason));
                }
                Err(err) => {
                    return Err(store_failure(
                        "Error creating short URL",
                        "Error creating short URL",
                        err,
                    ));
                }
            }
        }

        error!(
            "Gave up generating a unique hash after {} attempts",
            MAX_CODE_ATTEMPTS
        );
        Err(AppError::Internal("Error generating short URL".to_string()))
    }

    async fn resolve(&self, hash: &str) -> Result<UrlRecord> {
        validate_hash_param(hash)
            .map_err(|_| AppError::Validation("Hash parameter is missing".to_string()))?;

        match self.repository.find_by_hash(hash).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(AppError::NotFound("Short URL not found".to_string())),
            Err(err) => Err(store_failure(
                "Error fetching URL by hash",
                "Error fetching URL",
                err,
            )),
        }
    }

    async fn list(&self) -> Result<Vec<UrlRecord>> {
        self.repository
            .find_all()
            .await
            .map_err(|err| store_failure("Error fetching all URLs", "Error fetching URLs", err))
    }

    async fn delete(&self, id: &str) -> Result<UrlRecord> {
        let not_found = || AppError::NotFound(format!("URL with ID '{}' not found", id));

        // A malformed id can never match a row
        let uuid = Uuid::parse_str(id).map_err(|_| not_found())?;

        let exists = self
            .repository
            .find_by_id(&uuid)
            .await
            .map_err(|err| store_failure("Error looking up URL by id", "Error deleting URL", err))?;
        if exists.is_none() {
            return Err(not_found());
        }

        // Another request may have deleted it since the lookup
        match self.repository.delete_by_id(&uuid).await {
            Ok(Some(deleted)) => {
                info!("Deleted URL '{}' ({})", deleted.hash, deleted.id);
                Ok(deleted)
            }
            Ok(None) => Err(not_found()),
            Err(err) => Err(store_failure(
                &format!("Error deleting URL with ID '{}'", id),
                "Error deleting URL",
                err,
            )),
        }
    }
}
