use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validations::validate_original_url;

/// Request body of `POST /url/create`
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct CreateUrlDto {
    #[serde(default)]
    #[validate(
        required(message = "Missing original URL"),
        custom(function = "validate_original_url")
    )]
    pub url_original: Option<String>,
}

/// A stored URL mapping
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct UrlRecord {
    pub id: Uuid,

    /// The long URL visitors are redirected to
    pub url_original: String,

    /// Short alias; unique per table
    pub hash: String,

    /// `<base_url>/<hash>`, fixed at creation
    pub url_short: String,

    pub created_at: DateTime<Utc>,
}

/// Everything the store needs to insert a row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUrlRecord {
    pub id: Uuid,
    pub url_original: String,
    pub hash: String,
    pub url_short: String,
}

impl NewUrlRecord {
    pub fn new(url_original: impl Into<String>, hash: impl Into<String>, base_url: &str) -> Self {
        let hash = hash.into();
        Self {
            id: Uuid::new_v4(),
            url_original: url_original.into(),
            url_short: short_url(base_url, &hash),
            hash,
        }
    }
}

/// Joins the base URL and a hash with exactly one slash.
pub fn short_url(base_url: &str, hash: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), hash)
}

/// Public JSON shape of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlResponseDto {
    pub id: Uuid,
    pub url_original: String,
    pub hash: String,
    pub url_short: String,
}

impl From<UrlRecord> for UrlResponseDto {
    fn from(record: UrlRecord) -> Self {
        UrlResponseDto {
            id: record.id,
            url_original: record.url_original,
            hash: record.hash,
            url_short: record.url_short,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_url_joins_with_single_slash() {
        assert_eq!(short_url("https://sho.rt", "aB3xQ9"), "https://sho.rt/aB3xQ9");
        assert_eq!(short_url("https://sho.rt/", "aB3xQ9"), "https://sho.rt/aB3xQ9");
    }

    #[test]
    fn new_record_derives_short_url() {
        let record = NewUrlRecord::new("https://example.com", "aB3xQ9", "https://sho.rt");
        assert_eq!(record.url_short, "https://sho.rt/aB3xQ9");
        assert_eq!(record.hash, "aB3xQ9");
        assert_eq!(record.url_original, "https://example.com");
    }

    #[test]
    fn missing_url_original_fails_validation() {
        let dto: CreateUrlDto = serde_json::from_str("{}").unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn blank_url_original_fails_validation() {
        let dto = CreateUrlDto {
            url_original: Some("   ".to_string()),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn any_non_blank_url_original_is_accepted() {
        let dto = CreateUrlDto {
            url_original: Some("https://example.com/some/long/path?q=1".to_string()),
        };
        assert!(dto.validate().is_ok());
    }
}
