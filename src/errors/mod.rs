use std::io::Error as IoError;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub mod config;
pub mod repository;

pub use config::ConfigError;
pub use repository::RepositoryError;

use crate::db::DatabaseError;

#[derive(Debug, Error)]
pub enum AppError {
    // Request-level errors, rendered to the client
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found error: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),

    // Startup errors, these terminate the process
    #[error("Server error: {0}")]
    Server(#[from] IoError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Logger error: {0}")]
    Logger(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION ERROR",
            AppError::NotFound(_) => "NOT FOUND ERROR",
            AppError::Internal(_) => "INTERNAL ERROR",
            AppError::Server(_) => "SERVER ERROR",
            AppError::Config(_) => "CONFIGURATION ERROR",
            AppError::Logger(_) => "LOGGER ERROR",
            AppError::Database(_) => "DATABASE ERROR",
        }
    }

    /// The client-facing message, without the kind prefix.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Internal(msg)
            | AppError::Config(msg)
            | AppError::Logger(msg)
            | AppError::Database(msg) => msg.clone(),
            AppError::Server(e) => e.to_string(),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<DatabaseError> for AppError {
    fn from(e: DatabaseError) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Flatten field errors into a single string
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let reasons = errs
                    .iter()
                    .map(|e| e.message.clone().unwrap_or_else(|| "invalid".into()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}: {}", field, reasons)
            })
            .collect::<Vec<_>>()
            .join("; ");
        AppError::Validation(message)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_)
            | AppError::Server(_)
            | AppError::Config(_)
            | AppError::Logger(_)
            | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.message();
        let message = if message.is_empty() {
            "An error occurred".to_string()
        } else {
            message
        };

        let code = self.status_code().as_u16();
        HttpResponse::build(self.status_code()).json(json!({
            "type": self.kind(),
            "message": message,
            "status_code": code,
        }))
    }
}
