use actix_web::web;
use log::warn;

mod url;

pub use url::{
    create_handler, delete_handler, get_all_handler, index_handler, missing_hash_handler,
    redirect_handler, UrlServiceData,
};

use crate::errors::AppError;

/// JSON extractor settings: 32 KiB bodies, extractor failures reported as
/// validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(32 * 1024)
        .error_handler(|err, _req| {
            warn!("Rejected JSON body: {}", err);
            AppError::Validation(format!("Invalid JSON body: {}", err)).into()
        })
}
