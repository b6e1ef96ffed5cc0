use actix_cors::Cors;
use actix_web::http::{header, Method};

use crate::config::CorsConfig;

/// Cross-origin access for the single configured frontend origin, limited to
/// the methods and headers the API uses.
pub fn build_cors(config: &CorsConfig) -> Cors {
    Cors::default()
        .allowed_origin(&config.allowed_origin)
        .allowed_methods(vec![Method::GET, Method::POST, Method::DELETE])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(config.max_age_seconds)
}
