use actix_web::{
    http::header::{ContentType, LOCATION},
    web, HttpResponse, Responder,
};
use log::{debug, error, info};

use crate::{
    errors::AppError,
    models::{CreateUrlDto, UrlResponseDto},
    services::UrlServiceTrait,
    types::Result,
    validations::redirect_location,
};

pub type UrlServiceData = web::Data<dyn UrlServiceTrait>;

/// Liveness check
pub async fn index_handler() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("Server is running")
}

/// Create shortened URL route handler
pub async fn create_handler(
    dto: web::Json<CreateUrlDto>,
    service: UrlServiceData,
) -> Result<impl Responder> {
    let record = service.create(dto.into_inner()).await?;
    Ok(HttpResponse::Created().json(UrlResponseDto::from(record)))
}

/// Get all URLs route handler
pub async fn get_all_handler(service: UrlServiceData) -> Result<impl Responder> {
    let records = service.list().await?;
    let body: Vec<UrlResponseDto> = records.into_iter().map(UrlResponseDto::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Delete URL route handler
pub async fn delete_handler(
    id: web::Path<String>,
    service: UrlServiceData,
) -> Result<impl Responder> {
    service.delete(&id.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("URL deleted successfully"))
}

/// Redirect route handler, mounted on both `/url/get/{hash}` and `/{hash}`
pub async fn redirect_handler(
    path: web::Path<String>,
    service: UrlServiceData,
) -> Result<impl Responder> {
    let hash = path.into_inner();
    debug!("Redirect requested for hash: {}", hash);

    let record = service.resolve(&hash).await?;

    // Rows written before create-time checks may hold unusable values
    let location = redirect_location(&record.url_original).ok_or_else(|| {
        error!(
            "Stored URL for '{}' cannot be sent as a Location header: {:?}",
            hash, record.url_original
        );
        AppError::Internal("Error retrieving URL".to_string())
    })?;

    info!("Redirecting '{}' to '{}'", hash, record.url_original);
    Ok(HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish())
}

/// `/url/get/` with an empty hash segment
pub async fn missing_hash_handler() -> Result<HttpResponse> {
    Err(AppError::Validation("Hash parameter is missing".to_string()))
}
