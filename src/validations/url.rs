use actix_web::http::header::HeaderValue;
use url::Url;
use validator::ValidationError;

/// Builds the `Location` value for a stored URL.
///
/// Values that are already valid header text are used as-is. Absolute URLs
/// with non-ASCII characters are sent in their percent-encoded form. Control
/// characters are never accepted, since URL parsing would silently drop them
/// and redirect somewhere else.
pub fn redirect_location(url: &str) -> Option<HeaderValue> {
    if url.chars().any(char::is_control) {
        return None;
    }

    HeaderValue::from_str(url).ok().or_else(|| {
        Url::parse(url)
            .ok()
            .and_then(|parsed| HeaderValue::from_str(parsed.as_str()).ok())
    })
}

/// Any non-blank string that can be redirected to is accepted as an original
/// URL. Shape checks are left to the browser that follows the redirect.
pub fn validate_original_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        let mut err = ValidationError::new("url_original_blank");
        err.message = Some("Missing original URL".into());
        return Err(err);
    }

    if redirect_location(url).is_none() {
        let mut err = ValidationError::new("url_original_not_redirectable");
        err.message = Some("Original URL cannot be used as a redirect target".into());
        return Err(err);
    }

    Ok(())
}

/// A hash path parameter must be present and non-blank.
pub fn validate_hash_param(hash: &str) -> Result<(), ValidationError> {
    if hash.trim().is_empty() {
        let mut err = ValidationError::new("hash_missing");
        err.message = Some("Hash parameter is missing".into());
        return Err(err);
    }

    Ok(())
}
