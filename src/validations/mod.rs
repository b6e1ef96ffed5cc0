mod url;

pub use url::{redirect_location, validate_hash_param, validate_original_url};
