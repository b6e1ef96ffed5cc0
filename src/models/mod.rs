mod url;

pub use url::{CreateUrlDto, NewUrlRecord, UrlRecord, UrlResponseDto};
