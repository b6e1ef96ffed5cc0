mod url;

#[cfg(test)]
pub mod memory;

#[cfg(test)]
pub use url::MockUrlRepositoryTrait;
pub use url::{UrlRepository, UrlRepositoryTrait};
