use std::sync::Arc;

mod url;

pub use url::{UrlService, UrlServiceTrait};

use crate::{db::Database, repositories::UrlRepository, utils::CodeGenerator};

/// Wires the production service: Postgres repository plus an OS-seeded
/// generator.
pub fn build(db: &Database, base_url: &str) -> Arc<dyn UrlServiceTrait> {
    let repository = UrlRepository::new(db.get_pool().clone());
    Arc::new(UrlService::new(
        Arc::new(repository),
        CodeGenerator::from_os_rng(),
        base_url,
    ))
}
