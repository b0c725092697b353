use std::sync::Arc;

use actix_web::web;

mod url;

pub use url::UrlService;

use crate::{config::AppConfig, repositories::UrlRepositoryTrait, utils::AliasGenerator};

/// Builds the shared URL service state.
///
/// Constructed once, before the server starts, so the alias generator is
/// seeded a single time for the process and shared by every worker.
pub fn build(repository: Arc<dyn UrlRepositoryTrait>, config: &AppConfig) -> web::Data<UrlService> {
    web::Data::new(UrlService::new(
        repository,
        AliasGenerator::new(),
        config.alias_length,
    ))
}
