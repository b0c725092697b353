// src/services/url.rs - Business logic
use std::sync::Arc;

use log::{debug, warn};
use validator::Validate;

use crate::errors::{RepositoryError, ServiceError};
use crate::models::{CreateUrlDto, UrlResponseDto};
use crate::repositories::UrlRepositoryTrait;
use crate::utils::AliasGenerator;

type Result<T> = std::result::Result<T, ServiceError>;

const MAX_GENERATION_ATTEMPTS: usize = 5;

pub struct UrlService {
    repository: Arc<dyn UrlRepositoryTrait>,
    generator: AliasGenerator,
    alias_length: usize,
}

impl UrlService {
    pub fn new(
        repository: Arc<dyn UrlRepositoryTrait>,
        generator: AliasGenerator,
        alias_length: usize,
    ) -> Self {
        Self {
            repository,
            generator,
            alias_length,
        }
    }

    /// Persists a new mapping, generating an alias when none was supplied.
    ///
    /// A caller-supplied alias is saved exactly once; a conflict is returned
    /// to the caller so it can pick a different alias.
    pub async fn create(&self, dto: CreateUrlDto) -> Result<UrlResponseDto> {
        if let Err(e) = dto.validate() {
            return Err(ServiceError::Validation(e.to_string()));
        }

        match dto.alias {
            Some(alias) if !alias.trim().is_empty() => {
                match self.repository.save(&dto.url, &alias).await {
                    Ok(id) => Ok(UrlResponseDto {
                        id,
                        alias,
                        url: dto.url,
                    }),
                    Err(RepositoryError::Conflict) => Err(ServiceError::Conflict(alias)),
                    Err(e) => Err(ServiceError::Repository(e)),
                }
            }
            _ => self.create_with_generated_alias(&dto.url).await,
        }
    }

    // Collisions are expected occasionally; regenerate and try again.
    async fn create_with_generated_alias(&self, url: &str) -> Result<UrlResponseDto> {
        for attempt in 0..MAX_GENERATION_ATTEMPTS {
            let alias = self.generator.generate(self.alias_length);

            match self.repository.save(url, &alias).await {
                Ok(id) => {
                    debug!("Generated alias '{}' on attempt {}", alias, attempt + 1);
                    return Ok(UrlResponseDto {
                        id,
                        alias,
                        url: url.to_string(),
                    });
                }
                Err(RepositoryError::Conflict) => {
                    warn!("Alias collision on attempt {}, regenerating", attempt + 1);
                }
                Err(e) => return Err(ServiceError::Repository(e)),
            }
        }

        Err(ServiceError::Internal(format!(
            "Failed to generate a unique alias after {} attempts",
            MAX_GENERATION_ATTEMPTS
        )))
    }

    /// Resolves an alias to its stored URL.
    pub async fn resolve(&self, alias: &str) -> Result<String> {
        match self.repository.get(alias).await {
            Ok(url) => Ok(url),
            Err(RepositoryError::NotFound) => Err(ServiceError::NotFound(alias.to_string())),
            Err(e) => Err(ServiceError::Repository(e)),
        }
    }

    /// Removes the mapping for an alias.
    pub async fn delete(&self, alias: &str) -> Result<()> {
        match self.repository.delete(alias).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(ServiceError::NotFound(alias.to_string())),
            Err(e) => Err(ServiceError::Repository(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockUrlRepositoryTrait;

    const ALIAS_LENGTH: usize = 6;

    fn service(repository: MockUrlRepositoryTrait) -> UrlService {
        UrlService::new(
            Arc::new(repository),
            AliasGenerator::with_seed(7),
            ALIAS_LENGTH,
        )
    }

    fn dto(url: &str, alias: Option<&str>) -> CreateUrlDto {
        CreateUrlDto {
            url: url.to_string(),
            alias: alias.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_with_custom_alias() {
        let mut repository = MockUrlRepositoryTrait::new();
        repository
            .expect_save()
            .withf(|url, alias| url == "https://example.com" && alias == "ex1")
            .times(1)
            .returning(|_, _| Ok(1));

        let created = service(repository)
            .create(dto("https://example.com", Some("ex1")))
            .await
            .expect("create should succeed");

        assert_eq!(created.id, 1);
        assert_eq!(created.alias, "ex1");
        assert_eq!(created.url, "https://example.com");
    }

    #[tokio::test]
    async fn test_create_with_taken_alias_is_conflict() {
        let mut repository = MockUrlRepositoryTrait::new();
        repository
            .expect_save()
            .times(1)
            .returning(|_, _| Err(RepositoryError::Conflict));

        let err = service(repository)
            .create(dto("https://example.org", Some("ex1")))
            .await
            .expect_err("create must fail");

        assert!(matches!(err, ServiceError::Conflict(alias) if alias == "ex1"));
    }

    #[tokio::test]
    async fn test_create_generates_alias_when_missing() {
        let mut repository = MockUrlRepositoryTrait::new();
        repository
            .expect_save()
            .withf(|_, alias| {
                alias.len() == ALIAS_LENGTH && alias.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .times(1)
            .returning(|_, _| Ok(1));

        let created = service(repository)
            .create(dto("https://example.com", None))
            .await
            .expect("create should succeed");

        assert_eq!(created.alias.len(), ALIAS_LENGTH);
    }

    #[tokio::test]
    async fn test_create_regenerates_on_collision() {
        let mut repository = MockUrlRepositoryTrait::new();
        let mut seq = mockall::Sequence::new();
        repository
            .expect_save()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(RepositoryError::Conflict));
        repository
            .expect_save()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(2));

        let created = service(repository)
            .create(dto("https://example.com", None))
            .await
            .expect("create should succeed after a retry");

        assert_eq!(created.id, 2);
    }

    #[tokio::test]
    async fn test_create_gives_up_after_max_attempts() {
        let mut repository = MockUrlRepositoryTrait::new();
        repository
            .expect_save()
            .times(5)
            .returning(|_, _| Err(RepositoryError::Conflict));

        let err = service(repository)
            .create(dto("https://example.com", None))
            .await
            .expect_err("create must fail");

        assert!(matches!(err, ServiceError::Internal(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_url() {
        // The repository must never be reached
        let repository = MockUrlRepositoryTrait::new();

        let err = service(repository)
            .create(dto("not-a-url", None))
            .await
            .expect_err("create must fail");

        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_resolve_maps_not_found() {
        let mut repository = MockUrlRepositoryTrait::new();
        repository
            .expect_get()
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        let err = service(repository)
            .resolve("missing")
            .await
            .expect_err("resolve must fail");

        assert!(matches!(err, ServiceError::NotFound(alias) if alias == "missing"));
    }

    #[tokio::test]
    async fn test_delete_maps_not_found() {
        let mut repository = MockUrlRepositoryTrait::new();
        repository
            .expect_delete()
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        let err = service(repository)
            .delete("missing")
            .await
            .expect_err("delete must fail");

        assert!(matches!(err, ServiceError::NotFound(alias) if alias == "missing"));
    }
}
