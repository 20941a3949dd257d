//! URL shortening and resolution service.

use std::sync::Arc;

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::generator::PathGenerator;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::url_validator::{UrlValidationError, normalize_and_validate};

/// Probes per generation tier before moving on.
const MAX_GENERATE_ATTEMPTS: usize = 10;

/// Inserts attempted with freshly probed paths before reporting exhaustion.
const MAX_INSERT_ATTEMPTS: usize = 3;

/// Service for creating and resolving shortened URLs.
///
/// Handles normalization, idempotent lookup by URL, unique path generation
/// with collision retry, and persistence. The store's unique indexes are
/// the final arbiter for both uniqueness invariants; the service holds no
/// locks and spans no transactions across the lookup-then-insert sequence.
pub struct ShortenerService {
    repository: Arc<dyn MappingRepository>,
    generator: Arc<dyn PathGenerator>,
}

impl ShortenerService {
    pub fn new(repository: Arc<dyn MappingRepository>, generator: Arc<dyn PathGenerator>) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Shortens a URL, returning the stored mapping.
    ///
    /// Shortening is idempotent per normalized URL: a repeated request
    /// returns the existing mapping with its original `shortened_url`, even
    /// when `base_url` differs from the one observed at creation time.
    ///
    /// # Errors
    ///
    /// - [`AppError::EmptyUrl`] for empty or blank input
    /// - [`AppError::InvalidUrl`] when the normalized URL fails validation
    /// - [`AppError::Store`] when persistence fails or no unique short path
    ///   could be allocated
    pub async fn shorten_url(&self, raw_url: &str, base_url: &str) -> Result<UrlMapping, AppError> {
        let original_url = normalize_and_validate(raw_url).map_err(|e| match e {
            UrlValidationError::Empty => AppError::EmptyUrl,
            UrlValidationError::Invalid => AppError::InvalidUrl,
        })?;

        if let Some(existing) = self.repository.find_by_url(&original_url).await? {
            return Ok(existing);
        }

        for _ in 0..MAX_INSERT_ATTEMPTS {
            let short_path = self.generate_unique_short_path().await?;
            let new_mapping = NewMapping {
                original_url: original_url.clone(),
                shortened_url: build_shortened_url(base_url, &short_path),
                short_path,
            };

            match self.repository.insert(new_mapping).await {
                Ok(mapping) => {
                    tracing::info!(short_path = %mapping.short_path, "created mapping");
                    return Ok(mapping);
                }
                // A concurrent request shortened the same URL between the
                // lookup and the insert; its mapping wins.
                Err(AppError::DuplicateUrl) => {
                    return self
                        .repository
                        .find_by_url(&original_url)
                        .await?
                        .ok_or_else(|| {
                            AppError::store("mapping missing after duplicate-url conflict")
                        });
                }
                // The probed path was taken in the meantime; draw again.
                Err(AppError::DuplicatePath) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::store("could not allocate a unique short path"))
    }

    /// Resolves a short path to its original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no mapping uses the path.
    pub async fn resolve(&self, short_path: &str) -> Result<String, AppError> {
        self.repository
            .find_by_path(short_path)
            .await?
            .map(|mapping| mapping.original_url)
            .ok_or(AppError::NotFound)
    }

    /// Probes generated candidates against the store until a free one is
    /// found.
    ///
    /// The search is bounded: after [`MAX_GENERATE_ATTEMPTS`] collisions it
    /// escapes to the generator's wider fallback space, and a second round
    /// of collisions there surfaces as [`AppError::Store`].
    async fn generate_unique_short_path(&self) -> Result<String, AppError> {
        for _ in 0..MAX_GENERATE_ATTEMPTS {
            let candidate = self.generator.generate();
            if self.repository.find_by_path(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }

        tracing::warn!("short path space congested, drawing from fallback candidates");

        for _ in 0..MAX_GENERATE_ATTEMPTS {
            let candidate = self.generator.generate_fallback();
            if self.repository.find_by_path(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }

        Err(AppError::store("short path space exhausted"))
    }
}

/// Joins a base URL and a short path with exactly one separator.
fn build_shortened_url(base_url: &str, short_path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), short_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generator::MockPathGenerator;
    use crate::domain::repositories::MockMappingRepository;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn mapping(id: i64, short_path: &str, original_url: &str, shortened_url: &str) -> UrlMapping {
        UrlMapping {
            id,
            original_url: original_url.to_string(),
            short_path: short_path.to_string(),
            shortened_url: shortened_url.to_string(),
            created_at: Utc::now(),
        }
    }

    fn service(
        repository: MockMappingRepository,
        generator: MockPathGenerator,
    ) -> ShortenerService {
        ShortenerService::new(Arc::new(repository), Arc::new(generator))
    }

    #[tokio::test]
    async fn test_shorten_creates_mapping() {
        let mut repository = MockMappingRepository::new();
        let mut generator = MockPathGenerator::new();

        repository
            .expect_find_by_url()
            .times(1)
            .returning(|_| Ok(None));

        generator
            .expect_generate()
            .times(1)
            .return_const("AbCd".to_string());

        repository
            .expect_find_by_path()
            .withf(|path| path == "AbCd")
            .times(1)
            .returning(|_| Ok(None));

        repository.expect_insert().times(1).returning(|new_mapping| {
            Ok(UrlMapping {
                id: 1,
                original_url: new_mapping.original_url,
                short_path: new_mapping.short_path,
                shortened_url: new_mapping.shortened_url,
                created_at: Utc::now(),
            })
        });

        let result = service(repository, generator)
            .shorten_url("https://example.com", "http://localhost:3000/")
            .await
            .unwrap();

        assert_eq!(result.original_url, "https://example.com");
        assert_eq!(result.short_path, "AbCd");
        assert_eq!(result.shortened_url, "http://localhost:3000/AbCd");
    }

    #[tokio::test]
    async fn test_shorten_is_idempotent_per_url() {
        let mut repository = MockMappingRepository::new();
        let mut generator = MockPathGenerator::new();

        let existing = mapping(5, "YyZz0", "https://example.com", "http://localhost/YyZz0");
        repository
            .expect_find_by_url()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        generator.expect_generate().times(0);
        repository.expect_insert().times(0);

        // A different base URL must not mint a new link.
        let result = service(repository, generator)
            .shorten_url("https://example.com", "https://other.example/")
            .await
            .unwrap();

        assert_eq!(result.id, 5);
        assert_eq!(result.shortened_url, "http://localhost/YyZz0");
    }

    #[tokio::test]
    async fn test_shorten_empty_url() {
        let repository = MockMappingRepository::new();
        let generator = MockPathGenerator::new();

        let err = service(repository, generator)
            .shorten_url("", "http://localhost/")
            .await
            .unwrap_err();

        assert_eq!(err, AppError::EmptyUrl);
        assert_eq!(err.to_string(), "Url to shorten cannot be empty");
    }

    #[tokio::test]
    async fn test_shorten_blank_url() {
        let repository = MockMappingRepository::new();
        let generator = MockPathGenerator::new();

        let err = service(repository, generator)
            .shorten_url("   ", "http://localhost/")
            .await
            .unwrap_err();

        assert_eq!(err, AppError::EmptyUrl);
    }

    #[tokio::test]
    async fn test_shorten_invalid_url() {
        let repository = MockMappingRepository::new();
        let generator = MockPathGenerator::new();

        let err = service(repository, generator)
            .shorten_url("not a url", "http://localhost/")
            .await
            .unwrap_err();

        assert_eq!(err, AppError::InvalidUrl);
        assert_eq!(err.to_string(), "This is not a valid Url");
    }

    #[tokio::test]
    async fn test_shorten_rejects_userinfo_shapes() {
        for input in [
            "https://bad@user:pw@host",
            "https://this-shouldn't.match@example.com",
        ] {
            let repository = MockMappingRepository::new();
            let generator = MockPathGenerator::new();

            let err = service(repository, generator)
                .shorten_url(input, "http://localhost/")
                .await
                .unwrap_err();

            assert_eq!(err, AppError::InvalidUrl, "input: {input}");
        }
    }

    #[tokio::test]
    async fn test_shorten_prepends_scheme() {
        let mut repository = MockMappingRepository::new();
        let mut generator = MockPathGenerator::new();

        repository
            .expect_find_by_url()
            .withf(|url| url == "http://www.bing.com")
            .times(1)
            .returning(|_| Ok(None));

        generator
            .expect_generate()
            .times(1)
            .return_const("Qq".to_string());

        repository
            .expect_find_by_path()
            .times(1)
            .returning(|_| Ok(None));

        repository.expect_insert().times(1).returning(|new_mapping| {
            assert_eq!(new_mapping.original_url, "http://www.bing.com");
            Ok(UrlMapping {
                id: 1,
                original_url: new_mapping.original_url,
                short_path: new_mapping.short_path,
                shortened_url: new_mapping.shortened_url,
                created_at: Utc::now(),
            })
        });

        let result = service(repository, generator)
            .shorten_url("www.bing.com", "http://localhost/")
            .await
            .unwrap();

        assert_eq!(result.original_url, "http://www.bing.com");
    }

    #[tokio::test]
    async fn test_shorten_does_not_double_prefix() {
        let mut repository = MockMappingRepository::new();
        let generator = MockPathGenerator::new();

        let existing = mapping(
            1,
            "Ab",
            "http://www.bing.com",
            "http://localhost/Ab",
        );
        repository
            .expect_find_by_url()
            .withf(|url| url == "http://www.bing.com")
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let result = service(repository, generator)
            .shorten_url("http://www.bing.com", "http://localhost/")
            .await
            .unwrap();

        assert_eq!(result.original_url, "http://www.bing.com");
    }

    #[tokio::test]
    async fn test_shorten_retries_on_collision() {
        let mut repository = MockMappingRepository::new();
        let mut generator = MockPathGenerator::new();

        let mut seq = mockall::Sequence::new();
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .return_const("AaBb".to_string());
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .return_const("CcDd".to_string());

        repository
            .expect_find_by_url()
            .times(1)
            .returning(|_| Ok(None));

        let taken = mapping(7, "AaBb", "https://taken.example", "http://localhost/AaBb");
        repository
            .expect_find_by_path()
            .withf(|path| path == "AaBb")
            .times(1)
            .returning(move |_| Ok(Some(taken.clone())));
        repository
            .expect_find_by_path()
            .withf(|path| path == "CcDd")
            .times(1)
            .returning(|_| Ok(None));

        repository.expect_insert().times(1).returning(|new_mapping| {
            Ok(UrlMapping {
                id: 2,
                original_url: new_mapping.original_url,
                short_path: new_mapping.short_path,
                shortened_url: new_mapping.shortened_url,
                created_at: Utc::now(),
            })
        });

        let result = service(repository, generator)
            .shorten_url("https://example.com", "http://localhost/")
            .await
            .unwrap();

        assert_eq!(result.short_path, "CcDd");
        assert_ne!(result.short_path, "AaBb");
    }

    #[tokio::test]
    async fn test_shorten_duplicate_url_race_returns_winner() {
        let mut repository = MockMappingRepository::new();
        let mut generator = MockPathGenerator::new();

        let calls = AtomicUsize::new(0);
        let winner = mapping(9, "Ww", "https://example.com", "http://elsewhere/Ww");
        repository
            .expect_find_by_url()
            .times(2)
            .returning(move |_| {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Ok(None)
                } else {
                    Ok(Some(winner.clone()))
                }
            });

        generator
            .expect_generate()
            .times(1)
            .return_const("AaBb".to_string());

        repository
            .expect_find_by_path()
            .times(1)
            .returning(|_| Ok(None));

        repository
            .expect_insert()
            .times(1)
            .returning(|_| Err(AppError::DuplicateUrl));

        let result = service(repository, generator)
            .shorten_url("https://example.com", "http://localhost/")
            .await
            .unwrap();

        assert_eq!(result.id, 9);
        assert_eq!(result.shortened_url, "http://elsewhere/Ww");
    }

    #[tokio::test]
    async fn test_shorten_fails_when_path_space_exhausted() {
        let mut repository = MockMappingRepository::new();
        let mut generator = MockPathGenerator::new();

        repository
            .expect_find_by_url()
            .times(1)
            .returning(|_| Ok(None));

        generator
            .expect_generate()
            .times(MAX_GENERATE_ATTEMPTS)
            .return_const("AaBb".to_string());
        generator
            .expect_generate_fallback()
            .times(MAX_GENERATE_ATTEMPTS)
            .return_const("AaBbCcDd".to_string());

        let taken = mapping(3, "AaBb", "https://taken.example", "http://localhost/AaBb");
        repository
            .expect_find_by_path()
            .times(MAX_GENERATE_ATTEMPTS * 2)
            .returning(move |_| Ok(Some(taken.clone())));

        repository.expect_insert().times(0);

        let err = service(repository, generator)
            .shorten_url("https://example.com", "http://localhost/")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Store(_)));
    }

    #[tokio::test]
    async fn test_resolve_returns_original_url() {
        let mut repository = MockMappingRepository::new();
        let generator = MockPathGenerator::new();

        let found = mapping(4, "YyZz0", "http://www.google.com", "http://localhost/YyZz0");
        repository
            .expect_find_by_path()
            .withf(|path| path == "YyZz0")
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));

        let result = service(repository, generator).resolve("YyZz0").await.unwrap();

        // The destination, never the shortened display URL.
        assert_eq!(result, "http://www.google.com");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut repository = MockMappingRepository::new();
        let generator = MockPathGenerator::new();

        repository
            .expect_find_by_path()
            .times(1)
            .returning(|_| Ok(None));

        let err = service(repository, generator)
            .resolve("nonexistent-path")
            .await
            .unwrap_err();

        assert_eq!(err, AppError::NotFound);
        assert_eq!(err.to_string(), "Url Not Found");
    }

    #[test]
    fn test_build_shortened_url_joins_with_single_slash() {
        assert_eq!(
            build_shortened_url("http://localhost/", "AbCd"),
            "http://localhost/AbCd"
        );
        assert_eq!(
            build_shortened_url("http://localhost", "AbCd"),
            "http://localhost/AbCd"
        );
    }
}
