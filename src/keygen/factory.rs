use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::KeyGenerator;
use crate::errors::{Result, ShortkeyError};
use crate::store::KeyValueStore;
use crate::utils::url_validator::validate_request_uri;

/// Default cap on generate/check rounds per call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryOptions {
    /// 最大尝试次数，0 表示不限制
    pub max_attempts: u32,
    pub block_dangerous_schemes: bool,
}

impl Default for FactoryOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            block_dangerous_schemes: true,
        }
    }
}

/// Produces short keys that are not present in the store.
///
/// The factory only reads from the store in [`generate`](Self::generate).
/// [`generate_and_store`](Self::generate_and_store) reserves the key and writes
/// the mapping in the same transaction.
pub struct KeyFactory<S: KeyValueStore> {
    store: Arc<S>,
    generator: Box<dyn KeyGenerator>,
    options: FactoryOptions,
}

impl<S: KeyValueStore> KeyFactory<S> {
    pub fn new(generator: impl KeyGenerator + 'static, store: Arc<S>) -> Self {
        Self::with_options(generator, store, FactoryOptions::default())
    }

    pub fn with_options(
        generator: impl KeyGenerator + 'static,
        store: Arc<S>,
        options: FactoryOptions,
    ) -> Self {
        Self {
            store,
            generator: Box::new(generator),
            options,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn options(&self) -> FactoryOptions {
        self.options
    }

    /// 返回一个当前不在存储中的短码
    ///
    /// Check and the caller's later `set` are not atomic: two callers that draw
    /// the same candidate concurrently can both accept it.
    pub fn generate(&self, url: &str) -> Result<String> {
        self.validate(url)?;
        self.next_free_key(|candidate| Ok(self.store.get(candidate)?.is_none()))
    }

    /// Generate a key and persist `key -> url` atomically.
    ///
    /// Retries only when the reservation itself finds the key taken.
    pub fn generate_and_store(&self, url: &str) -> Result<String> {
        self.validate(url)?;
        self.next_free_key(|candidate| self.store.insert_if_absent(candidate, url))
    }

    fn validate(&self, url: &str) -> Result<()> {
        validate_request_uri(url, self.options.block_dangerous_schemes)
            .map_err(|e| ShortkeyError::validation(e.to_string()))
    }

    fn next_free_key<F>(&self, mut accept: F) -> Result<String>
    where
        F: FnMut(&str) -> Result<bool>,
    {
        let max_attempts = self.options.max_attempts;
        let mut attempts: u32 = 0;

        loop {
            if max_attempts != 0 && attempts >= max_attempts {
                warn!("Key generator exhausted after {} attempts", attempts);
                return Err(ShortkeyError::generator_exhausted(attempts));
            }
            attempts = attempts.saturating_add(1);

            let candidate = self.generator.generate();
            if candidate.is_empty() {
                warn!("Key generator produced an empty key, retrying");
                continue;
            }

            if accept(&candidate)? {
                debug!("Accepted key '{}' after {} attempt(s)", candidate, attempts);
                return Ok(candidate);
            }
            trace!("Key collision on '{}'", candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::UrlStore;

    #[test]
    fn test_default_options() {
        let options = FactoryOptions::default();
        assert_eq!(options.max_attempts, 32);
        assert!(options.block_dangerous_schemes);
    }

    #[test]
    fn test_empty_candidates_count_as_attempts() {
        let store = Arc::new(UrlStore::in_memory().unwrap());
        let factory = KeyFactory::with_options(
            String::new,
            store,
            FactoryOptions {
                max_attempts: 4,
                ..FactoryOptions::default()
            },
        );

        let err = factory.generate("https://example.com").unwrap_err();
        assert!(matches!(err, ShortkeyError::GeneratorExhausted(_)));
    }

    #[test]
    fn test_dangerous_scheme_toggle() {
        let store = Arc::new(UrlStore::in_memory().unwrap());
        let strict = KeyFactory::new(|| "k1".to_string(), store.clone());
        assert!(strict.generate("javascript:alert(1)").is_err());

        let lenient = KeyFactory::with_options(
            || "k1".to_string(),
            store,
            FactoryOptions {
                block_dangerous_schemes: false,
                ..FactoryOptions::default()
            },
        );
        assert_eq!(lenient.generate("javascript:alert(1)").unwrap(), "k1");
    }
}
