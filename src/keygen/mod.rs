//! Short key generation
//!
//! The generator is an injected capability. [`KeyFactory`] owns the
//! validation and collision-retry logic and never cares how candidates are made.

mod factory;

pub use factory::{FactoryOptions, KeyFactory};

use uuid::Uuid;
use xxhash_rust::xxh64::xxh64;

use crate::utils::{encode_base62, generate_random_code};

/// Default short key length.
pub const DEFAULT_KEY_LENGTH: usize = 7;

/// 候选短码生成器
pub trait KeyGenerator: Send + Sync {
    fn generate(&self) -> String;
}

impl<F> KeyGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

/// 默认生成器：新 UUIDv4 → xxh64(seed) → 定长 base62
///
/// 与 URL 内容无关，只保证长度固定和碰撞概率低。
#[derive(Debug, Clone)]
pub struct HashIdGenerator {
    length: usize,
    seed: u64,
}

impl HashIdGenerator {
    pub fn new(length: usize) -> Self {
        Self::with_seed(length, rand::random())
    }

    pub fn with_seed(length: usize, seed: u64) -> Self {
        Self {
            length: length.max(1),
            seed,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for HashIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_LENGTH)
    }
}

impl KeyGenerator for HashIdGenerator {
    fn generate(&self) -> String {
        let id = Uuid::new_v4();
        encode_base62(xxh64(id.as_bytes(), self.seed), self.length)
    }
}

/// 随机字母数字短码
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }
}

impl KeyGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_random_code(self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_hash_id_generator_fixed_length() {
        let generator = HashIdGenerator::new(7);
        for _ in 0..100 {
            let key = generator.generate();
            assert_eq!(key.len(), 7);
            assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_hash_id_generator_low_collision() {
        let generator = HashIdGenerator::default();
        let keys: HashSet<String> = (0..10_000).map(|_| generator.generate()).collect();
        // 62^7 的空间内一万个 key 碰撞概率可以忽略
        assert!(keys.len() >= 9_999);
    }

    #[test]
    fn test_zero_length_is_clamped() {
        assert_eq!(HashIdGenerator::new(0).length(), 1);
        assert_eq!(RandomCodeGenerator::new(0).generate().len(), 1);
    }

    #[test]
    fn test_random_code_generator() {
        let generator = RandomCodeGenerator::new(10);
        assert_eq!(generator.generate().len(), 10);
    }

    #[test]
    fn test_closure_is_a_generator() {
        let generator = || "fixed".to_string();
        assert_eq!(KeyGenerator::generate(&generator), "fixed");
    }
}
