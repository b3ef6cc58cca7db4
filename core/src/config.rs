//! Defaults and validated configuration for a [`MovieIndex`](crate::MovieIndex).

use crate::error::IndexError;
use serde::{Deserialize, Serialize};

/// Number of buckets a fresh table starts with.
pub const DEFAULT_TABLE_SIZE: usize = 20;

/// Rehash once `word_count / size` exceeds this ratio.
pub const DEFAULT_LOAD_FACTOR_THRESHOLD: f64 = 2.0;

/// Number of movies returned by a proximity query.
pub const DEFAULT_TOP_K: usize = 10;

/// Upper bound on `k` accepted from callers outside the library.
pub const MAX_TOP_K: usize = 100;

/// Characters stripped from the end of description words.
pub const TRAILING_PUNCTUATION: [char; 6] = ['.', ',', '?', ':', ';', '!'];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    pub table_size: usize,
    pub load_factor_threshold: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { table_size: DEFAULT_TABLE_SIZE, load_factor_threshold: DEFAULT_LOAD_FACTOR_THRESHOLD }
    }
}

impl IndexConfig {
    pub fn new(table_size: usize, load_factor_threshold: f64) -> Self {
        Self { table_size, load_factor_threshold }
    }

    /// Rejects settings the table cannot run with: zero buckets, a threshold that is not finite,
    /// or a threshold below `1 / table_size` (a single doubling could not satisfy it).
    pub fn validate(&self) -> Result<(), IndexError> {
        if self.table_size == 0 {
            return Err(IndexError::InvalidConfig("table size must be at least 1".into()));
        }
        if !self.load_factor_threshold.is_finite() || self.load_factor_threshold <= 0.0 {
            return Err(IndexError::InvalidConfig(format!(
                "load factor threshold must be a positive number, got {}",
                self.load_factor_threshold
            )));
        }
        let min_threshold = 1.0 / self.table_size as f64;
        if self.load_factor_threshold < min_threshold {
            return Err(IndexError::InvalidConfig(format!(
                "load factor threshold {} is below 1/table_size ({min_threshold})",
                self.load_factor_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(IndexConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_buckets_and_bad_thresholds() {
        assert!(IndexConfig::new(0, 1.0).validate().is_err());
        assert!(IndexConfig::new(8, 0.0).validate().is_err());
        assert!(IndexConfig::new(8, -0.5).validate().is_err());
        assert!(IndexConfig::new(8, f64::NAN).validate().is_err());
        assert!(IndexConfig::new(8, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn threshold_must_cover_one_word_per_table() {
        assert!(IndexConfig::new(1, 1e-30).validate().is_err());
        assert!(IndexConfig::new(4, 0.2).validate().is_err());
        assert!(IndexConfig::new(4, 0.25).validate().is_ok());
        assert!(IndexConfig::new(1, 1.0).validate().is_ok());
    }

    #[test]
    fn deserializes_from_json() {
        let cfg: IndexConfig = serde_json::from_str(r#"{"table_size": 7, "load_factor_threshold": 1.5}"#).unwrap();
        assert_eq!(cfg, IndexConfig::new(7, 1.5));
    }
}
