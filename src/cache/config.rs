//! Configuration for the cache module.

use serde::{Deserialize, Serialize};

use super::error::{CacheError, Result};

const DEFAULT_CAPACITY: usize = 1000;

/// Configuration for the LRU cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache
    pub capacity: usize,

    /// Whether to track cache metrics
    #[serde(default = "default_track_metrics")]
    pub track_metrics: bool,
}

fn default_track_metrics() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            track_metrics: true,
        }
    }
}

impl CacheConfig {
    /// Creates a new cache configuration with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Sets whether to track metrics
    pub fn track_metrics(mut self, track: bool) -> Self {
        self.track_metrics = track;
        self
    }

    /// Rejects configurations that could never hold an entry
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }

    /// Loads configuration from environment variables
    ///
    /// `CACHE_SIZE` sets the capacity and `CACHE_TRACK_METRICS` toggles
    /// metrics. Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let capacity = match lookup("CACHE_SIZE") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                CacheError::InvalidConfig(format!("CACHE_SIZE={raw}: {e}"))
            })?,
            None => DEFAULT_CAPACITY,
        };

        let track_metrics = match lookup("CACHE_TRACK_METRICS") {
            Some(raw) => match raw.trim() {
                "true" | "1" => true,
                "false" | "0" => false,
                other => {
                    return Err(CacheError::InvalidConfig(format!(
                        "CACHE_TRACK_METRICS={other}: expected true/false/1/0"
                    )))
                }
            },
            None => true,
        };

        let config = Self {
            capacity,
            track_metrics,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Cache metrics for monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheMetrics {
    /// Number of cache hits
    pub hits: u64,

    /// Number of cache misses
    pub misses: u64,

    /// Number of new keys inserted
    pub insertions: u64,

    /// Number of in-place value replacements
    pub updates: u64,

    /// Number of evictions due to capacity
    pub evictions: u64,

    /// Number of explicit removals
    pub removals: u64,

    /// Current number of entries
    pub size: usize,
}

impl CacheMetrics {
    /// Calculates hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Returns total requests (hits + misses)
    pub fn total_requests(&self) -> u64 {
        self.hits + self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, 1000);
        assert!(config.track_metrics);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = CacheConfig::with_capacity(500).track_metrics(false);

        assert_eq!(config.capacity, 500);
        assert!(!config.track_metrics);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = CacheConfig::with_capacity(0);
        assert_eq!(config.validate(), Err(CacheError::InvalidCapacity(0)));
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = CacheConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_from_lookup_values() {
        let config =
            CacheConfig::from_lookup(env(&[("CACHE_SIZE", " 64 "), ("CACHE_TRACK_METRICS", "0")]))
                .unwrap();
        assert_eq!(config.capacity, 64);
        assert!(!config.track_metrics);
    }

    #[test]
    fn test_from_lookup_invalid() {
        let err = CacheConfig::from_lookup(env(&[("CACHE_SIZE", "-3")])).unwrap_err();
        assert!(matches!(err, CacheError::InvalidConfig(_)));

        let err = CacheConfig::from_lookup(env(&[("CACHE_SIZE", "0")])).unwrap_err();
        assert_eq!(err, CacheError::InvalidCapacity(0));

        let err =
            CacheConfig::from_lookup(env(&[("CACHE_TRACK_METRICS", "maybe")])).unwrap_err();
        assert!(matches!(err, CacheError::InvalidConfig(_)));
    }

    #[test]
    fn test_metrics_hit_rate() {
        let mut metrics = CacheMetrics::default();
        assert_eq!(metrics.hit_rate(), 0.0);

        metrics.hits = 75;
        metrics.misses = 25;
        assert!((metrics.hit_rate() - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_metrics_total_requests() {
        let metrics = CacheMetrics {
            hits: 100,
            misses: 50,
            ..Default::default()
        };
        assert_eq!(metrics.total_requests(), 150);
    }
}
