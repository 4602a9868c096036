//! Configuration for the HABITZ progression system.
//!
//! Maps directly to `habitz.toml`.

use serde::{Deserialize, Serialize};

/// Top-level HABITZ configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HabitzConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Award pipeline tuning.
    #[serde(default)]
    pub award: AwardConfig,
    /// Hosted backend settings.
    #[serde(default)]
    pub remote: RemoteConfig,
    /// Level-view cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl HabitzConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `CoreError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::CoreError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Whether XP awarding is enabled at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_level: "info".to_string(),
        }
    }
}

/// Award pipeline tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardConfig {
    /// XP granted for one habit completion before bonuses; also the fallback
    /// amount when remote resolution is unavailable.
    #[serde(default = "default_base_xp")]
    pub base_completion_xp: u64,
    /// Total attempts at remote XP resolution before falling back.
    #[serde(default = "default_3")]
    pub max_resolve_attempts: u32,
    /// Linear backoff unit between resolution attempts, in milliseconds.
    /// Retry n waits `n × retry_backoff_ms`.
    #[serde(default = "default_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Attempts at the conditional ledger write before reporting contention.
    #[serde(default = "default_3")]
    pub max_write_attempts: u32,
}

impl Default for AwardConfig {
    fn default() -> Self {
        Self {
            base_completion_xp: 15,
            max_resolve_attempts: 3,
            retry_backoff_ms: 200,
            max_write_attempts: 3,
        }
    }
}

/// Hosted backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the hosted backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key sent with every request. Empty means unauthenticated (local
    /// development stacks).
    #[serde(default)]
    pub api_key: String,
    /// Hard timeout for any single remote call in milliseconds.
    #[serde(default = "default_5000")]
    pub request_timeout_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key: String::new(),
            request_timeout_ms: 5000,
        }
    }
}

/// Level-view cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether the engine keeps a cached level view per user.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Maximum number of users held in the cache.
    #[serde(default = "default_1024")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 1024,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_base_url() -> String { "http://localhost:54321".to_string() }
fn default_3() -> u32 { 3 }
fn default_base_xp() -> u64 { 15 }
fn default_backoff_ms() -> u64 { 200 }
fn default_5000() -> u64 { 5000 }
fn default_1024() -> usize { 1024 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = HabitzConfig::from_toml("").expect("parse");
        assert!(config.general.enabled);
        assert_eq!(config.award.base_completion_xp, 15);
        assert_eq!(config.award.max_resolve_attempts, 3);
        assert_eq!(config.award.retry_backoff_ms, 200);
        assert_eq!(config.cache.capacity, 1024);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config = HabitzConfig::from_toml(
            r#"
            [award]
            base_completion_xp = 20

            [remote]
            base_url = "https://api.example.com"
            "#,
        )
        .expect("parse");
        assert_eq!(config.award.base_completion_xp, 20);
        assert_eq!(config.award.max_resolve_attempts, 3);
        assert_eq!(config.remote.base_url, "https://api.example.com");
        assert_eq!(config.remote.request_timeout_ms, 5000);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = HabitzConfig::from_toml("award = 3").expect_err("should fail");
        assert!(matches!(err, crate::CoreError::Config(_)));
    }
}
