//! Node configuration with precedence and validation
//!
//! Values come from defaults, then `PEERCACHE_*` environment variables, then
//! command line overrides, each layer replacing what the one before set.
use peercache_core::{
    Error, Result, DEFAULT_BASE_PATH, DEFAULT_CACHE_BYTES, DEFAULT_PEER_TIMEOUT_MS,
    DEFAULT_REPLICAS, PEERCACHE_BASE_PATH_VAR, PEERCACHE_CACHE_BYTES_VAR,
    PEERCACHE_PEER_TIMEOUT_VAR, PEERCACHE_REPLICAS_VAR,
};
use std::str::FromStr;
use std::time::Duration;

/// Settings shared by a node's groups and its HTTP pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerCacheConfig {
    /// Default byte budget for a group's local cache
    pub cache_bytes: u64,
    /// Virtual nodes per peer on the hash ring
    pub replicas: usize,
    /// URL path prefix the pool serves and requests under
    pub base_path: String,
    /// Per-request timeout when fetching from a peer
    pub peer_timeout: Duration,
    /// Where the configuration was last changed
    pub source: ConfigSource,
}

impl Default for PeerCacheConfig {
    fn default() -> Self {
        Self {
            cache_bytes: DEFAULT_CACHE_BYTES,
            replicas: DEFAULT_REPLICAS,
            base_path: DEFAULT_BASE_PATH.to_string(),
            peer_timeout: Duration::from_millis(DEFAULT_PEER_TIMEOUT_MS),
            source: ConfigSource::Default,
        }
    }
}

/// Source of configuration for debugging and precedence tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Default,
    /// Environment variables, listing which were set
    EnvironmentVariable(Vec<String>),
    CommandLine,
}

impl PeerCacheConfig {
    pub fn builder() -> PeerCacheConfigBuilder {
        PeerCacheConfigBuilder::new()
    }

    /// Check the invariants other components rely on
    pub fn validate(&self) -> Result<()> {
        if self.replicas == 0 {
            return Err(Error::configuration("replicas must be greater than zero"));
        }
        if !self.base_path.starts_with('/') || !self.base_path.ends_with('/') {
            return Err(Error::configuration(format!(
                "base path '{}' must start and end with '/'",
                self.base_path
            )));
        }
        if self.peer_timeout.is_zero() {
            return Err(Error::configuration("peer timeout must be greater than zero"));
        }
        Ok(())
    }
}

/// Builder for [`PeerCacheConfig`]
#[derive(Debug, Default)]
pub struct PeerCacheConfigBuilder {
    config: PeerCacheConfig,
}

impl PeerCacheConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration, e.g. one loaded from the environment
    pub fn from_config(config: PeerCacheConfig) -> Self {
        Self { config }
    }

    pub fn with_cache_bytes(mut self, cache_bytes: u64) -> Self {
        self.config.cache_bytes = cache_bytes;
        self
    }

    pub fn with_replicas(mut self, replicas: usize) -> Self {
        self.config.replicas = replicas;
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.config.base_path = base_path.into();
        self
    }

    pub fn with_peer_timeout(mut self, timeout: Duration) -> Self {
        self.config.peer_timeout = timeout;
        self
    }

    pub fn with_source(mut self, source: ConfigSource) -> Self {
        self.config.source = source;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<PeerCacheConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration loader that handles precedence
pub struct PeerCacheConfigLoader;

impl PeerCacheConfigLoader {
    /// Defaults overridden by the process environment
    pub fn load() -> Result<PeerCacheConfig> {
        Self::load_from(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    pub fn load_from<F>(lookup: F) -> Result<PeerCacheConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = PeerCacheConfig::default();
        let mut seen = Vec::new();

        if let Some(raw) = lookup(PEERCACHE_CACHE_BYTES_VAR) {
            config.cache_bytes = parse_var(PEERCACHE_CACHE_BYTES_VAR, &raw)?;
            seen.push(PEERCACHE_CACHE_BYTES_VAR.to_string());
        }

        if let Some(raw) = lookup(PEERCACHE_REPLICAS_VAR) {
            config.replicas = parse_var(PEERCACHE_REPLICAS_VAR, &raw)?;
            seen.push(PEERCACHE_REPLICAS_VAR.to_string());
        }

        if let Some(raw) = lookup(PEERCACHE_BASE_PATH_VAR) {
            config.base_path = raw;
            seen.push(PEERCACHE_BASE_PATH_VAR.to_string());
        }

        if let Some(raw) = lookup(PEERCACHE_PEER_TIMEOUT_VAR) {
            let millis: u64 = parse_var(PEERCACHE_PEER_TIMEOUT_VAR, &raw)?;
            config.peer_timeout = Duration::from_millis(millis);
            seen.push(PEERCACHE_PEER_TIMEOUT_VAR.to_string());
        }

        if !seen.is_empty() {
            tracing::debug!(vars = ?seen, "configuration overridden from environment");
            config.source = ConfigSource::EnvironmentVariable(seen);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply command line arguments (highest precedence)
    pub fn apply_cli_args(
        config: PeerCacheConfig,
        cache_bytes: Option<u64>,
        replicas: Option<usize>,
    ) -> Result<PeerCacheConfig> {
        if cache_bytes.is_none() && replicas.is_none() {
            return Ok(config);
        }

        let mut builder =
            PeerCacheConfigBuilder::from_config(config).with_source(ConfigSource::CommandLine);
        if let Some(cache_bytes) = cache_bytes {
            builder = builder.with_cache_bytes(cache_bytes);
        }
        if let Some(replicas) = replicas {
            builder = builder.with_replicas(replicas);
        }
        builder.build()
    }
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::configuration(format!("invalid value '{raw}' for {name}: {e}")))
}
