/// Constants used throughout the peercache codebase
// Defaults
pub const DEFAULT_CACHE_BYTES: u64 = 64 << 20;
pub const DEFAULT_REPLICAS: usize = 50;
pub const DEFAULT_BASE_PATH: &str = "/_peercache/";
pub const DEFAULT_PEER_TIMEOUT_MS: u64 = 5_000;

// Environment variable names
pub const PEERCACHE_CACHE_BYTES_VAR: &str = "PEERCACHE_CACHE_BYTES";
pub const PEERCACHE_REPLICAS_VAR: &str = "PEERCACHE_REPLICAS";
pub const PEERCACHE_BASE_PATH_VAR: &str = "PEERCACHE_BASE_PATH";
pub const PEERCACHE_PEER_TIMEOUT_VAR: &str = "PEERCACHE_PEER_TIMEOUT_MS";

// Wire
pub const OCTET_STREAM: &str = "application/octet-stream";
