//! CSS proxy options and their defaults.

pub const DEFAULT_BASE_PATH: &str = "/ui/css";
pub const DEFAULT_REMOTE_CACHE_SECONDS: u64 = 300;
pub const DEFAULT_REMOTE_MAX_ENTRIES: usize = 128;
pub const DEFAULT_REMOTE_MAX_BYTES: usize = 5_000_000;
pub const DEFAULT_REMOTE_MAX_RESOURCE_BYTES: usize = 1_000_000;
pub const DEFAULT_REMOTE_FETCH_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssProxyOptions {
    /// Path prefix the proxy serves under.
    pub base_path: String,
    /// Serve `file:` sources. Off unless explicitly enabled.
    pub allow_file_css: bool,
    /// TTL of cached remote responses, also sent as `max-age`.
    pub remote_cache_seconds: u64,
    pub remote_max_entries: usize,
    /// Total body bytes held by the remote cache.
    pub remote_max_bytes: usize,
    /// Largest single remote body accepted.
    pub remote_max_resource_bytes: usize,
    pub remote_fetch_timeout_ms: u64,
}

impl Default for CssProxyOptions {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            allow_file_css: false,
            remote_cache_seconds: DEFAULT_REMOTE_CACHE_SECONDS,
            remote_max_entries: DEFAULT_REMOTE_MAX_ENTRIES,
            remote_max_bytes: DEFAULT_REMOTE_MAX_BYTES,
            remote_max_resource_bytes: DEFAULT_REMOTE_MAX_RESOURCE_BYTES,
            remote_fetch_timeout_ms: DEFAULT_REMOTE_FETCH_TIMEOUT_MS,
        }
    }
}

/// Trim, default to `/ui/css`, force a leading `/`, drop trailing `/`.
pub fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim();
    let p = if trimmed.is_empty() {
        DEFAULT_BASE_PATH
    } else {
        trimmed
    };

    let mut out = if p.starts_with('/') {
        p.to_string()
    } else {
        format!("/{p}")
    };
    while out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}
