//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work; missing
//! fields take the defaults below.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitConfig {
    /// Name of the preferences cookie.
    pub cookie_name: String,
    pub defaults: DefaultsConfig,
    pub proxy: ProxyConfig,
    pub middleware: MiddlewareConfig,
    /// Bundle id to entry: a manifest path, `[path, label]`, or
    /// `{ src, label }`. Shapes are checked when the kit is built.
    pub catalog: BTreeMap<String, serde_json::Value>,
    pub server: ServerConfig,
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            cookie_name: "ui".into(),
            defaults: DefaultsConfig::default(),
            proxy: ProxyConfig::default(),
            middleware: MiddlewareConfig::default(),
            catalog: BTreeMap::new(),
            server: ServerConfig::default(),
        }
    }
}

/// Preferences used when the cookie is missing or invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub stack: Vec<String>,
    pub theme: String,
    pub layout: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            stack: vec!["base".into()],
            theme: "light".into(),
            layout: "app".into(),
        }
    }
}

/// CSS proxy settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub base_path: String,
    /// Serve `file:` stylesheets. Intended for development.
    pub allow_file_css: bool,
    pub remote_cache_seconds: u64,
    pub remote_max_entries: usize,
    pub remote_max_bytes: usize,
    pub remote_max_resource_bytes: usize,
    pub remote_fetch_timeout_ms: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_path: "/ui/css".into(),
            allow_file_css: false,
            remote_cache_seconds: 300,
            remote_max_entries: 128,
            remote_max_bytes: 5_000_000,
            remote_max_resource_bytes: 1_000_000,
            remote_fetch_timeout_ms: 10_000,
        }
    }
}

/// Request routing for the middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiddlewareConfig {
    pub preferences_endpoint: String,
    /// Largest stack accepted by the preferences endpoint.
    pub max_stack: usize,
    /// Path prefixes that skip resolution entirely.
    pub skip_prefixes: Vec<String>,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            preferences_endpoint: "/api/ui-preferences".into(),
            max_stack: 20,
            skip_prefixes: vec![
                "/_static/".into(),
                "/favicon".into(),
                "/robots.txt".into(),
                "/.well-known/".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
        }
    }
}
