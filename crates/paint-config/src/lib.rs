//! Paint configuration.
//!
//! A TOML file describing the bundle catalog, default preferences, the CSS
//! proxy, middleware routing and the demo server. Every section has serde
//! defaults so partial files work.
//!
//! ```toml
//! cookie_name = "ui"
//!
//! [defaults]
//! stack = ["base", "ocean"]
//! theme = "light"
//! layout = "app"
//!
//! [catalog]
//! base = "bundles/base/bundle.json"
//! ocean = { src = "bundles/ocean/bundle.yaml", label = "Ocean" }
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{DefaultsConfig, KitConfig, MiddlewareConfig, ProxyConfig, ServerConfig};
pub use toml_loader::{load_from_path, parse_config};

use std::path::Path;

use paint_common::ConfigError;

/// Load and validate a config file. Any validation problem is fatal.
pub fn load_config(path: &Path) -> Result<KitConfig, ConfigError> {
    let config = load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to pretty JSON, for `--print-config` style output.
pub fn config_to_json(config: &KitConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
