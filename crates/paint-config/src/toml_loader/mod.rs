//! TOML config file loading.
//!
//! Relative manifest paths in `[catalog]` are resolved against the config
//! file's directory so a config can live next to its bundles.


use std::path::Path;

use paint_common::ConfigError;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use crate::schema::KitConfig;
use crate::validation;

/// Load config from a TOML file.
///
/// Missing fields take serde defaults. Validation problems are logged
/// here; [`crate::load_config`] turns them into an error.
pub fn load_from_path(path: &Path) -> Result<KitConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let config = parse_config(&content, base_dir)?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Parse config text, resolving catalog paths against `base_dir`.
pub fn parse_config(content: &str, base_dir: &Path) -> Result<KitConfig, ConfigError> {
    let mut config: KitConfig = toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    for entry in config.catalog.values_mut() {
        resolve_entry_paths(entry, base_dir);
    }
    Ok(config)
}

fn resolve_entry_paths(entry: &mut Value, base_dir: &Path) {
    let spec = match entry {
        Value::Array(items) => items.first_mut(),
        Value::Object(map) => map.get_mut("src"),
        other => Some(other),
    };
    if let Some(Value::String(s)) = spec {
        *s = resolve_specifier(s, base_dir);
    }
}

/// Absolute paths and URLs pass through; anything else joins `base_dir`.
fn resolve_specifier(spec: &str, base_dir: &Path) -> String {
    let trimmed = spec.trim();
    if trimmed.is_empty() || Path::new(trimmed).is_absolute() {
        return spec.to_string();
    }
    // A one-letter "scheme" is a Windows drive letter, not a URL.
    if matches!(Url::parse(trimmed), Ok(u) if u.scheme().len() > 1) {
        return spec.to_string();
    }
    base_dir.join(trimmed).to_string_lossy().into_owned()
}
