//! Bundle manifests on disk.
//!
//! A string specifier names a manifest file (JSON by default, YAML for
//! `.yaml`/`.yml`, TOML for `.toml`). Relative stylesheet urls inside the
//! manifest are resolved against the manifest's own location, so a bundle
//! can ship `./theme.light.css` next to its manifest.

use std::path::{Path, PathBuf};

use paint_common::ModuleValue;
use tracing::debug;
use url::Url;

/// Resolve `path` against `base` unless it is already an absolute URL.
pub fn css_url(base: &Url, path: &str) -> String {
    if Url::parse(path).is_ok() {
        return path.to_string();
    }
    base.join(path)
        .map(String::from)
        .unwrap_or_else(|_| path.to_string())
}

fn specifier_path(spec: &str) -> PathBuf {
    match Url::parse(spec) {
        Ok(u) if u.scheme() == "file" => u.to_file_path().unwrap_or_else(|_| PathBuf::from(spec)),
        _ => PathBuf::from(spec),
    }
}

fn parse_manifest(path: &Path, content: &str) -> Result<serde_json::Value, String> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "yaml" | "yml" => serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}")),
        "toml" => toml::from_str(content).map_err(|e| format!("invalid TOML: {e}")),
        _ => serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}")),
    }
}

/// Read and evaluate a manifest file into a module value.
pub async fn import_manifest(spec: &str) -> Result<ModuleValue, String> {
    let path = specifier_path(spec);
    let abs = tokio::fs::canonicalize(&path)
        .await
        .map_err(|e| format!("cannot resolve {}: {e}", path.display()))?;
    let content = tokio::fs::read_to_string(&abs)
        .await
        .map_err(|e| format!("cannot read {}: {e}", abs.display()))?;

    let json = parse_manifest(&abs, &content)?;
    let base = Url::from_file_path(&abs)
        .map_err(|_| format!("cannot build a file URL for {}", abs.display()))?;

    let mut module = ModuleValue::from(json);
    rewrite_css_urls(&mut module, &base);
    debug!(manifest = %abs.display(), "imported bundle manifest");
    Ok(module)
}

fn rewrite_css_urls(value: &mut ModuleValue, base: &Url) {
    let ModuleValue::Object(map) = value else {
        return;
    };

    if let Some(ModuleValue::Array(items)) = map.get_mut("globalCss") {
        rewrite_list(items, base);
    }
    if let Some(ModuleValue::Object(themes)) = map.get_mut("themes") {
        for theme in themes.values_mut() {
            if let ModuleValue::Object(t) = theme {
                if let Some(ModuleValue::Array(items)) = t.get_mut("css") {
                    rewrite_list(items, base);
                }
            }
        }
    }
    for key in ["bundle", "default"] {
        if let Some(inner) = map.get_mut(key) {
            rewrite_css_urls(inner, base);
        }
    }
}

fn rewrite_list(items: &mut [ModuleValue], base: &Url) {
    for item in items {
        if let ModuleValue::Object(r) = item {
            if let Some(ModuleValue::String(url)) = r.get_mut("url") {
                let resolved = css_url(base, url);
                *url = resolved;
            }
        }
    }
}
