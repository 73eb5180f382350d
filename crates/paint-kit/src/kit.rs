//! The resolution engine.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, Method, Uri};
use axum::response::Response;
use paint_bundle::{catalog_choice_items, normalize_catalog, Catalog, CatalogEntry};
use paint_common::strings::is_non_empty;
use paint_common::types::sort_choice_items;
use paint_common::{BundleId, ChoiceItem, ModuleValue, PaintError, Result, UiPreferences};
use paint_config::KitConfig;
use paint_cookie::{decode_prefs_cookie, encode_prefs_cookie, is_cookie_token, parse_cookie_header, SetCookie};
use paint_proxy::{CssProxy, CssProxyOptions};
use tracing::{debug, info, warn};

use crate::css::{collect_css, proxy_css};
use crate::registry::{load_bundles, merge_registry, pick_id};
use crate::runtime::{UiChoices, UiRuntime};
use crate::stack::pick_stack;

/// Construction options for [`UiKit`].
#[derive(Debug, Clone)]
pub struct UiKitOptions {
    pub catalog: Vec<(BundleId, CatalogEntry)>,
    /// Used when the cookie is missing or invalid, and as the fallback
    /// stack, theme and layout during resolution.
    pub defaults: UiPreferences,
    pub cookie_name: String,
    pub proxy: CssProxyOptions,
}

impl UiKitOptions {
    pub fn new(defaults: UiPreferences) -> Self {
        Self {
            catalog: Vec::new(),
            defaults,
            cookie_name: "ui".to_string(),
            proxy: CssProxyOptions::default(),
        }
    }

    pub fn entry(mut self, id: impl Into<BundleId>, entry: impl Into<CatalogEntry>) -> Self {
        self.catalog.push((id.into(), entry.into()));
        self
    }

    pub fn cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    pub fn proxy(mut self, proxy: CssProxyOptions) -> Self {
        self.proxy = proxy;
        self
    }
}

/// Long-lived resolution state: the catalog with its load-once loaders
/// and the CSS proxy. Build once at startup and share.
#[derive(Debug)]
pub struct UiKit {
    catalog: Catalog,
    catalog_items: Vec<ChoiceItem>,
    defaults: UiPreferences,
    cookie_name: String,
    proxy: CssProxy,
}

fn validate_defaults(d: &UiPreferences) -> Result<()> {
    if !is_non_empty(&d.theme) {
        return Err(PaintError::InvalidInput(
            "Invalid defaults: theme must be a non-empty string".into(),
        ));
    }
    if !is_non_empty(&d.layout) {
        return Err(PaintError::InvalidInput(
            "Invalid defaults: layout must be a non-empty string".into(),
        ));
    }
    if d.stack.iter().any(|id| !is_non_empty(id)) {
        return Err(PaintError::InvalidInput(
            "Invalid defaults: stack entries must be non-empty strings".into(),
        ));
    }
    Ok(())
}

fn choice_items<'a, I>(defs: I) -> Vec<ChoiceItem>
where
    I: Iterator<Item = (&'a String, &'a String)>,
{
    let mut items: Vec<ChoiceItem> = defs.map(|(id, label)| ChoiceItem::new(id, label)).collect();
    sort_choice_items(&mut items);
    items
}

impl UiKit {
    /// Validate options and build the kit. Fails on an invalid catalog
    /// entry, blank defaults or an invalid cookie name.
    pub fn new(options: UiKitOptions) -> Result<Self> {
        if !is_cookie_token(&options.cookie_name) {
            return Err(PaintError::InvalidInput(format!(
                "Invalid cookie name: \"{}\"",
                options.cookie_name
            )));
        }
        validate_defaults(&options.defaults)?;

        let catalog = normalize_catalog(options.catalog)?;
        let catalog_items = catalog_choice_items(&catalog);
        let proxy = CssProxy::new(options.proxy)?;

        info!(
            bundles = catalog.len(),
            css_base = %proxy.base_path(),
            "ui kit ready"
        );

        Ok(Self {
            catalog,
            catalog_items,
            defaults: options.defaults,
            cookie_name: options.cookie_name,
            proxy,
        })
    }

    /// Build from a loaded config file.
    pub fn from_config(config: &KitConfig) -> Result<Self> {
        let catalog = config
            .catalog
            .iter()
            .map(|(id, raw)| {
                let value = ModuleValue::from(raw.clone());
                CatalogEntry::from_value(id, &value).map(|entry| (id.clone(), entry))
            })
            .collect::<Result<Vec<_>>>()?;

        let p = &config.proxy;
        let options = UiKitOptions {
            catalog,
            defaults: UiPreferences {
                stack: config.defaults.stack.clone(),
                theme: config.defaults.theme.clone(),
                layout: config.defaults.layout.clone(),
            },
            cookie_name: config.cookie_name.clone(),
            proxy: CssProxyOptions {
                base_path: p.base_path.clone(),
                allow_file_css: p.allow_file_css,
                remote_cache_seconds: p.remote_cache_seconds,
                remote_max_entries: p.remote_max_entries,
                remote_max_bytes: p.remote_max_bytes,
                remote_max_resource_bytes: p.remote_max_resource_bytes,
                remote_fetch_timeout_ms: p.remote_fetch_timeout_ms,
            },
        };
        Self::new(options)
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn defaults(&self) -> &UiPreferences {
        &self.defaults
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn css_proxy(&self) -> &CssProxy {
        &self.proxy
    }

    /// Serve a proxied stylesheet request.
    pub async fn handle_css(&self, method: &Method, uri: &Uri, headers: &HeaderMap) -> Response {
        self.proxy.handle(method, uri, headers).await
    }

    /// Resolve the UI for one request.
    ///
    /// Data problems (unknown ids, failed loads, a bad cookie) become
    /// warnings. The only error is a CSS proxy id collision.
    pub async fn resolve(&self, headers: &HeaderMap) -> Result<UiRuntime> {
        let mut warnings = Vec::new();
        let requested = self.read_preferences(headers, &mut warnings);

        let stack = pick_stack(&requested.stack, &self.defaults.stack, &self.catalog, &mut warnings);
        let bundles = load_bundles(&stack, &self.catalog, &mut warnings).await;
        let registry = merge_registry(&stack, &bundles);

        let theme = pick_id(
            "theme",
            &requested.theme,
            &registry.themes,
            &self.defaults.theme,
            &mut warnings,
        );
        let layout = pick_id(
            "layout",
            &requested.layout,
            &registry.layouts,
            &self.defaults.layout,
            &mut warnings,
        );

        let css = proxy_css(&self.proxy, &collect_css(&theme, &stack, &bundles, &registry))?;

        for w in &warnings {
            warn!(warning = %w, "ui resolution");
        }
        debug!(?stack, %theme, %layout, css = css.len(), "resolved ui");

        let choices = UiChoices {
            themes: choice_items(registry.themes.values().map(|t| (&t.id, &t.label))),
            layouts: choice_items(registry.layouts.values().map(|l| (&l.id, &l.label))),
        };

        Ok(UiRuntime {
            prefs: UiPreferences {
                stack,
                theme,
                layout,
            },
            registry,
            css,
            warnings,
            catalog: self.catalog_items.clone(),
            choices,
        })
    }

    /// Requested preferences from the cookie, or the defaults.
    fn read_preferences(&self, headers: &HeaderMap, warnings: &mut Vec<String>) -> UiPreferences {
        let header = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");
        let cookies = parse_cookie_header(Some(&header));

        match cookies.get(&self.cookie_name) {
            None => self.defaults.clone(),
            Some(value) => decode_prefs_cookie(value).unwrap_or_else(|| {
                warnings.push("Invalid preferences cookie ignored.".to_string());
                self.defaults.clone()
            }),
        }
    }

    /// Append a `Set-Cookie` header persisting `prefs`.
    pub fn set_preferences_cookie(
        &self,
        headers: &mut HeaderMap,
        prefs: &UiPreferences,
    ) -> Result<()> {
        let cookie = SetCookie::new(&self.cookie_name, encode_prefs_cookie(prefs)).to_header_value()?;
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| PaintError::CookieInvalid(format!("Invalid Set-Cookie header: {e}")))?;
        headers.append(SET_COOKIE, value);
        Ok(())
    }
}
