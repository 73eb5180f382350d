//! The stylesheet proxy: registration and request handling.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::Response;
use paint_common::{PaintError, Result};
use tracing::{debug, warn};
use url::Url;

use crate::fetch::{fetch_with_timeout, FetchError};
use crate::file_stream::file_body;
use crate::options::{normalize_base_path, CssProxyOptions};
use crate::remote_cache::{RemoteCache, RemoteEntry};
use crate::utils::{bad, hash_id, is_under_path, parse_id_from_path, TEXT_CSS};

/// Upstream headers forwarded on remote responses.
const KEPT_UPSTREAM_HEADERS: [header::HeaderName; 2] = [header::ETAG, header::LAST_MODIFIED];

pub type IdHasher = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Result of registering a stylesheet source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRegistration {
    pub id: String,
    pub href: String,
}

#[derive(Default)]
struct ProxyMaps {
    id_to_url: HashMap<String, String>,
    url_to_id: HashMap<String, String>,
}

pub struct CssProxy {
    options: CssProxyOptions,
    hasher: IdHasher,
    maps: Mutex<ProxyMaps>,
    remote: Mutex<RemoteCache>,
    client: reqwest::Client,
}

impl fmt::Debug for CssProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CssProxy")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl CssProxy {
    pub fn new(mut options: CssProxyOptions) -> Result<Self> {
        options.base_path = normalize_base_path(&options.base_path);
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(options.remote_fetch_timeout_ms))
            .build()
            .map_err(|e| PaintError::Proxy(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            remote: Mutex::new(RemoteCache::new(
                options.remote_max_entries,
                options.remote_max_bytes,
            )),
            options,
            hasher: Arc::new(hash_id),
            maps: Mutex::new(ProxyMaps::default()),
            client,
        })
    }

    /// Replace the id hash function.
    pub fn with_id_hasher<F>(mut self, hasher: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.hasher = Arc::new(hasher);
        self
    }

    pub fn options(&self) -> &CssProxyOptions {
        &self.options
    }

    pub fn base_path(&self) -> &str {
        &self.options.base_path
    }

    pub fn href(&self, id: &str) -> String {
        if self.options.base_path == "/" {
            format!("/{id}.css")
        } else {
            format!("{}/{id}.css", self.options.base_path)
        }
    }

    /// Source URL registered under `id`.
    pub fn lookup(&self, id: &str) -> Option<String> {
        self.maps().id_to_url.get(id).cloned()
    }

    /// Register `source_url`, returning its stable id and href.
    ///
    /// Idempotent per URL. A different URL hashing to a taken id is an
    /// error and leaves the existing mapping untouched.
    pub fn register(&self, source_url: &str) -> Result<CssRegistration> {
        let mut maps = self.maps();
        if let Some(id) = maps.url_to_id.get(source_url) {
            return Ok(CssRegistration {
                href: self.href(id),
                id: id.clone(),
            });
        }

        let id = (self.hasher)(source_url);
        if let Some(existing) = maps.id_to_url.get(&id) {
            if existing != source_url {
                return Err(PaintError::Proxy(format!(
                    "CSS proxy id collision for \"{id}\": \"{source_url}\" vs \"{existing}\""
                )));
            }
        }

        maps.id_to_url.insert(id.clone(), source_url.to_string());
        maps.url_to_id.insert(source_url.to_string(), id.clone());
        debug!(url = %source_url, id = %id, "registered stylesheet");

        Ok(CssRegistration {
            href: self.href(&id),
            id,
        })
    }

    /// Serve `<base>/<id>.css`. `HEAD` gets the same status and headers
    /// with an empty body.
    pub async fn handle(&self, method: &Method, uri: &Uri, headers: &HeaderMap) -> Response {
        let res = self.respond(uri, headers).await;
        if method == Method::HEAD {
            let (parts, _) = res.into_parts();
            return Response::from_parts(parts, Body::empty());
        }
        res
    }

    async fn respond(&self, uri: &Uri, headers: &HeaderMap) -> Response {
        let source = parse_id_from_path(uri.path(), self.base_path()).and_then(|id| self.lookup(id));
        let Some(source) = source else {
            return bad("Unknown stylesheet id", StatusCode::NOT_FOUND);
        };

        let origin = request_origin(uri, headers);
        let target = match &origin {
            Some(o) => o.join(&source),
            None => Url::parse(&source),
        };
        let Ok(target) = target else {
            return bad("Invalid CSS URL", StatusCode::BAD_REQUEST);
        };

        if self.is_recursive(&target, origin.as_ref()) {
            return bad("Refusing to proxy a proxied CSS URL", StatusCode::BAD_REQUEST);
        }

        match target.scheme() {
            "file" if self.options.allow_file_css => self.serve_file(&target).await,
            "file" => bad("file: CSS not allowed", StatusCode::FORBIDDEN),
            "http" | "https" => self.serve_remote(target.to_string()).await,
            _ => bad("Unsupported CSS URL scheme", StatusCode::BAD_REQUEST),
        }
    }

    fn is_recursive(&self, target: &Url, origin: Option<&Url>) -> bool {
        matches!(target.scheme(), "http" | "https")
            && origin.is_some_and(|o| o.origin() == target.origin())
            && is_under_path(target.path(), self.base_path())
    }

    async fn serve_file(&self, target: &Url) -> Response {
        let body = match target.to_file_path() {
            Ok(path) => file_body(&path).await.map_err(|e| e.to_string()),
            Err(()) => Err("not a local file URL".to_string()),
        };

        match body {
            Ok(body) => {
                let mut res = Response::new(body);
                let h = res.headers_mut();
                h.insert(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_CSS));
                h.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
                res
            }
            Err(e) => {
                debug!(url = %target, error = %e, "stylesheet file unreadable");
                bad(format!("Failed to read CSS file: {e}"), StatusCode::NOT_FOUND)
            }
        }
    }

    async fn serve_remote(&self, source: String) -> Response {
        let cached = self.remote().get(&source);
        if let Some(entry) = cached {
            debug!(url = %source, "remote stylesheet cache hit");
            return entry.to_response();
        }
        debug!(url = %source, "remote stylesheet cache miss");

        let timeout = Duration::from_millis(self.options.remote_fetch_timeout_ms);
        let fetched = match fetch_with_timeout(
            &self.client,
            &source,
            timeout,
            self.options.remote_max_resource_bytes,
        )
        .await
        {
            Ok(f) => f,
            Err(FetchError::TooLarge(max)) => {
                warn!(url = %source, max, "remote stylesheet too large");
                return bad("CSS too large", StatusCode::PAYLOAD_TOO_LARGE);
            }
            Err(e) => {
                warn!(url = %source, error = %e, "failed to fetch remote stylesheet");
                return bad(format!("Failed to fetch CSS: {e}"), StatusCode::BAD_GATEWAY);
            }
        };

        let mut headers = HeaderMap::new();
        for name in KEPT_UPSTREAM_HEADERS {
            if let Some(v) = fetched.headers.get(&name) {
                headers.insert(name, v.clone());
            }
        }
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_CSS));

        if !fetched.status.is_success() {
            warn!(url = %source, status = %fetched.status, "remote stylesheet not cached");
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
            let mut res = Response::new(Body::from(fetched.body));
            *res.status_mut() = fetched.status;
            *res.headers_mut() = headers;
            return res;
        }

        if let Ok(v) = HeaderValue::from_str(&format!(
            "public, max-age={}",
            self.options.remote_cache_seconds
        )) {
            headers.insert(header::CACHE_CONTROL, v);
        }

        let entry = RemoteEntry {
            expires_at: Instant::now() + Duration::from_secs(self.options.remote_cache_seconds),
            status: fetched.status,
            headers,
            body: fetched.body,
        };
        let res = entry.to_response();
        self.remote().set(source, entry);
        res
    }

    fn maps(&self) -> MutexGuard<'_, ProxyMaps> {
        self.maps.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remote(&self) -> MutexGuard<'_, RemoteCache> {
        self.remote.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Origin of the incoming request: the absolute URI if present, else
/// `Host` plus `X-Forwarded-Proto` (default `http`).
fn request_origin(uri: &Uri, headers: &HeaderMap) -> Option<Url> {
    if let (Some(scheme), Some(authority)) = (uri.scheme_str(), uri.authority()) {
        return Url::parse(&format!("{scheme}://{authority}")).ok();
    }

    let host = headers.get(header::HOST)?.to_str().ok()?.trim();
    if host.is_empty() {
        return None;
    }
    let proto = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|p| *p == "http" || *p == "https")
        .unwrap_or("http");
    Url::parse(&format!("{proto}://{host}")).ok()
}
