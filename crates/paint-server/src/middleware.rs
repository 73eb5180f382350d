//! Request middleware.
//!
//! Routing order for every request:
//! 1. under the stylesheet base path: GET/HEAD go to the CSS proxy,
//!    anything else is 405 `Allow: GET, HEAD`
//! 2. the preferences endpoint: POST updates the cookie, anything else is
//!    405 `Allow: POST`
//! 3. skipped paths pass straight through
//! 4. everything else is resolved; the [`UiRuntime`] is put in the request
//!    extensions as `Arc<UiRuntime>` and the response gets `Vary: Cookie`

use std::fmt;
use std::sync::Arc;

use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use paint_config::MiddlewareConfig;
use paint_cookie::MAX_PREFS_STACK;
use tracing::{debug, error};

use crate::http::{add_vary, is_under_path, method_not_allowed, normalize_pathname};
use crate::kit_server::UiKitServer;
use crate::preferences::{handle_ui_preferences_post, PreferencesError, DEFAULT_MAX_STACK};

/// Largest preferences body read before answering "Invalid JSON".
pub const MAX_PREFERENCES_BODY_BYTES: usize = 16 * 1024;

pub type SkipResolveFn = Arc<dyn Fn(&Method, &str) -> bool + Send + Sync>;

#[derive(Clone)]
pub struct MiddlewareOptions {
    pub preferences_endpoint: String,
    pub max_stack: usize,
    /// Raw path prefixes that bypass resolution.
    pub skip_prefixes: Vec<String>,
    /// Extra skip rule, checked after the prefixes.
    pub skip_resolve: Option<SkipResolveFn>,
}

impl Default for MiddlewareOptions {
    fn default() -> Self {
        Self::from_config(&MiddlewareConfig::default())
    }
}

impl fmt::Debug for MiddlewareOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareOptions")
            .field("preferences_endpoint", &self.preferences_endpoint)
            .field("max_stack", &self.max_stack)
            .field("skip_prefixes", &self.skip_prefixes)
            .field("skip_resolve", &self.skip_resolve.is_some())
            .finish()
    }
}

impl MiddlewareOptions {
    pub fn from_config(config: &MiddlewareConfig) -> Self {
        Self {
            preferences_endpoint: config.preferences_endpoint.clone(),
            max_stack: match config.max_stack {
                0 => DEFAULT_MAX_STACK,
                n => n.min(MAX_PREFS_STACK),
            },
            skip_prefixes: config.skip_prefixes.clone(),
            skip_resolve: None,
        }
    }

    pub fn skip_resolve<F>(mut self, f: F) -> Self
    where
        F: Fn(&Method, &str) -> bool + Send + Sync + 'static,
    {
        self.skip_resolve = Some(Arc::new(f));
        self
    }

    fn skips(&self, method: &Method, raw_path: &str) -> bool {
        self.skip_prefixes
            .iter()
            .any(|p| !p.is_empty() && raw_path.starts_with(p.as_str()))
            || self
                .skip_resolve
                .as_ref()
                .is_some_and(|f| f(method, raw_path))
    }
}

/// State for [`ui_kit_middleware`], shared across requests.
#[derive(Clone)]
pub struct UiMiddlewareState {
    kit: Arc<dyn UiKitServer>,
    options: Arc<MiddlewareOptions>,
    css_base: String,
    endpoint: String,
}

impl UiMiddlewareState {
    pub fn new(kit: Arc<dyn UiKitServer>, options: MiddlewareOptions) -> Self {
        let css_base = normalize_pathname(kit.css_base_path()).to_string();
        let endpoint = normalize_pathname(&options.preferences_endpoint).to_string();
        Self {
            kit,
            options: Arc::new(options),
            css_base,
            endpoint,
        }
    }
}

/// Use with `axum::middleware::from_fn_with_state`.
pub async fn ui_kit_middleware(
    State(state): State<UiMiddlewareState>,
    mut req: Request,
    next: Next,
) -> Response {
    let raw_path = req.uri().path().to_string();
    let path = normalize_pathname(&raw_path);
    let method = req.method().clone();

    if is_under_path(path, &state.css_base) {
        if method != Method::GET && method != Method::HEAD {
            return method_not_allowed("GET, HEAD");
        }
        return state
            .kit
            .handle_css(&method, req.uri(), req.headers())
            .await;
    }

    if path == state.endpoint {
        if method != Method::POST {
            return method_not_allowed("POST");
        }
        let body = match to_bytes(req.into_body(), MAX_PREFERENCES_BODY_BYTES).await {
            Ok(b) => b,
            Err(e) => {
                debug!(error = %e, "unreadable preferences body");
                return handle_invalid_body();
            }
        };
        return handle_ui_preferences_post(&body, state.kit.as_ref(), state.options.max_stack);
    }

    if state.options.skips(&method, &raw_path) {
        return next.run(req).await;
    }

    let runtime = match state.kit.resolve(req.headers()).await {
        Ok(rt) => rt,
        Err(e) => {
            error!(path = %raw_path, error = %e, "UI resolution failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "UI resolution failed").into_response();
        }
    };
    req.extensions_mut().insert(Arc::new(runtime));

    let mut res = next.run(req).await;
    add_vary(res.headers_mut(), "Cookie");
    res
}

fn handle_invalid_body() -> Response {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(serde_json::json!({
            "ok": false,
            "error": PreferencesError::InvalidJson.to_string(),
        })),
    )
        .into_response()
}
