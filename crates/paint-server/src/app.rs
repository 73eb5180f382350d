//! Demo router: every page echoes the resolved UI as JSON.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use paint_common::{ChoiceItem, CssLink, UiPreferences};
use paint_kit::{UiChoices, UiRuntime};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::kit_server::UiKitServer;
use crate::middleware::{ui_kit_middleware, MiddlewareOptions, UiMiddlewareState};

#[derive(Debug, Serialize)]
pub struct RuntimeSummary<'a> {
    pub prefs: &'a UiPreferences,
    pub css: &'a [CssLink],
    pub warnings: &'a [String],
    pub catalog: &'a [ChoiceItem],
    pub choices: &'a UiChoices,
    pub bundles: Vec<&'a str>,
    pub primitives: Vec<&'a str>,
    pub widgets: Vec<&'a str>,
    pub layout: Option<&'a str>,
}

impl<'a> RuntimeSummary<'a> {
    pub fn new(rt: &'a UiRuntime) -> Self {
        Self {
            prefs: &rt.prefs,
            css: &rt.css,
            warnings: &rt.warnings,
            catalog: &rt.catalog,
            choices: &rt.choices,
            bundles: rt.registry.bundles.keys().map(String::as_str).collect(),
            primitives: rt.registry.primitives.keys().map(String::as_str).collect(),
            widgets: rt.registry.widgets.keys().map(String::as_str).collect(),
            layout: rt.registry.layout(&rt.prefs.layout).map(|l| l.label.as_str()),
        }
    }
}

async fn ui_summary(Extension(rt): Extension<Arc<UiRuntime>>) -> Response {
    Json(RuntimeSummary::new(&rt)).into_response()
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// `/` answers with the resolved UI; stylesheets and the preferences
/// endpoint are served by the middleware.
pub fn build_router(kit: Arc<dyn UiKitServer>, options: MiddlewareOptions) -> Router {
    let state = UiMiddlewareState::new(kit, options);
    Router::new()
        .route("/", get(ui_summary))
        .fallback(not_found)
        .layer(from_fn_with_state(state, ui_kit_middleware))
        .layer(TraceLayer::new_for_http())
}
