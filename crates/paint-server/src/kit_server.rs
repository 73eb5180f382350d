//! The seam between the HTTP layer and the resolution engine.

use async_trait::async_trait;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::Response;
use paint_common::{PaintError, UiPreferences};
use paint_kit::{UiKit, UiRuntime};

/// What the middleware and preferences endpoint need from a kit.
#[async_trait]
pub trait UiKitServer: Send + Sync {
    /// Path prefix of proxied stylesheets.
    fn css_base_path(&self) -> &str;

    async fn handle_css(&self, method: &Method, uri: &Uri, headers: &HeaderMap) -> Response;

    async fn resolve(&self, headers: &HeaderMap) -> Result<UiRuntime, PaintError>;

    fn set_preferences_cookie(
        &self,
        headers: &mut HeaderMap,
        prefs: &UiPreferences,
    ) -> Result<(), PaintError>;
}

#[async_trait]
impl UiKitServer for UiKit {
    fn css_base_path(&self) -> &str {
        self.css_proxy().base_path()
    }

    async fn handle_css(&self, method: &Method, uri: &Uri, headers: &HeaderMap) -> Response {
        UiKit::handle_css(self, method, uri, headers).await
    }

    async fn resolve(&self, headers: &HeaderMap) -> Result<UiRuntime, PaintError> {
        UiKit::resolve(self, headers).await
    }

    fn set_preferences_cookie(
        &self,
        headers: &mut HeaderMap,
        prefs: &UiPreferences,
    ) -> Result<(), PaintError> {
        UiKit::set_preferences_cookie(self, headers, prefs)
    }
}
