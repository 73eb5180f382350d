//! HTTP surface for paint: the preferences endpoint, the middleware that
//! routes stylesheet and preference requests and attaches the resolved UI
//! to every other request, and the demo router.

pub mod app;
pub mod http;
pub mod kit_server;
pub mod middleware;
pub mod preferences;

pub use app::build_router;
pub use kit_server::UiKitServer;
pub use middleware::{ui_kit_middleware, MiddlewareOptions, UiMiddlewareState};
pub use preferences::{handle_ui_preferences_post, parse_ui_preferences_json, PreferencesError};
