//! Same-origin proxy for bundle stylesheets.
//!
//! Maps arbitrary CSS locations (`file:` during development, remote
//! `http(s):` URLs) to stable `<base>/<id>.css` hrefs, serves them, and
//! keeps a bounded in-memory cache of remote responses.

pub mod fetch;
pub mod file_stream;
pub mod options;
pub mod proxy;
pub mod remote_cache;
pub mod utils;

pub use options::CssProxyOptions;
pub use proxy::{CssProxy, CssRegistration};
pub use remote_cache::{RemoteCache, RemoteEntry};
