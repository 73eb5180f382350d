//! Per-request UI resolution.
//!
//! [`UiKit`] turns a request's preferences cookie into a [`UiRuntime`]:
//! the effective bundle stack, the merged component registry, the chosen
//! theme and layout, and the ordered list of proxied stylesheets. Data
//! problems never fail a request; they become warnings on the runtime.

pub mod css;
pub mod kit;
pub mod registry;
pub mod runtime;
pub mod stack;

pub use kit::{UiKit, UiKitOptions};
pub use registry::UiRegistry;
pub use runtime::{UiChoices, UiRuntime};
