//! Bundle loading for the paint UI-composition layer.
//!
//! - [`validators`]: structural guards over untrusted module values
//! - [`parse`]: module coercion into typed bundles
//! - [`loader`]: memoized, load-once bundle loaders
//! - [`manifest`]: bundle manifests on disk (JSON, YAML, TOML)
//! - [`catalog`]: catalog normalization into labeled loaders

pub mod catalog;
pub mod define;
pub mod loader;
pub mod manifest;
pub mod parse;
pub mod validators;

pub use catalog::{catalog_choice_items, normalize_catalog, Catalog, CatalogEntry};
pub use define::define_bundle;
pub use loader::{module_bundle, BundleImporter, BundleLoader, ImportError};
pub use manifest::css_url;
pub use parse::coerce_ui_bundle;
