//! Shared types for the paint UI-composition layer.
//!
//! Holds the bundle data model, the dynamic value tree that bundle modules
//! are parsed from, component references, and the error taxonomy used by
//! every other crate in the workspace.

pub mod component;
pub mod errors;
pub mod strings;
pub mod types;
pub mod value;

pub use component::{Component, Render};
pub use errors::{BundleError, ConfigError, PaintError};
pub use types::{
    sort_choice_items, BundleId, ChoiceItem, ComponentRegistry, CssLink, CssResource, LayoutDef,
    LayoutId, ThemeDef, ThemeId, UiBundle, UiPreferences,
};
pub use value::ModuleValue;

pub type Result<T> = std::result::Result<T, PaintError>;
