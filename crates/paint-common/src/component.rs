//! Component references held in bundle registries.
//!
//! Registries are deliberately untyped at this boundary: a component is
//! anything that can render itself from a props object. Lookups in a
//! registry return `Option<&Component>` and callers must handle absence.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// Something that renders markup from a JSON props object.
pub trait Render: Send + Sync {
    fn render(&self, props: &serde_json::Value) -> String;

    /// Name used in debug output and serialized registries.
    fn name(&self) -> &str {
        "component"
    }
}

impl<F> Render for F
where
    F: Fn(&serde_json::Value) -> String + Send + Sync,
{
    fn render(&self, props: &serde_json::Value) -> String {
        self(props)
    }
}

/// A registry entry: a plain tag name or an in-process renderer.
#[derive(Clone)]
pub enum Component {
    Tag(String),
    Render(Arc<dyn Render>),
}

impl Component {
    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag(name.into())
    }

    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&serde_json::Value) -> String + Send + Sync + 'static,
    {
        Self::Render(Arc::new(f))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Tag(tag) => tag,
            Self::Render(r) => r.name(),
        }
    }

    /// Render with the given props. Tags render as an empty element.
    pub fn render(&self, props: &serde_json::Value) -> String {
        match self {
            Self::Tag(tag) => format!("<{tag}></{tag}>"),
            Self::Render(r) => r.render(props),
        }
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Tag(a), Self::Tag(b)) => a == b,
            (Self::Render(a), Self::Render(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            Self::Render(r) => f.debug_tuple("Render").field(&r.name()).finish(),
        }
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
