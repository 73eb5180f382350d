//! Dynamic value tree that bundle modules evaluate to.
//!
//! Bundle modules come from manifest files or in-process importers and are
//! not trusted to have the right shape. They are represented as a JSON-like
//! tree that can also hold [`Component`]s, and are validated structurally
//! before being turned into a typed bundle.

use std::collections::BTreeMap;

use crate::component::Component;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModuleValue {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<ModuleValue>),
    Object(BTreeMap<String, ModuleValue>),
    Component(Component),
}

impl ModuleValue {
    /// Build an object from key/value pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ModuleValue)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ModuleValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, ModuleValue>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Self::Component(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Look up a key on an object; `None` for missing keys and non-objects.
    pub fn get(&self, key: &str) -> Option<&ModuleValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Short type name used in validation messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Component(_) => "component",
        }
    }
}

impl From<serde_json::Value> for ModuleValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<Component> for ModuleValue {
    fn from(c: Component) -> Self {
        Self::Component(c)
    }
}

impl From<&str> for ModuleValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ModuleValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<ModuleValue>> for ModuleValue {
    fn from(items: Vec<ModuleValue>) -> Self {
        Self::Array(items)
    }
}
