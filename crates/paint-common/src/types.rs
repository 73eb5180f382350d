//! Bundle data model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::component::Component;

pub type BundleId = String;
pub type ThemeId = String;
pub type LayoutId = String;

/// A stylesheet declared by a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssResource {
    /// Absolute URL string (`http(s):`, or `file:` during development).
    pub url: String,
    /// Optional media query for `<link media="...">`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
}

impl CssResource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            media: None,
        }
    }

    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeDef {
    pub id: ThemeId,
    pub label: String,
    /// Parent theme whose CSS is layered underneath this one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<ThemeId>,
    pub css: Vec<CssResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutDef {
    pub id: LayoutId,
    pub label: String,
    pub render: Component,
}

/// Components keyed by name. Props are not enforced across bundles.
pub type ComponentRegistry = BTreeMap<String, Component>;

/// A loaded bundle. Immutable once produced by the loader.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UiBundle {
    pub id: BundleId,
    pub label: String,
    /// CSS always included, in stack order.
    pub global_css: Option<Vec<CssResource>>,
    pub themes: Option<BTreeMap<ThemeId, ThemeDef>>,
    /// Layout templates; later bundles override by key.
    pub layouts: Option<BTreeMap<LayoutId, LayoutDef>>,
    /// Low-level building blocks (buttons, cards, typography).
    pub primitives: Option<ComponentRegistry>,
    /// Higher-level building blocks (hero sections, pricing tables).
    pub widgets: Option<ComponentRegistry>,
}

/// The user's chosen bundle stack, theme and layout.
///
/// Later entries in `stack` take precedence when bundles define the same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPreferences {
    pub stack: Vec<BundleId>,
    pub theme: ThemeId,
    pub layout: LayoutId,
}

/// A proxied stylesheet ready to emit as a `<link>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CssLink {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    /// The source URL, kept for debugging.
    pub source_url: String,
}

/// An `{ id, label }` pair for preference pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceItem {
    pub id: String,
    pub label: String,
}

impl ChoiceItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Sort by label (case-insensitive first), then id.
pub fn sort_choice_items(items: &mut [ChoiceItem]) {
    items.sort_by(|a, b| {
        a.label
            .to_lowercase()
            .cmp(&b.label.to_lowercase())
            .then_with(|| a.label.cmp(&b.label))
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_serialize_with_short_keys() {
        let prefs = UiPreferences {
            stack: vec!["base".into()],
            theme: "light".into(),
            layout: "app".into(),
        };
        let json = serde_json::to_string(&prefs).unwrap();
        assert_eq!(json, r#"{"stack":["base"],"theme":"light","layout":"app"}"#);
    }

    #[test]
    fn css_link_uses_camel_case() {
        let link = CssLink {
            href: "/ui/css/abc.css".into(),
            media: None,
            source_url: "https://cdn.test/a.css".into(),
        };
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["sourceUrl"], "https://cdn.test/a.css");
        assert!(json.get("media").is_none());
    }

    #[test]
    fn css_resource_deserializes_without_media() {
        let r: CssResource = serde_json::from_str(r#"{"url":"file:///a.css"}"#).unwrap();
        assert_eq!(r, CssResource::new("file:///a.css"));
        assert_eq!(
            CssResource::new("x").with_media("print").media.as_deref(),
            Some("print")
        );
    }

    #[test]
    fn choice_items_sort_by_label_then_id() {
        let mut items = vec![
            ChoiceItem::new("b", "Same"),
            ChoiceItem::new("z", "Alpha"),
            ChoiceItem::new("a", "Same"),
            ChoiceItem::new("m", "beta"),
        ];
        sort_choice_items(&mut items);
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["z", "m", "a", "b"]);
    }
}
