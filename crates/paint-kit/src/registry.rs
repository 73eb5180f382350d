//! Bundle loading fan-out, registry merge, and theme/layout selection.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use futures_util::future::join_all;
use paint_bundle::Catalog;
use paint_common::{BundleId, Component, ComponentRegistry, LayoutDef, ThemeDef, ThemeId, UiBundle};

/// Loaded bundles by id. Ids that failed to load are absent.
pub type LoadedBundles = HashMap<BundleId, Arc<UiBundle>>;

/// Everything a request can render with, merged across the stack.
///
/// Later stack entries override earlier ones per key, independently for
/// each map.
#[derive(Debug, Clone, Default)]
pub struct UiRegistry {
    pub bundles: BTreeMap<BundleId, Arc<UiBundle>>,
    pub themes: BTreeMap<ThemeId, ThemeDef>,
    pub layouts: BTreeMap<String, LayoutDef>,
    pub primitives: ComponentRegistry,
    pub widgets: ComponentRegistry,
}

impl UiRegistry {
    pub fn primitive(&self, name: &str) -> Option<&Component> {
        self.primitives.get(name)
    }

    pub fn widget(&self, name: &str) -> Option<&Component> {
        self.widgets.get(name)
    }

    pub fn layout(&self, id: &str) -> Option<&LayoutDef> {
        self.layouts.get(id)
    }

    pub fn theme(&self, id: &str) -> Option<&ThemeDef> {
        self.themes.get(id)
    }
}

/// Load every bundle in `stack` concurrently.
///
/// A failed load becomes a warning and the id is left out; warnings are
/// pushed in stack order.
pub async fn load_bundles(
    stack: &[BundleId],
    catalog: &Catalog,
    warnings: &mut Vec<String>,
) -> LoadedBundles {
    let loads = stack.iter().map(|id| async move {
        match catalog.get(id) {
            Some(loader) => (id, Some(loader.load().await)),
            None => (id, None),
        }
    });

    let mut out = LoadedBundles::new();
    for (id, result) in join_all(loads).await {
        match result {
            Some(Ok(bundle)) => {
                out.insert(id.clone(), bundle);
            }
            Some(Err(e)) => {
                warnings.push(format!("Failed to load bundle \"{id}\": {}", e.message));
            }
            None => warnings.push(format!("Unknown bundle id ignored: \"{id}\"")),
        }
    }
    out
}

/// Shallow-merge the stack's bundles in order.
pub fn merge_registry(stack: &[BundleId], bundles: &LoadedBundles) -> UiRegistry {
    let mut out = UiRegistry::default();

    for id in stack {
        let Some(b) = bundles.get(id) else {
            continue;
        };

        out.bundles.insert(id.clone(), b.clone());
        if let Some(themes) = &b.themes {
            out.themes.extend(themes.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        if let Some(layouts) = &b.layouts {
            out.layouts.extend(layouts.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        if let Some(primitives) = &b.primitives {
            out.primitives.extend(primitives.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        if let Some(widgets) = &b.widgets {
            out.widgets.extend(widgets.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }

    out
}

/// Choose the effective theme or layout id.
///
/// Requested if registered, else the default if registered, else the
/// lexicographically first registered id, else the requested id as-is.
pub fn pick_id<V>(
    kind: &str,
    requested: &str,
    map: &BTreeMap<String, V>,
    fallback: &str,
    warnings: &mut Vec<String>,
) -> String {
    if map.contains_key(requested) {
        return requested.to_string();
    }

    let next = if map.contains_key(fallback) {
        Some(fallback)
    } else {
        map.keys().next().map(String::as_str)
    };

    match next {
        Some(next) => {
            warnings.push(format!(
                "Unknown {kind} \"{requested}\", falling back to \"{next}\"."
            ));
            next.to_string()
        }
        None => {
            warnings.push(format!("No {kind}s registered; using \"{requested}\"."));
            requested.to_string()
        }
    }
}

/// The `extends` chain of `theme`, most-base first.
///
/// Stops at a theme without a parent, or on the first revisited id.
pub fn theme_layers(theme: &str, themes: &BTreeMap<ThemeId, ThemeDef>) -> Vec<ThemeId> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut cur = Some(theme);

    while let Some(id) = cur {
        if id.is_empty() || !seen.insert(id) {
            break;
        }
        out.push(id.to_string());
        cur = themes.get(id).and_then(|t| t.extends.as_deref());
    }

    out.reverse();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use paint_bundle::{module_bundle, BundleImporter};
    use paint_common::ModuleValue;

    fn theme(id: &str, extends: Option<&str>) -> ThemeDef {
        ThemeDef {
            id: id.into(),
            label: id.into(),
            extends: extends.map(Into::into),
            css: vec![],
        }
    }

    fn themes(defs: &[(&str, Option<&str>)]) -> BTreeMap<ThemeId, ThemeDef> {
        defs.iter()
            .map(|(id, ext)| (id.to_string(), theme(id, *ext)))
            .collect()
    }

    fn bundle_with(id: &str, prims: &[(&str, &str)]) -> Arc<UiBundle> {
        Arc::new(UiBundle {
            id: id.into(),
            label: id.into(),
            primitives: Some(
                prims
                    .iter()
                    .map(|(k, v)| (k.to_string(), Component::tag(*v)))
                    .collect(),
            ),
            ..Default::default()
        })
    }

    #[test]
    fn theme_chain_is_base_first() {
        let t = themes(&[("dark", Some("base")), ("base", None), ("night", Some("dark"))]);
        assert_eq!(theme_layers("night", &t), vec!["base", "dark", "night"]);
        assert_eq!(theme_layers("base", &t), vec!["base"]);
    }

    #[test]
    fn theme_chain_terminates_on_cycles() {
        let t = themes(&[("a", Some("b")), ("b", Some("a"))]);
        assert_eq!(theme_layers("a", &t), vec!["b", "a"]);

        let t = themes(&[("self", Some("self"))]);
        assert_eq!(theme_layers("self", &t), vec!["self"]);
    }

    #[test]
    fn theme_chain_keeps_unregistered_ids() {
        let t = themes(&[("ocean", Some("light"))]);
        assert_eq!(theme_layers("ocean", &t), vec!["light", "ocean"]);
        assert_eq!(theme_layers("ghost", &t), vec!["ghost"]);
    }

    #[test]
    fn merge_last_in_stack_wins_per_key() {
        let mut bundles = LoadedBundles::new();
        bundles.insert("a".into(), bundle_with("a", &[("Button", "a-button"), ("Card", "a-card")]));
        bundles.insert("b".into(), bundle_with("b", &[("Button", "b-button")]));
        bundles.insert("c".into(), bundle_with("c", &[("Card", "c-card")]));

        let stack: Vec<BundleId> = vec!["a".into(), "b".into(), "c".into()];
        let r = merge_registry(&stack, &bundles);
        assert_eq!(r.primitive("Button"), Some(&Component::tag("b-button")));
        assert_eq!(r.primitive("Card"), Some(&Component::tag("c-card")));
        assert_eq!(r.primitive("Missing"), None);
        assert_eq!(r.bundles.len(), 3);

        let reversed: Vec<BundleId> = vec!["c".into(), "b".into(), "a".into()];
        let r = merge_registry(&reversed, &bundles);
        assert_eq!(r.primitive("Button"), Some(&Component::tag("a-button")));
        assert_eq!(r.primitive("Card"), Some(&Component::tag("a-card")));
    }

    #[test]
    fn merge_skips_unloaded_ids() {
        let mut bundles = LoadedBundles::new();
        bundles.insert("a".into(), bundle_with("a", &[("Button", "a")]));
        let stack: Vec<BundleId> = vec!["missing".into(), "a".into()];
        let r = merge_registry(&stack, &bundles);
        assert_eq!(r.bundles.keys().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn pick_id_fallbacks() {
        let map: BTreeMap<String, ()> = [("light".to_string(), ()), ("dark".to_string(), ())].into();

        let mut w = Vec::new();
        assert_eq!(pick_id("theme", "dark", &map, "light", &mut w), "dark");
        assert!(w.is_empty());

        assert_eq!(pick_id("theme", "nonexistent", &map, "light", &mut w), "light");
        assert_eq!(w.pop().unwrap(), "Unknown theme \"nonexistent\", falling back to \"light\".");

        assert_eq!(pick_id("theme", "nonexistent", &map, "sepia", &mut w), "dark");
        assert_eq!(w.pop().unwrap(), "Unknown theme \"nonexistent\", falling back to \"dark\".");

        let empty: BTreeMap<String, ()> = BTreeMap::new();
        assert_eq!(pick_id("layout", "app", &empty, "app", &mut w), "app");
        assert_eq!(w.pop().unwrap(), "No layouts registered; using \"app\".");
    }

    #[tokio::test]
    async fn load_failures_become_warnings() {
        let good = module_bundle(
            BundleImporter::bundle(UiBundle {
                id: "good".into(),
                label: "Good".into(),
                ..Default::default()
            }),
            None,
        )
        .unwrap();
        let broken = module_bundle(
            BundleImporter::function(|| async { Ok(ModuleValue::from("not a bundle")) }),
            Some("bundle-broken"),
        )
        .unwrap();
        let catalog: Catalog = [("good".to_string(), good), ("broken".to_string(), broken)].into();

        let mut w = Vec::new();
        let stack: Vec<BundleId> = vec!["broken".into(), "good".into(), "nope".into()];
        let loaded = load_bundles(&stack, &catalog, &mut w).await;

        assert!(loaded.contains_key("good"));
        assert!(!loaded.contains_key("broken"));
        assert_eq!(w.len(), 2);
        assert!(w[0].starts_with("Failed to load bundle \"broken\": "));
        assert_eq!(w[1], "Unknown bundle id ignored: \"nope\"");
    }
}
