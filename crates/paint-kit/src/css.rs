//! Stylesheet collection in cascade order, then proxying.

use std::collections::HashSet;

use paint_common::{BundleId, CssLink, CssResource, PaintError};
use paint_proxy::CssProxy;

use crate::registry::{theme_layers, LoadedBundles, UiRegistry};

/// Every stylesheet the page needs, in emission order.
///
/// All `globalCss` in stack order first, then for each theme layer (base
/// first) each bundle's css for that theme in stack order. Not deduped.
pub fn collect_css(
    theme: &str,
    stack: &[BundleId],
    bundles: &LoadedBundles,
    registry: &UiRegistry,
) -> Vec<CssResource> {
    let mut out = Vec::new();

    for id in stack {
        if let Some(css) = bundles.get(id).and_then(|b| b.global_css.as_ref()) {
            out.extend(css.iter().cloned());
        }
    }

    for layer in theme_layers(theme, &registry.themes) {
        for id in stack {
            let css = bundles
                .get(id)
                .and_then(|b| b.themes.as_ref())
                .and_then(|t| t.get(&layer))
                .map(|t| &t.css);
            if let Some(css) = css {
                out.extend(css.iter().cloned());
            }
        }
    }

    out
}

/// Register each resource and keep the first link per proxied href.
pub fn proxy_css(proxy: &CssProxy, resources: &[CssResource]) -> Result<Vec<CssLink>, PaintError> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for r in resources {
        let reg = proxy.register(&r.url)?;
        if !seen.insert(reg.href.clone()) {
            continue;
        }
        out.push(CssLink {
            href: reg.href,
            media: r.media.clone(),
            source_url: r.url.clone(),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use paint_common::{ThemeDef, UiBundle};
    use paint_proxy::CssProxyOptions;

    use crate::registry::merge_registry;

    fn theme(id: &str, extends: Option<&str>, css: &[&str]) -> (String, ThemeDef) {
        (
            id.to_string(),
            ThemeDef {
                id: id.into(),
                label: id.into(),
                extends: extends.map(Into::into),
                css: css.iter().map(|u| CssResource::new(*u)).collect(),
            },
        )
    }

    fn bundle(id: &str, global: &[&str], themes: Vec<(String, ThemeDef)>) -> Arc<UiBundle> {
        Arc::new(UiBundle {
            id: id.into(),
            label: id.into(),
            global_css: Some(global.iter().map(|u| CssResource::new(*u)).collect()),
            themes: Some(themes.into_iter().collect::<BTreeMap<_, _>>()),
            ..Default::default()
        })
    }

    fn urls(list: &[CssResource]) -> Vec<&str> {
        list.iter().map(|r| r.url.as_str()).collect()
    }

    #[test]
    fn globals_then_theme_layers_each_in_stack_order() {
        let mut bundles = LoadedBundles::new();
        bundles.insert(
            "base".into(),
            bundle(
                "base",
                &["base.css"],
                vec![
                    theme("light", None, &["base.light.css"]),
                    theme("ocean", Some("light"), &["base.ocean.css"]),
                ],
            ),
        );
        bundles.insert(
            "ocean".into(),
            bundle(
                "ocean",
                &["ocean.css"],
                vec![
                    theme("light", None, &["ocean.light.css"]),
                    theme("ocean", Some("light"), &["ocean.ocean.css"]),
                ],
            ),
        );

        let stack: Vec<BundleId> = vec!["base".into(), "ocean".into()];
        let registry = merge_registry(&stack, &bundles);
        let css = collect_css("ocean", &stack, &bundles, &registry);
        assert_eq!(
            urls(&css),
            vec![
                "base.css",
                "ocean.css",
                "base.light.css",
                "ocean.light.css",
                "base.ocean.css",
                "ocean.ocean.css",
            ]
        );
    }

    #[test]
    fn duplicates_are_kept_in_collection() {
        let mut bundles = LoadedBundles::new();
        bundles.insert("a".into(), bundle("a", &["shared.css", "shared.css"], vec![]));
        let stack: Vec<BundleId> = vec!["a".into()];
        let registry = merge_registry(&stack, &bundles);
        assert_eq!(collect_css("none", &stack, &bundles, &registry).len(), 2);
    }

    #[test]
    fn proxying_dedupes_by_href_in_first_seen_order() {
        let proxy = CssProxy::new(CssProxyOptions::default()).unwrap();
        let resources = vec![
            CssResource::new("https://cdn.test/a.css").with_media("screen"),
            CssResource::new("https://cdn.test/b.css"),
            CssResource::new("https://cdn.test/a.css"),
        ];
        let links = proxy_css(&proxy, &resources).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].source_url, "https://cdn.test/a.css");
        assert_eq!(links[0].media.as_deref(), Some("screen"));
        assert_eq!(links[1].source_url, "https://cdn.test/b.css");
        assert!(links[0].href.starts_with("/ui/css/"));
    }

    #[test]
    fn hash_collisions_dedupe_by_href_not_url() {
        let proxy = CssProxy::new(CssProxyOptions::default())
            .unwrap()
            .with_id_hasher(|url| if url.ends_with("a.css") { "x".into() } else { "y".into() });
        let resources = vec![
            CssResource::new("https://one.test/a.css"),
            CssResource::new("https://one.test/b.css"),
        ];
        assert_eq!(proxy_css(&proxy, &resources).unwrap().len(), 2);

        let clash = vec![CssResource::new("https://two.test/a.css")];
        assert!(proxy_css(&proxy, &clash).is_err());
    }
}
