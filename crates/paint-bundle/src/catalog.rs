//! Catalog normalization: user-facing catalog entries to labeled loaders.

use std::collections::BTreeMap;

use paint_common::strings::clean_label;
use paint_common::types::sort_choice_items;
use paint_common::{BundleId, ChoiceItem, ModuleValue, PaintError};

use crate::loader::{module_bundle, BundleImporter, BundleLoader};

/// Normalized catalog: one memoized loader per bundle id.
pub type Catalog = BTreeMap<BundleId, BundleLoader>;

/// One entry of a raw catalog.
#[derive(Debug, Clone)]
pub enum CatalogEntry {
    /// A bare specifier, importer function or loader.
    Importer(BundleImporter),
    /// The `[src, label]` tuple form.
    Labeled(BundleImporter, String),
    /// The `{ src, label? }` object form.
    Src {
        src: BundleImporter,
        label: Option<String>,
    },
    /// A pre-built loader; its own label is kept unless overridden.
    Loader(BundleLoader),
}

impl From<BundleImporter> for CatalogEntry {
    fn from(src: BundleImporter) -> Self {
        Self::Importer(src)
    }
}

impl From<BundleLoader> for CatalogEntry {
    fn from(loader: BundleLoader) -> Self {
        Self::Loader(loader)
    }
}

impl From<&str> for CatalogEntry {
    fn from(spec: &str) -> Self {
        Self::Importer(BundleImporter::specifier(spec))
    }
}

fn invalid_entry(id: &str, message: &str) -> PaintError {
    PaintError::CatalogInvalid {
        id: id.to_string(),
        message: message.to_string(),
    }
}

impl CatalogEntry {
    /// Read an entry from untyped data, e.g. a config file.
    ///
    /// Accepts a specifier string, a `[src, label]` array or a
    /// `{ src, label }` object.
    pub fn from_value(id: &str, value: &ModuleValue) -> Result<Self, PaintError> {
        match value {
            ModuleValue::String(spec) => Ok(Self::Importer(BundleImporter::specifier(spec))),
            ModuleValue::Array(items) => {
                let Some(src) = items.first().and_then(ModuleValue::as_str) else {
                    return Err(invalid_entry(id, "tuple src must be a string or function"));
                };
                let label = items
                    .get(1)
                    .and_then(ModuleValue::as_str)
                    .unwrap_or_default();
                Ok(Self::Labeled(BundleImporter::specifier(src), label.to_string()))
            }
            ModuleValue::Object(map) if map.contains_key("src") => {
                let Some(src) = map.get("src").and_then(ModuleValue::as_str) else {
                    return Err(invalid_entry(id, "{ src } must be a string or function"));
                };
                Ok(Self::Src {
                    src: BundleImporter::specifier(src),
                    label: map
                        .get("label")
                        .and_then(ModuleValue::as_str)
                        .map(str::to_string),
                })
            }
            _ => Err(invalid_entry(
                id,
                "must be a string, function, tuple, or { src } object",
            )),
        }
    }

    fn into_parts(self) -> (BundleImporter, Option<String>) {
        match self {
            Self::Importer(src) => (src, None),
            Self::Labeled(src, label) => (src, clean_label(Some(&label))),
            Self::Src { src, label } => (src, clean_label(label.as_deref())),
            Self::Loader(loader) => (BundleImporter::Loader(loader), None),
        }
    }
}

/// Build one loader per id, failing fast on the first invalid entry.
///
/// The label is the explicit one if given, else the label carried by a
/// wrapped loader, else none (displayed as the id).
pub fn normalize_catalog<I, K>(raw: I) -> Result<Catalog, PaintError>
where
    I: IntoIterator<Item = (K, CatalogEntry)>,
    K: Into<BundleId>,
{
    let mut out = Catalog::new();

    for (id, entry) in raw {
        let id = id.into();
        let (src, label) = entry.into_parts();
        let inferred = label.or_else(|| match &src {
            BundleImporter::Loader(l) => l.label().map(str::to_string),
            _ => None,
        });

        let loader = module_bundle(src, inferred.as_deref()).map_err(|e| match e {
            PaintError::InvalidInput(message) => PaintError::CatalogInvalid {
                id: id.clone(),
                message,
            },
            other => other,
        })?;
        out.insert(id, loader);
    }

    Ok(out)
}

/// `{ id, label }` for every catalog entry, sorted by label then id.
pub fn catalog_choice_items(catalog: &Catalog) -> Vec<ChoiceItem> {
    let mut items: Vec<ChoiceItem> = catalog
        .iter()
        .map(|(id, loader)| ChoiceItem::new(id, loader.label().unwrap_or(id)))
        .collect();
    sort_choice_items(&mut items);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use paint_common::UiBundle;
    use serde_json::json;

    fn bundle(id: &str) -> BundleImporter {
        BundleImporter::bundle(UiBundle {
            id: id.into(),
            label: id.to_uppercase(),
            ..Default::default()
        })
    }

    #[test]
    fn normalizes_every_entry_form() {
        let catalog = normalize_catalog([
            ("a", CatalogEntry::Importer(bundle("a"))),
            ("b", CatalogEntry::Labeled(bundle("b"), "Bravo".into())),
            (
                "c",
                CatalogEntry::Src {
                    src: bundle("c"),
                    label: Some(" Charlie ".into()),
                },
            ),
            ("d", CatalogEntry::Src { src: bundle("d"), label: None }),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog["a"].label(), None);
        assert_eq!(catalog["b"].label(), Some("Bravo"));
        assert_eq!(catalog["c"].label(), Some("Charlie"));
        assert_eq!(catalog["d"].label(), None);
    }

    #[test]
    fn infers_label_from_wrapped_loader() {
        let loader = module_bundle(bundle("x"), Some("bundle-x")).unwrap();
        let catalog = normalize_catalog([("x", CatalogEntry::from(loader.clone()))]).unwrap();
        assert_eq!(catalog["x"].label(), Some("bundle-x"));

        let catalog =
            normalize_catalog([("x", CatalogEntry::Labeled(BundleImporter::Loader(loader), "X".into()))])
                .unwrap();
        assert_eq!(catalog["x"].label(), Some("X"));
    }

    #[test]
    fn blank_specifier_fails_with_catalog_id() {
        let err = normalize_catalog([("ocean", CatalogEntry::from("  "))]).unwrap_err();
        match err {
            PaintError::CatalogInvalid { id, message } => {
                assert_eq!(id, "ocean");
                assert!(message.contains("empty import specifier"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn entry_from_untyped_values() {
        let v = ModuleValue::from(json!("./bundles/base.json"));
        assert!(matches!(
            CatalogEntry::from_value("base", &v).unwrap(),
            CatalogEntry::Importer(BundleImporter::Specifier(s)) if s == "./bundles/base.json"
        ));

        let v = ModuleValue::from(json!(["./ocean.json", "Ocean"]));
        assert!(matches!(
            CatalogEntry::from_value("ocean", &v).unwrap(),
            CatalogEntry::Labeled(_, label) if label == "Ocean"
        ));

        let v = ModuleValue::from(json!({ "src": "./holiday.yaml", "label": "Holiday" }));
        assert!(matches!(
            CatalogEntry::from_value("holiday", &v).unwrap(),
            CatalogEntry::Src { label: Some(label), .. } if label == "Holiday"
        ));
    }

    #[test]
    fn invalid_untyped_entries_name_the_id() {
        let cases = [
            (json!([1, "x"]), "tuple src must be a string or function"),
            (json!({ "src": 1 }), "{ src } must be a string or function"),
            (json!(7), "must be a string, function, tuple, or { src } object"),
            (json!({ "path": "x" }), "must be a string, function, tuple, or { src } object"),
        ];
        for (raw, expected) in cases {
            let err = CatalogEntry::from_value("bad", &ModuleValue::from(raw)).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid catalog entry for \"bad\": {expected}"));
        }
    }

    #[test]
    fn choice_items_sorted_by_label_with_id_fallback() {
        let catalog = normalize_catalog([
            ("zeta", CatalogEntry::Labeled(bundle("zeta"), "Alpha".into())),
            ("base", CatalogEntry::Importer(bundle("base"))),
            ("ocean", CatalogEntry::Labeled(bundle("ocean"), "Ocean".into())),
        ])
        .unwrap();

        let items = catalog_choice_items(&catalog);
        assert_eq!(
            items,
            vec![
                ChoiceItem::new("zeta", "Alpha"),
                ChoiceItem::new("base", "base"),
                ChoiceItem::new("ocean", "Ocean"),
            ]
        );
    }
}
