//! Stack cleaning: dedupe, drop unknown ids, fall back to defaults.

use std::collections::HashSet;

use paint_bundle::Catalog;
use paint_common::BundleId;

fn dedupe_known(ids: &[BundleId], catalog: &Catalog, warnings: &mut Vec<String>) -> Vec<BundleId> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for id in ids {
        if !seen.insert(id.as_str()) {
            continue;
        }
        if catalog.contains_key(id) {
            out.push(id.clone());
        } else {
            warnings.push(format!("Unknown bundle id ignored: \"{id}\""));
        }
    }
    out
}

/// Requested stack with duplicates (first occurrence kept) and unknown ids
/// removed. If nothing is left, the same cleaning is applied to `fallback`.
pub fn pick_stack(
    requested: &[BundleId],
    fallback: &[BundleId],
    catalog: &Catalog,
    warnings: &mut Vec<String>,
) -> Vec<BundleId> {
    let stack = dedupe_known(requested, catalog, warnings);
    if !stack.is_empty() {
        return stack;
    }

    warnings.push("Requested stack was empty after validation.".to_string());
    dedupe_known(fallback, catalog, warnings)
}
