//! Turning an evaluated bundle module into a typed [`UiBundle`].

use std::collections::BTreeMap;

use paint_common::{
    Component, ComponentRegistry, CssResource, LayoutDef, ModuleValue, ThemeDef, UiBundle,
};

use crate::validators::{
    is_component_registry, is_css_resource_array, is_layout_map, is_theme_map, layout_renderer,
};

/// Accept `{ bundle }`, `{ default }` or the bare bundle object.
pub fn coerce_ui_bundle(module: &ModuleValue, name: &str) -> Result<UiBundle, String> {
    let Some(map) = module.as_object() else {
        return Err(format!("Bundle \"{name}\" did not evaluate to an object."));
    };

    let export = match (map.get("bundle"), map.get("default")) {
        (Some(b), _) if *b != ModuleValue::Null => Some(b),
        (_, Some(d)) => Some(d),
        (None, None) => Some(module),
        _ => None,
    };

    match export.filter(|e| e.is_object()) {
        Some(export) => parse_ui_bundle(export, name),
        None => Err(format!("Bundle \"{name}\" must export {{ bundle }} or default.")),
    }
}

/// Parse a bundle object, rejecting any present-but-invalid optional field.
pub fn parse_ui_bundle(b: &ModuleValue, name: &str) -> Result<UiBundle, String> {
    let id = b.get("id").and_then(ModuleValue::as_str).unwrap_or_default();
    let label = b.get("label").and_then(ModuleValue::as_str).unwrap_or_default();
    if id.is_empty() || label.is_empty() {
        return Err(format!("Bundle \"{name}\" is missing {{ id, label }} strings."));
    }

    Ok(UiBundle {
        id: id.to_string(),
        label: label.to_string(),
        global_css: field(b, name, "globalCss", is_css_resource_array)?.map(css_list),
        themes: field(b, name, "themes", is_theme_map)?.map(themes),
        layouts: field(b, name, "layouts", is_layout_map)?.map(layouts),
        primitives: field(b, name, "primitives", is_component_registry)?.map(registry),
        widgets: field(b, name, "widgets", is_component_registry)?.map(registry),
    })
}

fn field<'a>(
    b: &'a ModuleValue,
    name: &str,
    key: &str,
    ok: fn(&ModuleValue) -> bool,
) -> Result<Option<&'a ModuleValue>, String> {
    match b.get(key) {
        None => Ok(None),
        Some(v) if ok(v) => Ok(Some(v)),
        Some(_) => Err(format!("Bundle \"{name}\" has invalid {key}.")),
    }
}

// The helpers below run only on values that already passed validation.

fn string_at(v: &ModuleValue, key: &str) -> String {
    v.get(key)
        .and_then(ModuleValue::as_str)
        .unwrap_or_default()
        .to_string()
}

fn css_list(v: &ModuleValue) -> Vec<CssResource> {
    v.as_array()
        .unwrap_or_default()
        .iter()
        .map(|r| CssResource {
            url: string_at(r, "url"),
            media: r.get("media").and_then(ModuleValue::as_str).map(str::to_string),
        })
        .collect()
}

fn component(v: &ModuleValue) -> Component {
    match v {
        ModuleValue::Component(c) => c.clone(),
        other => Component::tag(other.as_str().unwrap_or_default()),
    }
}

fn themes(v: &ModuleValue) -> BTreeMap<String, ThemeDef> {
    entries(v)
        .map(|(k, t)| {
            let def = ThemeDef {
                id: string_at(t, "id"),
                label: string_at(t, "label"),
                extends: t
                    .get("extends")
                    .and_then(ModuleValue::as_str)
                    .map(str::to_string),
                css: t.get("css").map(css_list).unwrap_or_default(),
            };
            (k.clone(), def)
        })
        .collect()
}

fn layouts(v: &ModuleValue) -> BTreeMap<String, LayoutDef> {
    entries(v)
        .map(|(k, l)| {
            let def = LayoutDef {
                id: string_at(l, "id"),
                label: string_at(l, "label"),
                render: layout_renderer(l)
                    .map(component)
                    .unwrap_or_else(|| Component::tag("div")),
            };
            (k.clone(), def)
        })
        .collect()
}

fn registry(v: &ModuleValue) -> ComponentRegistry {
    entries(v).map(|(k, c)| (k.clone(), component(c))).collect()
}

fn entries(v: &ModuleValue) -> impl Iterator<Item = (&String, &ModuleValue)> {
    v.as_object().into_iter().flat_map(|map| map.iter())
}
