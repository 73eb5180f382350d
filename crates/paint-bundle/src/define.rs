//! Building module values from typed bundles.

use std::collections::BTreeMap;

use paint_common::{ComponentRegistry, CssResource, ModuleValue, UiBundle};

fn css_value(list: &[CssResource]) -> ModuleValue {
    ModuleValue::Array(
        list.iter()
            .map(|r| {
                let mut map = BTreeMap::new();
                map.insert("url".to_string(), ModuleValue::from(r.url.as_str()));
                if let Some(media) = &r.media {
                    map.insert("media".to_string(), ModuleValue::from(media.as_str()));
                }
                ModuleValue::Object(map)
            })
            .collect(),
    )
}

fn registry_value(reg: &ComponentRegistry) -> ModuleValue {
    ModuleValue::object(
        reg.iter()
            .map(|(k, c)| (k.clone(), ModuleValue::from(c.clone()))),
    )
}

/// Express a typed bundle as the module value an importer would return.
///
/// Used for bundles that live in the host process rather than on disk.
pub fn define_bundle(b: &UiBundle) -> ModuleValue {
    let mut map = BTreeMap::new();
    map.insert("id".to_string(), ModuleValue::from(b.id.as_str()));
    map.insert("label".to_string(), ModuleValue::from(b.label.as_str()));

    if let Some(css) = &b.global_css {
        map.insert("globalCss".to_string(), css_value(css));
    }
    if let Some(themes) = &b.themes {
        let themes = themes.iter().map(|(k, t)| {
            let mut def = BTreeMap::new();
            def.insert("id".to_string(), ModuleValue::from(t.id.as_str()));
            def.insert("label".to_string(), ModuleValue::from(t.label.as_str()));
            if let Some(parent) = &t.extends {
                def.insert("extends".to_string(), ModuleValue::from(parent.as_str()));
            }
            def.insert("css".to_string(), css_value(&t.css));
            (k.clone(), ModuleValue::Object(def))
        });
        map.insert("themes".to_string(), ModuleValue::object(themes));
    }
    if let Some(layouts) = &b.layouts {
        let layouts = layouts.iter().map(|(k, l)| {
            let def = ModuleValue::object([
                ("id", ModuleValue::from(l.id.as_str())),
                ("label", ModuleValue::from(l.label.as_str())),
                ("render", ModuleValue::from(l.render.clone())),
            ]);
            (k.clone(), def)
        });
        map.insert("layouts".to_string(), ModuleValue::object(layouts));
    }
    if let Some(reg) = &b.primitives {
        map.insert("primitives".to_string(), registry_value(reg));
    }
    if let Some(reg) = &b.widgets {
        map.insert("widgets".to_string(), registry_value(reg));
    }

    ModuleValue::object([("bundle", ModuleValue::Object(map))])
}
