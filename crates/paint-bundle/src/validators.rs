//! Structural guards for bundle-shaped data.
//!
//! Each guard inspects an untrusted [`ModuleValue`] and answers whether it
//! has the shape of the corresponding typed item. Strings that carry ids,
//! labels, urls or tag names must be non-empty after trimming.

use paint_common::strings::is_non_empty;
use paint_common::ModuleValue;

fn is_non_empty_string(v: &ModuleValue) -> bool {
    v.as_str().is_some_and(is_non_empty)
}

fn is_optional_non_empty_string(v: Option<&ModuleValue>) -> bool {
    v.map_or(true, is_non_empty_string)
}

fn is_record_of(v: &ModuleValue, is_t: impl Fn(&ModuleValue) -> bool) -> bool {
    v.as_object().is_some_and(|map| map.values().all(is_t))
}

/// A non-empty tag name or an in-process component.
pub fn is_registry_component(v: &ModuleValue) -> bool {
    is_non_empty_string(v) || v.as_component().is_some()
}

pub fn is_component_registry(v: &ModuleValue) -> bool {
    is_record_of(v, is_registry_component)
}

pub fn is_css_resource(v: &ModuleValue) -> bool {
    v.is_object()
        && v.get("url").is_some_and(is_non_empty_string)
        && is_optional_non_empty_string(v.get("media"))
}

pub fn is_css_resource_array(v: &ModuleValue) -> bool {
    v.as_array().is_some_and(|items| items.iter().all(is_css_resource))
}

pub fn is_theme_def(v: &ModuleValue) -> bool {
    v.is_object()
        && v.get("id").is_some_and(is_non_empty_string)
        && v.get("label").is_some_and(is_non_empty_string)
        && is_optional_non_empty_string(v.get("extends"))
        && v.get("css").is_some_and(is_css_resource_array)
}

pub fn is_theme_map(v: &ModuleValue) -> bool {
    is_record_of(v, is_theme_def)
}

/// The renderer of a layout, under `render` or the legacy `Layout` key.
pub(crate) fn layout_renderer(v: &ModuleValue) -> Option<&ModuleValue> {
    v.get("render").or_else(|| v.get("Layout"))
}

pub fn is_layout_def(v: &ModuleValue) -> bool {
    v.is_object()
        && v.get("id").is_some_and(is_non_empty_string)
        && v.get("label").is_some_and(is_non_empty_string)
        && layout_renderer(v).is_some_and(is_registry_component)
}

pub fn is_layout_map(v: &ModuleValue) -> bool {
    is_record_of(v, is_layout_def)
}
