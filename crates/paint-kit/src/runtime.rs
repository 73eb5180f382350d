//! The per-request result of resolution.

use paint_common::{ChoiceItem, CssLink, UiPreferences};
use serde::Serialize;

use crate::registry::UiRegistry;

/// Sorted `{ id, label }` lists for preference pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UiChoices {
    pub themes: Vec<ChoiceItem>,
    pub layouts: Vec<ChoiceItem>,
}

#[derive(Debug, Clone)]
pub struct UiRuntime {
    /// Effective preferences after validation, not necessarily the
    /// requested ones.
    pub prefs: UiPreferences,
    pub registry: UiRegistry,
    /// Proxied stylesheets in cascade order.
    pub css: Vec<CssLink>,
    pub warnings: Vec<String>,
    /// Every catalog bundle, for the stack picker.
    pub catalog: Vec<ChoiceItem>,
    pub choices: UiChoices,
}

impl UiRuntime {
    /// Hrefs only, in emission order.
    pub fn css_hrefs(&self) -> Vec<&str> {
        self.css.iter().map(|l| l.href.as_str()).collect()
    }
}
