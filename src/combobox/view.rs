//! Render model: what a host needs to draw the combobox and expose it to assistive
//! technology.

use serde::Serialize;
use std::collections::BTreeMap;

/// Attributes of the text input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputView {
    pub id: String,
    pub name: String,
    /// Always `"combobox"`
    pub role: &'static str,
    pub value: String,
    /// `aria-expanded`: whether the option list is on screen
    pub expanded: bool,
    /// `aria-controls`: id of the list box
    pub controls: String,
    /// `aria-activedescendant`: id of the highlighted option
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_descendant: Option<String>,
    /// Always `"list"`
    pub autocomplete: &'static str,
    pub invalid: bool,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_index: Option<i32>,
    /// False while the user navigates the list with the arrow keys
    pub visual_focus: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

/// One entry of the option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub id: String,
    /// Always `"option"`
    pub role: &'static str,
    pub text: String,
    /// Highlighted by keyboard navigation
    pub selected: bool,
}

/// The option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListboxView {
    pub id: String,
    /// Always `"listbox"`
    pub role: &'static str,
    pub label: String,
    pub visible: bool,
    pub options: Vec<OptionView>,
}

/// Everything the host renders for one combobox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComboboxView {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Error for the field's error region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub input: InputView,
    pub listbox: ListboxView,
}
