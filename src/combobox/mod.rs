//! Editable combobox with list autocomplete.
//!
//! A headless implementation of the WAI-ARIA pattern: a single-line text input and
//! an option list that filters a fixed set of candidates by prefix as the user types.
//! The host forwards focus, blur, key, input and click events and renders
//! [`Combobox::view`].
//!
//! ```
//! use imagebuilder::combobox::{Combobox, Key};
//!
//! let mut combobox = Combobox::new("repo", "Repository")
//!     .with_options(["alpha", "alphatross", "beta"]);
//! combobox.focus();
//! combobox.type_text("alp");
//! assert_eq!(combobox.filtered_options(), vec!["alpha", "alphatross"]);
//!
//! combobox.handle_key(Key::ArrowDown.into());
//! combobox.handle_key(Key::Enter.into());
//! assert_eq!(combobox.value(), "alpha");
//! ```

pub mod key;
pub mod view;

pub use key::{EventResponse, Key, KeyEvent};
pub use view::{ComboboxView, InputView, ListboxView, OptionView};

use crate::form::validate::{validate_field, ValidateConfig};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Candidates whose case-folded text starts with the case-folded `text`.
///
/// Empty text matches everything. Order is preserved.
pub fn filter_options<'a>(options: &'a [String], text: &str) -> Vec<&'a str> {
    if text.is_empty() {
        return options.iter().map(String::as_str).collect();
    }
    let needle = text.to_lowercase();
    options
        .iter()
        .filter(|option| option.to_lowercase().starts_with(&needle))
        .map(String::as_str)
        .collect()
}

/// Notification that the field's value changed, by typing or by choosing an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    pub id: String,
    pub value: String,
}

/// Notification that the input lost focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlurEvent {
    pub id: String,
    pub value: String,
}

/// Coarse state of the option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "index")]
pub enum ListState {
    Closed,
    OpenNoHighlight,
    OpenHighlighted(usize),
}

type ChangeListener = Box<dyn FnMut(&ChangeEvent) + Send>;
type BlurListener = Box<dyn FnMut(&BlurEvent) + Send>;

/// Combobox state plus its static configuration.
///
/// The filtered option list is never stored; it is derived from the value on every
/// read, so a highlight index can only refer to the list the user currently sees.
pub struct Combobox {
    id: String,
    label: String,
    hint: Option<String>,
    options: Vec<String>,
    validate: ValidateConfig,
    error: Option<String>,
    tab_index: Option<i32>,
    attributes: BTreeMap<String, String>,

    value: String,
    /// Caret position in characters
    caret: usize,
    expanded: bool,
    highlighted: Option<usize>,
    visual_focus: bool,
    touched: bool,
    focused: bool,

    change_listeners: Vec<ChangeListener>,
    blur_listeners: Vec<BlurListener>,
}

impl fmt::Debug for Combobox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combobox")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("expanded", &self.expanded)
            .field("highlighted", &self.highlighted)
            .field("touched", &self.touched)
            .finish_non_exhaustive()
    }
}

impl Combobox {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            hint: None,
            options: Vec::new(),
            validate: ValidateConfig::default(),
            error: None,
            tab_index: None,
            attributes: BTreeMap::new(),
            value: String::new(),
            caret: 0,
            expanded: false,
            highlighted: None,
            visual_focus: true,
            touched: false,
            focused: false,
            change_listeners: Vec::new(),
            blur_listeners: Vec::new(),
        }
    }

    pub fn with_options<I, T>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.set_options(options);
        self
    }

    pub fn with_validate(mut self, validate: ValidateConfig) -> Self {
        self.validate = validate;
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    /// Extra attribute passed through to the input untouched.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Register a listener for value changes.
    pub fn on_change(&mut self, listener: impl FnMut(&ChangeEvent) + Send + 'static) {
        self.change_listeners.push(Box::new(listener));
    }

    /// Register a listener called when the input loses focus.
    pub fn on_blur(&mut self, listener: impl FnMut(&BlurEvent) + Send + 'static) {
        self.blur_listeners.push(Box::new(listener));
    }

    // ------------------------------------------------------------------
    // Host-controlled properties
    // ------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value from the host side, e.g. to prefill the field.
    ///
    /// No change notification is sent; the host already knows the new value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.caret = self.value.chars().count();
        self.highlighted = None;
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Replace the candidate set. Clears the highlight.
    pub fn set_options<I, T>(&mut self, options: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self.highlighted = None;
    }

    /// Set or clear the error supplied from outside (e.g. a cross-field check).
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn set_tab_index(&mut self, tab_index: Option<i32>) {
        self.tab_index = tab_index;
    }

    pub fn set_validate(&mut self, validate: ValidateConfig) {
        self.validate = validate;
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    pub fn filtered_options(&self) -> Vec<&str> {
        filter_options(&self.options, &self.value)
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Open and at least one option to show.
    pub fn is_list_visible(&self) -> bool {
        self.expanded && !self.filtered_options().is_empty()
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn highlighted_option(&self) -> Option<&str> {
        self.highlighted
            .and_then(|i| self.filtered_options().get(i).copied())
    }

    pub fn list_state(&self) -> ListState {
        match (self.expanded, self.highlighted) {
            (false, _) => ListState::Closed,
            (true, None) => ListState::OpenNoHighlight,
            (true, Some(i)) => ListState::OpenHighlighted(i),
        }
    }

    pub fn has_visual_focus(&self) -> bool {
        self.visual_focus
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Local validation error, suppressed until the first blur.
    pub fn validation_error(&self) -> Option<String> {
        validate_field(&self.value, &self.validate, self.touched)
    }

    /// Error for the error region: the local validation error first, otherwise the
    /// external one.
    pub fn display_error(&self) -> Option<String> {
        self.validation_error().or_else(|| self.error.clone())
    }

    fn listbox_id(&self) -> String {
        format!("{}-listbox", self.id)
    }

    fn option_id(&self, index: usize) -> String {
        format!("{}-listbox-{}", self.id, index)
    }

    pub fn view(&self) -> ComboboxView {
        let filtered = self.filtered_options();
        let visible = self.expanded && !filtered.is_empty();
        let error = self.display_error();

        let options = filtered
            .iter()
            .enumerate()
            .map(|(index, text)| OptionView {
                id: self.option_id(index),
                role: "option",
                text: (*text).to_string(),
                selected: self.highlighted == Some(index),
            })
            .collect();

        ComboboxView {
            label: self.label.clone(),
            hint: self.hint.clone(),
            input: InputView {
                id: self.id.clone(),
                name: self.id.clone(),
                role: "combobox",
                value: self.value.clone(),
                expanded: visible,
                controls: self.listbox_id(),
                active_descendant: self.highlighted.map(|i| self.option_id(i)),
                autocomplete: "list",
                invalid: error.is_some(),
                required: self.validate.is_required(),
                tab_index: self.tab_index,
                visual_focus: self.visual_focus,
                attributes: self.attributes.clone(),
            },
            listbox: ListboxView {
                id: self.listbox_id(),
                role: "listbox",
                label: format!("{} Options", self.label),
                visible,
                options,
            },
            error,
        }
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn focus(&mut self) {
        self.focused = true;
        self.expanded = true;
    }

    pub fn blur(&mut self) {
        let event = BlurEvent {
            id: self.id.clone(),
            value: self.value.clone(),
        };
        for listener in &mut self.blur_listeners {
            listener(&event);
        }
        self.focused = false;
        self.touched = true;
        self.expanded = false;
    }

    /// Direct edit of the input text (typing, paste, cut).
    pub fn input(&mut self, text: impl Into<String>) {
        let text = text.into();
        let caret = text.chars().count();
        self.commit(text, caret);
    }

    /// Type `text` one character at a time at the caret, as a user would.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.handle_key(KeyEvent::new(Key::Char(c)));
            let mut chars: Vec<char> = self.value.chars().collect();
            let at = self.caret.min(chars.len());
            chars.insert(at, c);
            self.commit(chars.into_iter().collect(), at + 1);
        }
    }

    /// Delete the character before the caret.
    pub fn backspace(&mut self) {
        self.handle_key(KeyEvent::new(Key::Other("Backspace".to_string())));
        if self.caret == 0 {
            return;
        }
        let mut chars: Vec<char> = self.value.chars().collect();
        let at = self.caret.min(chars.len());
        if at == 0 {
            return;
        }
        chars.remove(at - 1);
        self.commit(chars.into_iter().collect(), at - 1);
    }

    /// Mouse-down on an option. The default is suppressed so the input keeps focus
    /// and the click that follows lands on the same widget.
    pub fn option_mouse_down(&self) -> EventResponse {
        EventResponse::PREVENT_DEFAULT
    }

    /// Click on the option at `index` of the filtered list.
    ///
    /// Returns false if there is no such option.
    pub fn click_option(&mut self, index: usize) -> bool {
        let Some(text) = self.filtered_options().get(index).map(|s| s.to_string()) else {
            return false;
        };
        let caret = text.chars().count();
        self.commit(text, caret);
        self.expanded = false;
        self.highlighted = None;
        true
    }

    pub fn handle_key(&mut self, event: KeyEvent) -> EventResponse {
        let count = self.filtered_options().len();

        match event.key {
            Key::ArrowDown => {
                self.visual_focus = false;
                self.expanded = true;
                self.highlighted = match self.highlighted {
                    _ if count == 0 => None,
                    Some(i) if i + 1 < count => Some(i + 1),
                    Some(_) => Some(0),
                    None if event.alt => None,
                    None => Some(0),
                };
                EventResponse::NONE
            }
            Key::ArrowUp => {
                self.visual_focus = false;
                self.expanded = true;
                self.highlighted = match self.highlighted {
                    _ if count == 0 => None,
                    Some(i) if i > 0 => Some(i - 1),
                    Some(_) | None => Some(count - 1),
                };
                EventResponse::NONE
            }
            Key::Enter => {
                if let Some(text) = self.highlighted_option().map(str::to_string) {
                    let caret = text.chars().count();
                    self.commit(text, caret);
                }
                self.visual_focus = true;
                self.expanded = false;
                self.highlighted = None;
                EventResponse::PREVENT_DEFAULT
            }
            Key::Escape => {
                self.visual_focus = true;
                if self.expanded {
                    self.expanded = false;
                    self.highlighted = None;
                } else {
                    self.commit(String::new(), 0);
                }
                EventResponse::NONE
            }
            Key::Home => {
                self.visual_focus = true;
                self.caret = 0;
                self.highlighted = None;
                EventResponse::CONSUMED
            }
            Key::End => {
                self.visual_focus = true;
                self.caret = self.value.chars().count();
                self.highlighted = None;
                EventResponse::CONSUMED
            }
            Key::Char(_) => {
                self.visual_focus = true;
                self.expanded = true;
                self.highlighted = None;
                EventResponse::NONE
            }
            Key::Other(_) => {
                self.visual_focus = true;
                self.highlighted = None;
                EventResponse::NONE
            }
        }
    }

    /// Single entry point for every value change: typing, Enter, option click and
    /// Escape-to-clear all notify listeners the same way.
    fn commit(&mut self, value: String, caret: usize) {
        self.value = value;
        self.caret = caret;
        self.highlighted = None;

        let event = ChangeEvent {
            id: self.id.clone(),
            value: self.value.clone(),
        };
        tracing::trace!(id = %event.id, value = %event.value, "combobox value committed");
        for listener in &mut self.change_listeners {
            listener(&event);
        }
    }
}
