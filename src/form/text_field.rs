//! Plain labelled text input.

use super::validate::{validate_field, ValidateConfig};

/// A single-line text field with validation, e.g. the git ref input.
#[derive(Debug, Clone)]
pub struct TextField {
    id: String,
    label: String,
    hint: Option<String>,
    value: String,
    validate: ValidateConfig,
    touched: bool,
    tab_index: Option<i32>,
}

impl TextField {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            hint: None,
            value: String::new(),
            validate: ValidateConfig::default(),
            touched: false,
            tab_index: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn tab_index(&self) -> Option<i32> {
        self.tab_index
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn input(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn blur(&mut self) {
        self.touched = true;
    }

    pub fn set_validate(&mut self, validate: ValidateConfig) {
        self.validate = validate;
    }

    pub fn set_tab_index(&mut self, tab_index: Option<i32>) {
        self.tab_index = tab_index;
    }

    pub fn error(&self) -> Option<String> {
        validate_field(&self.value, &self.validate, self.touched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_after_blur_only() {
        let mut field = TextField::new("custom--ref", "Git Ref");
        field.set_validate(ValidateConfig::required("Enter a git ref."));
        assert_eq!(field.error(), None);

        field.blur();
        assert_eq!(field.error().as_deref(), Some("Enter a git ref."));

        field.input("main");
        assert_eq!(field.error(), None);
    }

    #[test]
    fn test_builder_values() {
        let field = TextField::new("r", "Git Ref")
            .with_hint("Branch, Tag or Commit")
            .with_value("HEAD");
        assert_eq!(field.value(), "HEAD");
        assert_eq!(field.hint(), Some("Branch, Tag or Commit"));
        assert_eq!(field.label(), "Git Ref");
    }
}
