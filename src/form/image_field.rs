//! Hidden field carrying the built image to the enclosing form.

/// Shown when the form is submitted before a build has produced an image.
pub const WAIT_FOR_BUILD: &str = "Wait for the image build to complete.";

/// Hidden input whose value is the built image name.
///
/// While required (the build option is the active choice) it stays invalid until a
/// build succeeds.
#[derive(Debug, Clone)]
pub struct ImageField {
    name: String,
    value: String,
    required: bool,
    error: Option<String>,
}

impl ImageField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            required: false,
            error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, image: impl Into<String>) {
        self.value = image.into();
        self.error = None;
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn is_valid(&self) -> bool {
        !self.required || !self.value.is_empty()
    }

    /// Check validity as a form submit would; an invalid field records its error.
    pub fn report_validity(&mut self) -> bool {
        let valid = self.is_valid();
        if !valid {
            self.error = Some(WAIT_FOR_BUILD.to_string());
        }
        valid
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Name/value pair to submit, if there is an image.
    pub fn form_value(&self) -> Option<(&str, &str)> {
        if self.value.is_empty() {
            None
        } else {
            Some((self.name.as_str(), self.value.as_str()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_field_always_valid() {
        let mut field = ImageField::new("custom");
        assert!(field.report_validity());
        assert!(field.error().is_none());
    }

    #[test]
    fn test_required_until_image_set() {
        let mut field = ImageField::new("custom");
        field.set_required(true);

        assert!(!field.report_validity());
        assert_eq!(field.error(), Some(WAIT_FOR_BUILD));
        assert!(field.form_value().is_none());

        field.set_value("registry/img:abc");
        assert!(field.report_validity());
        assert!(field.error().is_none());
        assert_eq!(field.form_value(), Some(("custom", "registry/img:abc")));
    }
}
