//! Field validation rules.

use serde::{Deserialize, Serialize};

/// Validation applied to a single field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateConfig {
    /// Message shown when the field is left empty; `None` makes the field optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
}

impl ValidateConfig {
    pub fn required(message: impl Into<String>) -> Self {
        Self {
            required: Some(message.into()),
        }
    }

    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }
}

/// Validation error for `value`, or `None`.
///
/// Nothing is reported before the field has been blurred once.
pub fn validate_field(value: &str, config: &ValidateConfig, touched: bool) -> Option<String> {
    if !touched {
        return None;
    }

    match &config.required {
        Some(message) if value.trim().is_empty() => Some(message.clone()),
        _ => None,
    }
}
