//! Build service configuration

use serde::{Deserialize, Serialize};

/// Where and how to reach the BinderHub build service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildServiceConfig {
    /// Origin the build service is hosted on (e.g. "https://hub.example.org")
    pub base_url: String,
    /// Path of the build endpoint below `base_url`
    pub build_path: String,
    /// Provider code prefixed to every build spec ("gh" for GitHub)
    pub provider: String,
    /// Ref used when the user leaves the ref field untouched
    pub default_ref: String,
    /// Ask the service to build without launching a server
    pub build_only: bool,
    /// Optional token sent as `build_token`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_token: Option<String>,
    /// Applies to establishing the connection only; the event stream itself never times out
    pub connect_timeout_seconds: u64,
}

impl Default for BuildServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            build_path: "/services/binder/build/".to_string(),
            provider: "gh".to_string(),
            default_ref: "HEAD".to_string(),
            build_only: true,
            build_token: None,
            connect_timeout_seconds: 10,
        }
    }
}
