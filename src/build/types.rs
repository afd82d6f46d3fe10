//! Wire and domain types for the build protocol.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single build attempt: which repository to build and at which ref.
///
/// Never edited in place; starting another build creates a new request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRequest {
    /// Repository in `owner/name` form
    pub repository: String,
    /// Branch, tag or commit; `HEAD` selects the default branch
    #[serde(rename = "ref")]
    pub git_ref: String,
}

impl BuildRequest {
    pub fn new(repository: impl Into<String>, git_ref: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            git_ref: git_ref.into(),
        }
    }
}

/// Provider-qualified spec identifying a repository and ref to the build service,
/// e.g. `gh/jupyterhub/zero-to-jupyterhub-k8s/HEAD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    spec: String,
    segments: Vec<String>,
}

impl ProviderSpec {
    pub fn new(provider: &str, request: &BuildRequest) -> Self {
        let segments = std::iter::once(provider)
            .chain(request.repository.split('/'))
            .chain(request.git_ref.split('/'))
            .map(str::to_string)
            .collect();
        Self {
            spec: format!("{}/{}/{}", provider, request.repository, request.git_ref),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.spec
    }

    /// URL path segments, unencoded. Slashes inside a ref (`feature/x`) separate
    /// segments the same way they do in the spec string.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}

impl fmt::Display for ProviderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec)
    }
}

/// Lifecycle stage reported by the build service.
///
/// Only `failed` and `ready` end a build. Every other tag (`waiting`, `fetching`,
/// `building`, `pushing`, `built`, ...) is carried verbatim and otherwise ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Phase {
    Failed,
    Ready,
    Other(String),
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Failed => "failed",
            Phase::Ready => "ready",
            Phase::Other(s) => s,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Failed | Phase::Ready)
    }
}

impl From<String> for Phase {
    fn from(s: String) -> Self {
        match s.as_str() {
            "failed" => Phase::Failed,
            "ready" => Phase::Ready,
            _ => Phase::Other(s),
        }
    }
}

impl From<&str> for Phase {
    fn from(s: &str) -> Self {
        Phase::from(s.to_string())
    }
}

impl From<Phase> for String {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One progress event from the build stream.
///
/// A missing `message` means there is nothing to show; a missing `phase` means the
/// build has not changed stage. Unrecognised fields are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BuildEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    #[serde(
        rename = "imageName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BuildEvent {
    /// Decode the JSON payload of one `data:` event.
    pub fn decode(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

/// Terminal result of a build, for callers that only need success or failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Success { image_id: String },
    Failure,
}

impl<E> From<Result<String, E>> for BuildOutcome {
    fn from(result: Result<String, E>) -> Self {
        match result {
            Ok(image_id) => BuildOutcome::Success { image_id },
            Err(_) => BuildOutcome::Failure,
        }
    }
}
