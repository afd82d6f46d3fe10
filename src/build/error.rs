//! Error types for image builds.

use thiserror::Error;

/// Reasons a build did not produce an image.
///
/// Callers that only care about the binary outcome can collapse any of these into
/// [`BuildOutcome::Failure`](super::BuildOutcome::Failure); anything the service said
/// about the failure has already been written to the output sink.
#[derive(Error, Debug)]
pub enum BuildError {
    /// Network connectivity error (DNS, connection refused, TLS, reset mid-stream).
    #[error("Network error: {0}")]
    Network(String),

    /// Build service answered the connection attempt with a non-success status.
    #[error("Build service error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The build URL could not be assembled from the configured base and spec.
    #[error("Invalid build endpoint: {0}")]
    InvalidEndpoint(String),

    /// The service reported the `failed` phase.
    #[error("Build failed")]
    Failed,

    /// The event stream ended before a `failed` or `ready` phase arrived.
    #[error("Build stream ended before the build finished")]
    StreamEnded,

    /// The service reported `ready` without naming the image.
    #[error("Build finished without an image name")]
    MissingImage,
}
