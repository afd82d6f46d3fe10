//! Repository image builds driven through a BinderHub-style build service.
//!
//! [`BuildDriver::run_build`] opens the progress stream for a repository and ref,
//! mirrors every event message into an [`OutputSink`], and resolves to the built
//! image name once the service reports `ready`, or to an error once it reports
//! `failed` or the stream ends early.

pub mod error;
pub mod service;
pub mod sse;
pub mod types;

pub use error::BuildError;
pub use service::{BuildService, BuildSubscription, HttpBuildService};
pub use sse::EventStreamDecoder;
pub use types::{BuildEvent, BuildOutcome, BuildRequest, Phase, ProviderSpec};

use crate::config::{BuildServiceConfig, TerminalConfig};
use crate::sink::{OutputSink, CLEAR_LINE};

/// Runs builds against a [`BuildService`].
///
/// The driver keeps no per-build state, but it does not guard against overlapping
/// builds into the same sink; callers disable their trigger while a build runs.
pub struct BuildDriver<S> {
    service: S,
    provider: String,
    cols: u16,
    rows: u16,
}

impl BuildDriver<HttpBuildService> {
    /// Driver talking HTTP to the configured build service.
    pub fn from_config(
        build: &BuildServiceConfig,
        terminal: &TerminalConfig,
    ) -> Result<Self, BuildError> {
        let service = HttpBuildService::new(build.clone())?;
        Ok(Self::new(service, build.provider.clone()).with_geometry(terminal.cols, terminal.rows))
    }
}

impl<S: BuildService> BuildDriver<S> {
    pub fn new(service: S, provider: impl Into<String>) -> Self {
        let terminal = TerminalConfig::default();
        Self {
            service,
            provider: provider.into(),
            cols: terminal.cols,
            rows: terminal.rows,
        }
    }

    /// Geometry the sink is resized to when a build starts.
    pub fn with_geometry(mut self, cols: u16, rows: u16) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Build `request` and return the image name.
    ///
    /// Events are handled strictly in arrival order: an event's message reaches the
    /// sink before its phase is looked at. Malformed payloads are logged and skipped.
    /// The subscription is closed exactly once, whichever way the build ends.
    ///
    /// # Returns
    ///
    /// - `Ok(image_name)` when the service reports `ready`
    /// - `Err(BuildError::Failed)` when it reports `failed`
    /// - `Err(BuildError::StreamEnded)` or `Err(BuildError::Network)` when the
    ///   stream stops first
    /// - any error from opening the stream
    pub async fn run_build(
        &self,
        request: &BuildRequest,
        sink: &mut dyn OutputSink,
    ) -> Result<String, BuildError> {
        let spec = ProviderSpec::new(&self.provider, request);

        sink.write_text(CLEAR_LINE);
        sink.resize(self.cols, self.rows);
        sink.fit();

        let mut subscription = self.service.open(&spec).await?;
        let result = consume_events(subscription.as_mut(), sink).await;
        subscription.close();

        match &result {
            Ok(image) => tracing::info!(spec = %spec, image = %image, "image build finished"),
            Err(e) => tracing::warn!(spec = %spec, error = %e, "image build did not finish"),
        }
        result
    }
}

async fn consume_events(
    subscription: &mut dyn BuildSubscription,
    sink: &mut dyn OutputSink,
) -> Result<String, BuildError> {
    loop {
        let payload = match subscription.next_payload().await {
            Some(Ok(payload)) => payload,
            Some(Err(e)) => return Err(e),
            None => return Err(BuildError::StreamEnded),
        };

        let event = match BuildEvent::decode(&payload) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, payload = %payload, "skipping malformed build event");
                continue;
            }
        };

        match &event.message {
            Some(message) => {
                sink.write_text(message);
                sink.fit();
            }
            None => tracing::debug!(?event, "build event without message"),
        }

        match event.phase {
            Some(Phase::Failed) => return Err(BuildError::Failed),
            Some(Phase::Ready) => {
                return event
                    .image_name
                    .filter(|name| !name.is_empty())
                    .ok_or(BuildError::MissingImage);
            }
            Some(Phase::Other(phase)) => tracing::debug!(phase = %phase, "build phase"),
            None => {}
        }
    }
}
