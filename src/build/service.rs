//! Build service abstraction and its HTTP implementation.

use super::sse::EventStreamDecoder;
use super::{BuildError, ProviderSpec};
use crate::config::BuildServiceConfig;
use async_trait::async_trait;
use futures::StreamExt;
use futures_util::stream::BoxStream;
use reqwest::{Client, Url};
use std::time::Duration;

/// Something that can start a build and stream its progress.
///
/// # Object Safety
///
/// Designed to be used as `Arc<dyn BuildService>` as well as generically.
#[async_trait]
pub trait BuildService: Send + Sync {
    /// Open the progress stream for `spec`.
    ///
    /// # Returns
    ///
    /// - `Ok(subscription)` once the service accepted the connection
    /// - `Err(BuildError::Network)` if the connection could not be established
    /// - `Err(BuildError::Upstream)` if the service answered with an error status
    async fn open(&self, spec: &ProviderSpec) -> Result<Box<dyn BuildSubscription>, BuildError>;
}

/// A live, non-restartable stream of raw event payloads.
///
/// Payloads are the undecoded `data` of each event. The stream is finite: `None`
/// means the service (or the network) ended it.
#[async_trait]
pub trait BuildSubscription: Send {
    /// Wait for the next payload.
    ///
    /// `Some(Err(_))` reports a transport failure; nothing follows it.
    async fn next_payload(&mut self) -> Option<Result<String, BuildError>>;

    /// Release the underlying connection.
    fn close(self: Box<Self>);
}

/// Talks to a BinderHub build endpoint over HTTP server-sent events.
pub struct HttpBuildService {
    config: BuildServiceConfig,
    client: Client,
}

impl HttpBuildService {
    /// Create a service with its own HTTP client.
    ///
    /// Only connection establishment is bounded by `connect_timeout_seconds`; an
    /// established stream may stay silent for as long as the build takes.
    pub fn new(config: BuildServiceConfig) -> Result<Self, BuildError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()
            .map_err(|e| BuildError::Network(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn with_client(config: BuildServiceConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &BuildServiceConfig {
        &self.config
    }

    /// Resolve the endpoint for `spec`.
    ///
    /// `build_path` is resolved against the origin of `base_url`. The spec is then
    /// appended one percent-encoded segment at a time, so `#` or `?` in a ref stay
    /// part of the path. Empty, `.` and `..` segments are rejected.
    pub fn build_url(&self, spec: &ProviderSpec) -> Result<Url, BuildError> {
        let base = Url::parse(&self.config.base_url)
            .map_err(|e| BuildError::InvalidEndpoint(format!("{}: {}", self.config.base_url, e)))?;

        let mut build_path = self.config.build_path.clone();
        if !build_path.ends_with('/') {
            build_path.push('/');
        }
        let endpoint = base
            .join(&build_path)
            .map_err(|e| BuildError::InvalidEndpoint(format!("{}: {}", build_path, e)))?;

        if spec
            .segments()
            .any(|segment| matches!(segment, "" | "." | ".."))
        {
            return Err(BuildError::InvalidEndpoint(format!(
                "{}: empty or relative path segment",
                spec
            )));
        }

        let mut url = endpoint;
        url.path_segments_mut()
            .map_err(|_| {
                BuildError::InvalidEndpoint(format!("{}: cannot be a base", self.config.base_url))
            })?
            .pop_if_empty()
            .extend(spec.segments());

        {
            let mut query = url.query_pairs_mut();
            if let Some(token) = &self.config.build_token {
                query.append_pair("build_token", token);
            }
            if self.config.build_only {
                query.append_pair("build_only", "true");
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        Ok(url)
    }
}

#[async_trait]
impl BuildService for HttpBuildService {
    async fn open(&self, spec: &ProviderSpec) -> Result<Box<dyn BuildSubscription>, BuildError> {
        let url = self.build_url(spec)?;
        tracing::info!(spec = %spec, url = %redact_token(&url), "opening build stream");

        let response = self
            .client
            .get(url)
            .header("accept", "text/event-stream")
            .send()
            .await
            .map_err(|e| BuildError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(spec = %spec, status = %status, "build service rejected request");
            return Err(BuildError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(Box::new(HttpSubscription {
            spec: spec.clone(),
            payloads: payload_stream(response),
        }))
    }
}

/// Progress stream backed by an open HTTP response.
struct HttpSubscription {
    spec: ProviderSpec,
    payloads: BoxStream<'static, Result<String, BuildError>>,
}

#[async_trait]
impl BuildSubscription for HttpSubscription {
    async fn next_payload(&mut self) -> Option<Result<String, BuildError>> {
        self.payloads.next().await
    }

    fn close(self: Box<Self>) {
        // Dropping the body stream drops the response and with it the connection.
        tracing::debug!(spec = %self.spec, "closing build stream");
    }
}

fn payload_stream(response: reqwest::Response) -> BoxStream<'static, Result<String, BuildError>> {
    let stream = async_stream::stream! {
        let mut body = response.bytes_stream();
        let mut decoder = EventStreamDecoder::new();

        while let Some(chunk) = body.next().await {
            match chunk {
                Ok(bytes) => {
                    for payload in decoder.feed(&bytes) {
                        yield Ok(payload);
                    }
                }
                Err(e) => {
                    yield Err(BuildError::Network(e.to_string()));
                    return;
                }
            }
        }

        if decoder.has_partial_event() {
            tracing::debug!("discarding unterminated event at end of build stream");
        }
    };
    stream.boxed()
}

fn redact_token(url: &Url) -> Url {
    let mut redacted = url.clone();
    if url.query_pairs().any(|(k, _)| k == "build_token") {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                let v = if k == "build_token" {
                    "***".to_string()
                } else {
                    v.into_owned()
                };
                (k.into_owned(), v)
            })
            .collect();
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted
}
