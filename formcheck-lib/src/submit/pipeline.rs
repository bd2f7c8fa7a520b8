//! Submission pipeline

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

use super::{FAILURE_MESSAGE, SubmissionOutcome, Transport};
use crate::error::TransportError;
use crate::form::FormSnapshot;
use crate::presenter::ErrorPresenter;

/// Sends a validated snapshot to the endpoint and reports the result.
///
/// Feedback goes to the form-level slot, never to a field slot. Nothing is
/// retried.
#[derive(Clone)]
pub struct SubmissionPipeline {
    transport: Arc<dyn Transport>,
    endpoint: String,
    presenter: ErrorPresenter,
    timeout: Option<Duration>,
}

impl SubmissionPipeline {
    /// Creates a pipeline posting to `endpoint` through `transport`.
    pub fn new(
        transport: impl Transport + 'static,
        endpoint: impl Into<String>,
        presenter: ErrorPresenter,
    ) -> Self {
        Self::from_arc(Arc::new(transport), endpoint, presenter)
    }

    /// Creates a pipeline from an already shared transport.
    pub fn from_arc(
        transport: Arc<dyn Transport>,
        endpoint: impl Into<String>,
        presenter: ErrorPresenter,
    ) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            presenter,
            timeout: None,
        }
    }

    /// Bounds how long one submission may wait on the transport.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The endpoint submissions go to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Serializes `snapshot`, posts it once and decodes the answer.
    ///
    /// On a decoded outcome the success text or the server's message is
    /// shown. On any transport or decode failure a single generic message is
    /// shown and the error is returned; no outcome is produced.
    pub async fn submit(
        &self,
        snapshot: &FormSnapshot,
    ) -> Result<SubmissionOutcome, TransportError> {
        match self.send(snapshot).await {
            Ok(outcome) => {
                info!(
                    "Submission to {} answered success={}",
                    self.endpoint, outcome.success
                );
                self.presenter.show_message(outcome.display_message());
                Ok(outcome)
            }
            Err(e) => {
                warn!("Submission to {} failed: {}", self.endpoint, e);
                self.presenter.show_message(FAILURE_MESSAGE);
                Err(e)
            }
        }
    }

    async fn send(&self, snapshot: &FormSnapshot) -> Result<SubmissionOutcome, TransportError> {
        let payload = serde_json::to_value(snapshot).map_err(TransportError::Encode)?;
        let request = self.transport.post_json(&self.endpoint, &payload);
        let body = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| TransportError::Timeout(limit))??,
            None => request.await?,
        };

        serde_json::from_str(&body)
            .map_err(|e| TransportError::decode_with_body(e.to_string(), body.clone()))
    }
}

impl std::fmt::Debug for SubmissionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionPipeline")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
