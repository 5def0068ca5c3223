//! Request dispatcher
//!
//! Receives request ids from an inbound channel, runs each one through
//! [`ClassifyRequestUseCase`] with bounded concurrency, and replies with the
//! same id on the request's oneshot channel once the result is persisted.
//!
//! A failed request gets no reply: its reply sender is dropped, so the caller
//! observes a closed channel (or its own timeout) instead of a value.

use super::classify_request::ClassifyRequestUseCase;
use crate::config::DispatchConfig;
use crate::ports::shared_store::SharedStore;
use companion_domain::{RequestId, RequestPhase};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Semaphore, mpsc, oneshot};
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, warn};

/// One inbound request: an id and the channel to reply on.
#[derive(Debug)]
pub struct ClassificationRequest {
    pub id: RequestId,
    pub reply: oneshot::Sender<RequestId>,
}

/// Errors seen by a caller waiting on a reply
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Dispatcher is not accepting requests")]
    Closed,

    #[error("Request {0} failed without a reply")]
    NoReply(RequestId),

    #[error("Request {0} timed out waiting for a reply")]
    Timeout(RequestId),
}

/// Caller side of the inbound channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct DispatchHandle {
    sender: mpsc::Sender<ClassificationRequest>,
}

impl DispatchHandle {
    /// Enqueue a request and return the receiver its reply arrives on.
    pub async fn submit(
        &self,
        id: RequestId,
    ) -> Result<oneshot::Receiver<RequestId>, DispatchError> {
        let (reply, receiver) = oneshot::channel();
        self.sender
            .send(ClassificationRequest { id, reply })
            .await
            .map_err(|_| DispatchError::Closed)?;
        Ok(receiver)
    }

    /// Enqueue a request and wait for its reply.
    pub async fn request(&self, id: RequestId, timeout: Duration) -> Result<RequestId, DispatchError> {
        let receiver = self.submit(id.clone()).await?;
        match tokio::time::timeout(timeout, receiver).await {
            Ok(Ok(replied)) => Ok(replied),
            Ok(Err(_)) => Err(DispatchError::NoReply(id)),
            Err(_) => Err(DispatchError::Timeout(id)),
        }
    }
}

/// Create the inbound channel.
pub fn request_channel(capacity: usize) -> (DispatchHandle, mpsc::Receiver<ClassificationRequest>) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (DispatchHandle { sender }, receiver)
}

/// Outcome counts of a dispatcher run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub replied: usize,
    pub failed: usize,
}

impl DispatchSummary {
    fn record(&mut self, outcome: Result<bool, JoinError>) {
        match outcome {
            Ok(true) => self.replied += 1,
            Ok(false) => self.failed += 1,
            Err(e) => {
                warn!("Request task aborted: {}", e);
                self.failed += 1;
            }
        }
    }
}

/// Serves classification requests until the inbound channel closes or the
/// cancellation token fires.
pub struct ClassificationDispatcher<S: SharedStore + 'static> {
    use_case: Arc<ClassifyRequestUseCase<S>>,
    config: DispatchConfig,
}

impl<S: SharedStore + 'static> ClassificationDispatcher<S> {
    pub fn new(use_case: ClassifyRequestUseCase<S>, config: DispatchConfig) -> Self {
        Self {
            use_case: Arc::new(use_case),
            config,
        }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Run the serve loop. In-flight requests are drained before returning.
    pub async fn run(
        &self,
        mut requests: mpsc::Receiver<ClassificationRequest>,
        cancel: CancellationToken,
    ) -> DispatchSummary {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_requests.max(1)));
        let mut in_flight: JoinSet<bool> = JoinSet::new();
        let mut summary = DispatchSummary::default();

        info!(
            address = %self.config.address,
            max_concurrent = self.config.max_concurrent_requests,
            classifiers = self.use_case.classifiers().len(),
            "Dispatcher listening"
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("Dispatcher cancelled");
                    break;
                }
                Some(outcome) = in_flight.join_next(), if !in_flight.is_empty() => {
                    summary.record(outcome);
                }
                request = requests.recv() => {
                    let Some(request) = request else {
                        debug!("Inbound channel closed");
                        break;
                    };

                    let permit = tokio::select! {
                        _ = cancel.cancelled() => break,
                        permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                            Ok(permit) => permit,
                            Err(_) => break,
                        },
                    };

                    let span = info_span!("classification_request", request_id = %request.id);
                    let use_case = Arc::clone(&self.use_case);
                    in_flight.spawn(
                        async move {
                            let _permit = permit;
                            handle_request(&use_case, request).await
                        }
                        .instrument(span),
                    );
                }
            }
        }

        while let Some(outcome) = in_flight.join_next().await {
            summary.record(outcome);
        }

        info!(
            replied = summary.replied,
            failed = summary.failed,
            "Dispatcher stopped"
        );
        summary
    }
}

/// Process one request. Returns whether a reply was sent.
async fn handle_request<S: SharedStore + 'static>(
    use_case: &ClassifyRequestUseCase<S>,
    request: ClassificationRequest,
) -> bool {
    let ClassificationRequest { id, reply } = request;
    debug!(phase = %RequestPhase::Received, "Request received");

    match use_case.execute(&id).await {
        Ok(result) => {
            debug!(
                phase = %RequestPhase::ResultPersisted,
                sentences = result.len(),
                "Classification persisted"
            );
            if reply.send(id).is_err() {
                warn!("Caller went away before the reply");
            } else {
                debug!(phase = %RequestPhase::Replied, "Reply sent");
            }
            true
        }
        Err(e) => {
            error!(phase = %e.phase(), "Request failed, no reply sent: {}", e);
            false
        }
    }
}
