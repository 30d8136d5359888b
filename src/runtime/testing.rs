//! Scripted completion client for controller and API tests

use super::traits::CompletionClient;
use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Replays queued outcomes in order and records every request it sees.
///
/// An empty queue answers with a network error, which the reply generator
/// turns into the generic fallback.
pub struct MockCompletionClient {
    model_id: String,
    script: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    seen: Mutex<Vec<LlmRequest>>,
    delay: Option<Duration>,
    /// Signalled as each request arrives, before any delay
    pub request_started: Arc<Notify>,
}

impl MockCompletionClient {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            script: Mutex::new(VecDeque::new()),
            seen: Mutex::new(Vec::new()),
            delay: None,
            request_started: Arc::new(Notify::new()),
        }
    }

    /// A client that sleeps for `delay` before answering
    pub fn delayed(model_id: impl Into<String>, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(model_id)
        }
    }

    pub fn queue_response(&self, response: LlmResponse) {
        self.script.lock().unwrap().push_back(Ok(response));
    }

    pub fn queue_error(&self, error: LlmError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.seen.lock().unwrap().clone()
    }

    async fn answer(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.seen.lock().unwrap().push(request.clone());
        self.request_started.notify_one();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(LlmError::network("script exhausted")))
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.answer(request).await
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// Lets the mock stand in for a provider inside a `ModelRegistry`
#[async_trait]
impl LlmService for MockCompletionClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.answer(request).await
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
