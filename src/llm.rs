//! LLM provider abstraction
//!
//! MindMate talks to a single OpenAI-compatible provider. Each catalogued
//! model gets its own [`LlmService`], wrapped in [`LoggingService`].

mod error;
mod models;
mod openai;
mod registry;
mod types;

#[cfg(test)]
mod proptests;

#[allow(unused_imports)] // LlmErrorKind is matched on in tests
pub use error::{LlmError, LlmErrorKind};
pub use models::{all_models, DEFAULT_MODEL};
pub use openai::OpenAIService;
pub use registry::{LlmConfig, ModelRegistry};
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// A chat-completion backend for one model
#[async_trait]
pub trait LlmService: Send + Sync {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    fn model_id(&self) -> &str;
}

/// Wraps a service and records one structured event per completion
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let started = Instant::now();
        let result = self.inner.complete(request).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let model = self.inner.model_id();

        match &result {
            Ok(response) => tracing::info!(
                model,
                elapsed_ms,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
                "Completion finished"
            ),
            // Has its own fallback reply
            Err(e) if e.is_rate_limit() => tracing::warn!(
                model,
                elapsed_ms,
                error = %e.message,
                "Completion rate limited"
            ),
            Err(e) => tracing::error!(
                model,
                elapsed_ms,
                kind = e.kind.as_str(),
                error = %e.message,
                "Completion failed"
            ),
        }

        result
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::testing::MockCompletionClient;

    #[tokio::test]
    async fn test_logging_service_passes_results_through() {
        let mock = Arc::new(MockCompletionClient::new("mock-model"));
        mock.queue_response(LlmResponse::text("fine"));
        mock.queue_error(LlmError::rate_limit("slow down"));
        let service = LoggingService::new(mock.clone());

        assert_eq!(LlmService::model_id(&service), "mock-model");
        let ok = service.complete(&LlmRequest::default()).await.unwrap();
        assert_eq!(ok.content, "fine");
        let err = service.complete(&LlmRequest::default()).await.unwrap_err();
        assert!(err.is_rate_limit());
        assert_eq!(mock.recorded_requests().len(), 2);
    }
}
