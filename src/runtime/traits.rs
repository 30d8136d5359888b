//! Seam between the conversation runtime and the completion provider
//!
//! Controllers are generic over [`CompletionClient`]; production sessions
//! share one [`RegistryClient`], tests script replies with mocks.

use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService, ModelRegistry};
use async_trait::async_trait;
use std::sync::Arc;

/// Something that can turn a request into a single completion
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Catalogue id of the model answering requests
    fn model_id(&self) -> &str;
}

#[async_trait]
impl<T: CompletionClient + ?Sized> CompletionClient for Arc<T> {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        T::complete(self, request).await
    }

    fn model_id(&self) -> &str {
        T::model_id(self)
    }
}

/// Client bound to one model of a [`ModelRegistry`]
pub struct RegistryClient {
    registry: Arc<ModelRegistry>,
    model_id: String,
}

impl RegistryClient {
    pub fn new(registry: Arc<ModelRegistry>, model_id: String) -> Self {
        Self { registry, model_id }
    }

    /// The configured model, or the registry default if it has gone away
    fn service(&self) -> Result<Arc<dyn LlmService>, LlmError> {
        self.registry
            .get(&self.model_id)
            .or_else(|| self.registry.default())
            .ok_or_else(|| LlmError::unknown(format!("Model not available: {}", self.model_id)))
    }
}

#[async_trait]
impl CompletionClient for RegistryClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let service = self.service()?;
        LlmService::complete(service.as_ref(), request).await
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::testing::MockCompletionClient;

    #[tokio::test]
    async fn test_registry_client_routes_to_service() {
        let mock = Arc::new(MockCompletionClient::new("mock-model"));
        mock.queue_response(LlmResponse::text("hello there"));
        let registry = Arc::new(ModelRegistry::with_service(mock.clone()));

        let client = RegistryClient::new(registry, "mock-model".to_string());
        let request = LlmRequest::default();
        let response = CompletionClient::complete(&client, &request).await.unwrap();

        assert_eq!(response.content, "hello there");
        assert_eq!(mock.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_model_falls_back_to_default() {
        let mock = Arc::new(MockCompletionClient::new("mock-model"));
        mock.queue_response(LlmResponse::text("fallback"));
        let registry = Arc::new(ModelRegistry::with_service(mock));

        let client = RegistryClient::new(registry, "retired-model".to_string());
        let response = CompletionClient::complete(&client, &LlmRequest::default())
            .await
            .unwrap();
        assert_eq!(response.content, "fallback");
        assert_eq!(client.model_id(), "retired-model");
    }
}
