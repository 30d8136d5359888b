//! Model registry built from environment configuration

use super::models::find_model;
use super::{all_models, LlmService, LoggingService, OpenAIService, DEFAULT_MODEL};
use crate::config::ConfigError;
use std::collections::HashMap;
use std::sync::Arc;

/// Configuration for the completion provider
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    /// Model ID from the catalogue
    pub model: Option<String>,
    /// Override of the `OpenAI`-compatible base URL
    pub api_base: Option<String>,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GROQ_API_KEY").ok(),
            model: std::env::var("MINDMATE_MODEL").ok(),
            api_base: std::env::var("MINDMATE_API_BASE").ok(),
        }
    }
}

/// Registry of available LLM models
pub struct ModelRegistry {
    services: HashMap<String, Arc<dyn LlmService>>,
    default_model: String,
}

impl ModelRegistry {
    /// Build a service for every catalogued model.
    ///
    /// A missing or empty API key is fatal, as is a configured model that is
    /// not in the catalogue.
    pub fn new(config: &LlmConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let default_model = config
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        if find_model(&default_model).is_none() {
            return Err(ConfigError::UnknownModel(default_model));
        }

        let mut services: HashMap<String, Arc<dyn LlmService>> = HashMap::new();
        for model_def in all_models() {
            let service = OpenAIService::new(
                api_key.to_string(),
                model_def.id,
                model_def.api_name,
                config.api_base.as_deref(),
            )
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
            tracing::debug!(model = model_def.id, endpoint = service.endpoint(), "Registered model");
            services.insert(
                model_def.id.to_string(),
                Arc::new(LoggingService::new(Arc::new(service))),
            );
        }

        Ok(Self {
            services,
            default_model,
        })
    }

    /// Registry around a single pre-built service
    #[cfg(test)]
    pub fn with_service(service: Arc<dyn LlmService>) -> Self {
        let default_model = service.model_id().to_string();
        let mut services = HashMap::new();
        services.insert(default_model.clone(), service);
        Self {
            services,
            default_model,
        }
    }

    /// Get a model by ID
    pub fn get(&self, model_id: &str) -> Option<Arc<dyn LlmService>> {
        self.services.get(model_id).cloned()
    }

    /// Get the default model
    pub fn default(&self) -> Option<Arc<dyn LlmService>> {
        self.get(&self.default_model)
    }

    /// Get the default model ID
    pub fn default_model_id(&self) -> &str {
        &self.default_model
    }

    /// List all available model IDs
    pub fn available_models(&self) -> Vec<String> {
        let mut models: Vec<_> = self.services.keys().cloned().collect();
        models.sort();
        models
    }

    /// Get detailed information about available models
    pub fn available_model_info(&self) -> Vec<crate::api::ModelInfo> {
        all_models()
            .iter()
            .filter(|def| self.services.contains_key(def.id))
            .map(|def| crate::api::ModelInfo {
                id: def.id.to_string(),
                description: def.description.to_string(),
                context_window: def.context_window,
            })
            .collect()
    }
}
