//! HTTP API for MindMate

mod assets;
mod handlers;
mod sse;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::llm::ModelRegistry;
use crate::runtime::{RegistryClient, SessionManager};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub llm_registry: Arc<ModelRegistry>,
}

impl AppState {
    pub fn new(llm_registry: Arc<ModelRegistry>) -> Self {
        let model_id = llm_registry.default_model_id().to_string();
        let client = Arc::new(RegistryClient::new(llm_registry.clone(), model_id));
        Self {
            sessions: Arc::new(SessionManager::new(client)),
            llm_registry,
        }
    }
}
