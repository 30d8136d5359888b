//! Centralized model definitions
//!
//! All models are served through the same `OpenAI`-compatible endpoint, so a
//! definition is just naming and metadata.

/// Model used when `MINDMATE_MODEL` is not set
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Model definition with metadata
#[derive(Debug, Clone)]
pub struct ModelDef {
    /// User-facing model ID
    pub id: &'static str,
    /// API name sent in the request body
    pub api_name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Context window size in tokens
    pub context_window: usize,
}

/// Get all available model definitions
pub fn all_models() -> &'static [ModelDef] {
    &[
        ModelDef {
            id: "llama-3.3-70b-versatile",
            api_name: "llama-3.3-70b-versatile",
            description: "Llama 3.3 70B (balanced, default companion voice)",
            context_window: 131_072,
        },
        ModelDef {
            id: "llama-3.1-8b-instant",
            api_name: "llama-3.1-8b-instant",
            description: "Llama 3.1 8B (fast, lightweight)",
            context_window: 131_072,
        },
        ModelDef {
            id: "llama-4-scout",
            api_name: "meta-llama/llama-4-scout-17b-16e-instruct",
            description: "Llama 4 Scout 17B (newer, efficient)",
            context_window: 131_072,
        },
    ]
}

/// Look up a model definition by its user-facing ID
pub fn find_model(id: &str) -> Option<&'static ModelDef> {
    all_models().iter().find(|m| m.id == id)
}
