//! LLM Client abstractions and provider selection
//!
//! This module provides a unified interface for the language-model calls the
//! research loop makes:
//! - **OpenAI**: Chat completions API (and compatible endpoints)
//! - **Ollama**: Local LLM inference

use crate::types::{AppError, Result};
use async_trait::async_trait;

/// Sampling parameters for a single generation request
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationParams {
    /// Sampling temperature; provider default when `None`
    pub temperature: Option<f32>,
}

impl GenerationParams {
    /// Parameters with an explicit temperature
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature: Some(temperature),
        }
    }
}

/// Generic LLM client trait for provider abstraction
///
/// All LLM providers implement this trait, allowing the synthesizer and the
/// report assembler to swap providers without changing research code.
/// A response without content is returned as an empty string, not an error.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate with system prompt and explicit sampling parameters
    async fn generate_with_params(
        &self,
        system: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime selection
///
/// | Provider | Feature | Notes |
/// |----------|---------|-------|
/// | OpenAI | `openai` | Hosted, also OpenAI-compatible gateways |
/// | Ollama | `ollama` | Local inference |
#[derive(Debug, Clone)]
pub enum Provider {
    /// OpenAI API provider (including Azure OpenAI and compatible APIs)
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::OpenAI {
    ///     api_key: "sk-...".to_string(),
    ///     api_base: "https://api.openai.com/v1".to_string(),
    ///     model: "gpt-4o".to_string(),
    /// };
    /// ```
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
    },

    /// Ollama local LLM provider
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::Ollama {
    ///     base_url: "http://localhost:11434".to_string(),
    ///     model: "llama3.2".to_string(),
    /// };
    /// ```
    Ollama { base_url: String, model: String },
}

impl Provider {
    /// Create a client instance for this provider
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The provider's Cargo feature is not enabled
    /// - The provider configuration is invalid (e.g. malformed base URL)
    pub fn create_client(&self) -> Result<Box<dyn LLMClient>> {
        match self {
            #[cfg(feature = "openai")]
            Provider::OpenAI {
                api_key,
                api_base,
                model,
            } => Ok(Box::new(super::openai::OpenAIClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
            ))),

            #[cfg(feature = "ollama")]
            Provider::Ollama { base_url, model } => Ok(Box::new(
                super::ollama::OllamaClient::new(base_url, model.clone())?,
            )),

            #[allow(unreachable_patterns)]
            other => Err(AppError::Config(format!(
                "{} provider is not enabled in this build (enable the '{}' feature)",
                other.name(),
                other.feature()
            ))),
        }
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI { .. } => "OpenAI",
            Provider::Ollama { .. } => "Ollama",
        }
    }

    /// Model identifier configured for this provider
    pub fn model(&self) -> &str {
        match self {
            Provider::OpenAI { model, .. } | Provider::Ollama { model, .. } => model,
        }
    }

    fn feature(&self) -> &'static str {
        match self {
            Provider::OpenAI { .. } => "openai",
            Provider::Ollama { .. } => "ollama",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_name() {
        let openai = Provider::OpenAI {
            api_key: "".to_string(),
            api_base: "".to_string(),
            model: "gpt-4o".to_string(),
        };
        assert_eq!(openai.name(), "OpenAI");
        assert_eq!(openai.model(), "gpt-4o");

        let ollama = Provider::Ollama {
            base_url: "".to_string(),
            model: "llama3.2".to_string(),
        };
        assert_eq!(ollama.name(), "Ollama");
        assert_eq!(ollama.model(), "llama3.2");
    }

    #[test]
    fn test_generation_params() {
        assert_eq!(GenerationParams::default().temperature, None);
        assert_eq!(
            GenerationParams::with_temperature(0.8).temperature,
            Some(0.8)
        );
    }

    #[cfg(feature = "ollama")]
    #[test]
    fn test_ollama_rejects_malformed_base_url() {
        let provider = Provider::Ollama {
            base_url: "not a url".to_string(),
            model: "llama3.2".to_string(),
        };

        let err = match provider.create_client() {
            Ok(_) => panic!("Expected error"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("not a url"));
    }
}
