//! LLM Provider Clients and Abstractions
//!
//! This module provides a unified interface for interacting with the Large
//! Language Model providers the research agent can use. Provider specifics stay
//! behind the [`LLMClient`] trait so the synthesizer and report assembler work
//! with any of them.
//!
//! # Supported Providers
//!
//! Enable providers via Cargo features:
//! - `openai` - OpenAI API (GPT-4o, etc.) and compatible gateways
//! - `ollama` - Local Ollama server
//!
//! # Example
//!
//! ```ignore
//! use webscout::llm::{GenerationParams, Provider};
//!
//! let client = Provider::Ollama {
//!     base_url: "http://localhost:11434".to_string(),
//!     model: "llama3.2".to_string(),
//! }
//! .create_client()?;
//!
//! let answer = client
//!     .generate_with_params(
//!         "You are a research assistant",
//!         "What is 2+2?",
//!         &GenerationParams::with_temperature(0.7),
//!     )
//!     .await?;
//! ```

/// Core LLM client trait and provider selection.
pub mod client;

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "openai")]
pub mod openai;

pub use client::{GenerationParams, LLMClient, Provider};
