//! # webscout - Iterative web research with cited reports
//!
//! webscout researches a topic over a fixed number of rounds. Each round
//! searches the web, fetches the top pages, asks a language model to
//! synthesize what was found in light of earlier rounds, and derives the
//! next query from the accumulated findings. At the end the findings are
//! turned into a Markdown report whose `[n]` citations map to a stable,
//! first-seen numbering of every URL encountered.
//!
//! ## Overview
//!
//! webscout can be used in two ways:
//!
//! 1. **As a command-line tool** - Run the `webscout` binary
//! 2. **As a library** - Drive [`ResearchLoop`] with your own collaborators
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use webscout::research::{
//!     LlmSynthesizer, ReportAssembler, ReportProfile, ResearchLoop, SearchBackend,
//!     WebContentFetcher,
//! };
//! use webscout::Provider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Provider::Ollama {
//!         base_url: "http://localhost:11434".to_string(),
//!         model: "llama3.2".to_string(),
//!     };
//!
//!     let research = ResearchLoop::new(
//!         Box::new(WebContentFetcher::new(SearchBackend::DuckDuckGo)),
//!         Box::new(LlmSynthesizer::new(provider.create_client()?)),
//!     );
//!     let outcome = research.research_topic("quantum computing", 3).await?;
//!
//!     let report = ReportAssembler::new(provider.create_client()?)
//!         .build_report(&outcome.steps, &outcome.sources, ReportProfile::Comprehensive)
//!         .await?;
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```
//!
//! ### Custom collaborators
//!
//! [`ContentFetcher`] and [`Synthesizer`] are traits, so the loop can run
//! against any search provider or model, including test doubles.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `openai` | OpenAI API and compatible endpoints (default) |
//! | `ollama` | Local inference through an Ollama server (default) |
//!
//! ## Modules
//!
//! - [`research`] - The research loop, citation registry and report assembly
//! - [`llm`] - LLM client trait and providers
//! - [`cli`] - Command-line interface
//! - [`utils`] - Configuration and logging
//! - [`types`] - Shared data types and errors

/// Command-line interface.
pub mod cli;
/// LLM provider clients and abstractions.
pub mod llm;
/// Iterative research loop and report assembly.
pub mod research;
/// Core types (search results, steps, errors).
pub mod types;
/// Configuration and logging utilities.
pub mod utils;

// Re-export commonly used types
pub use llm::{GenerationParams, LLMClient, Provider};
pub use research::{
    ContentFetcher, ReportAssembler, ReportProfile, ResearchLoop, ResearchOutcome,
    SourceRegistry, Synthesizer,
};
pub use types::{AppError, ResearchStep, Result, SearchResult};
pub use utils::toml_config::WebscoutConfig;
