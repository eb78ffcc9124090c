//! Iterative web research
//!
//! This module runs a fixed number of search rounds on a topic, keeps a
//! stable citation number for every URL it encounters, and turns the
//! accumulated findings into a cited Markdown report.
//!
//! # Architecture
//!
//! - [`coordinator::ResearchLoop`] - Drives the search → fetch → synthesize → refine rounds
//! - [`fetcher::ContentFetcher`] - Search and page retrieval, never fails the run
//! - [`synthesizer::Synthesizer`] - LLM analysis and follow-up query generation
//! - [`registry::SourceRegistry`] - URL → citation number bookkeeping
//! - [`report::ReportAssembler`] - Final report generation
//!
//! # Usage
//!
//! ```ignore
//! use webscout::research::{
//!     LlmSynthesizer, ReportAssembler, ReportProfile, ResearchLoop, SearchBackend,
//!     WebContentFetcher,
//! };
//!
//! let research = ResearchLoop::new(
//!     Box::new(WebContentFetcher::new(SearchBackend::DuckDuckGo)),
//!     Box::new(LlmSynthesizer::new(provider.create_client()?)),
//! );
//! let outcome = research.research_topic("quantum computing", 3).await?;
//!
//! let report = ReportAssembler::new(provider.create_client()?)
//!     .build_report(&outcome.steps, &outcome.sources, ReportProfile::Technical)
//!     .await?;
//! println!("{}", report);
//! ```
//!
//! # Research Workflow
//!
//! 1. **Search** - Top results for the current query
//! 2. **Fetch** - Page text for each result, concurrently
//! 3. **Synthesize** - Analysis of the round, given all earlier findings
//! 4. **Register** - New URLs get the next citation number
//! 5. **Refine** - A follow-up query becomes the next round's query

/// Round-by-round research driver.
pub mod coordinator;
/// Persisting reports and step logs.
pub mod export;
/// Search and content retrieval.
pub mod fetcher;
/// Prompt text and report profiles.
pub mod prompts;
/// Query sanitizing and follow-up parsing.
pub mod query;
/// Citation numbering.
pub mod registry;
/// Final report assembly.
pub mod report;
/// LLM-backed synthesis.
pub mod synthesizer;

pub use coordinator::{ResearchLoop, ResearchOutcome, DEFAULT_MAX_STEPS};
pub use export::{save_report, SavedReport};
pub use fetcher::{ContentFetcher, RapidApiSettings, SearchBackend, WebContentFetcher};
pub use prompts::ReportProfile;
pub use registry::{SourceEntry, SourceRegistry};
pub use report::ReportAssembler;
pub use synthesizer::{LlmSynthesizer, Synthesizer};
