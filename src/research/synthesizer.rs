//! Language-model reasoning steps of the research loop.
//!
//! Unlike fetching, these calls are not recovered locally: an LLM failure
//! returns `Err` and aborts the run. The one soft case is unparsable
//! follow-up output, which degrades to [`fallback_query`].

use super::prompts::{
    FOLLOW_UP_INSTRUCTIONS, QUERY_GENERATOR_SYSTEM_PROMPT, RESEARCH_ASSISTANT_SYSTEM_PROMPT,
    SYNTHESIS_INSTRUCTIONS,
};
use super::query::{fallback_query, parse_follow_up_queries};
use crate::llm::{GenerationParams, LLMClient};
use crate::types::{Result, RetrievedSource};
use async_trait::async_trait;

#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Analyse one round's sources in the light of earlier findings.
    async fn synthesize(
        &self,
        topic: &str,
        prior_findings: &str,
        sources: &[RetrievedSource],
    ) -> Result<String>;

    /// Suggest up to three follow-up queries; never returns an empty list.
    async fn generate_follow_up_queries(
        &self,
        topic: &str,
        accumulated_findings: &str,
    ) -> Result<Vec<String>>;
}

/// Temperature used for round syntheses
pub const DEFAULT_SYNTHESIS_TEMPERATURE: f32 = 0.7;

/// Temperature used for follow-up query generation
pub const DEFAULT_QUERY_TEMPERATURE: f32 = 0.8;

/// [`Synthesizer`] backed by an [`LLMClient`].
pub struct LlmSynthesizer {
    llm: Box<dyn LLMClient>,
    synthesis_params: GenerationParams,
    query_params: GenerationParams,
}

impl LlmSynthesizer {
    pub fn new(llm: Box<dyn LLMClient>) -> Self {
        Self {
            llm,
            synthesis_params: GenerationParams::with_temperature(DEFAULT_SYNTHESIS_TEMPERATURE),
            query_params: GenerationParams::with_temperature(DEFAULT_QUERY_TEMPERATURE),
        }
    }

    pub fn with_temperatures(mut self, synthesis: f32, queries: f32) -> Self {
        self.synthesis_params = GenerationParams::with_temperature(synthesis);
        self.query_params = GenerationParams::with_temperature(queries);
        self
    }
}

/// Build the user prompt for a round synthesis.
pub fn synthesis_prompt(topic: &str, prior_findings: &str, sources: &[RetrievedSource]) -> String {
    let prior = if prior_findings.trim().is_empty() {
        "None yet."
    } else {
        prior_findings.trim()
    };

    let results = if sources.is_empty() {
        "No search results were found for this round.".to_string()
    } else {
        sources
            .iter()
            .map(|source| {
                format!(
                    "Title: {}\nURL: {}\nDate: {}\nSnippet: {}\nContent: {}\n---",
                    source.result.title,
                    source.result.link,
                    source.result.date.as_deref().unwrap_or("N/A"),
                    source.result.snippet,
                    source.content.as_prompt_text()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Topic: {}\nPrevious findings: {}\n\nNew search results:\n{}\n\n{}",
        topic, prior, results, SYNTHESIS_INSTRUCTIONS
    )
}

/// Build the user prompt asking for follow-up queries.
pub fn follow_up_prompt(topic: &str, accumulated_findings: &str) -> String {
    format!(
        "Based on our research about \"{}\" and our current findings:\n{}\n\n{}",
        topic,
        accumulated_findings.trim(),
        FOLLOW_UP_INSTRUCTIONS
    )
}

#[async_trait]
impl Synthesizer for LlmSynthesizer {
    async fn synthesize(
        &self,
        topic: &str,
        prior_findings: &str,
        sources: &[RetrievedSource],
    ) -> Result<String> {
        let prompt = synthesis_prompt(topic, prior_findings, sources);
        tracing::debug!(
            model = self.llm.model_name(),
            prompt_chars = prompt.len(),
            "Requesting synthesis"
        );

        self.llm
            .generate_with_params(RESEARCH_ASSISTANT_SYSTEM_PROMPT, &prompt, &self.synthesis_params)
            .await
    }

    async fn generate_follow_up_queries(
        &self,
        topic: &str,
        accumulated_findings: &str,
    ) -> Result<Vec<String>> {
        let prompt = follow_up_prompt(topic, accumulated_findings);
        let response = self
            .llm
            .generate_with_params(QUERY_GENERATOR_SYSTEM_PROMPT, &prompt, &self.query_params)
            .await?;

        let queries = parse_follow_up_queries(&response);
        if queries.is_empty() {
            tracing::warn!("Could not parse follow-up queries, using fallback query");
            return Ok(vec![fallback_query(topic)]);
        }

        Ok(queries)
    }
}
