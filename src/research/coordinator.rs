use super::fetcher::ContentFetcher;
use super::query::{fallback_query, sanitize_query};
use super::registry::SourceRegistry;
use super::synthesizer::Synthesizer;
use crate::types::{AppError, FetchedContent, ResearchStep, Result, RetrievedSource};
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashMap;
use tracing::Instrument;
use uuid::Uuid;

/// Default number of research rounds
pub const DEFAULT_MAX_STEPS: usize = 3;

/// Everything a completed run hands to the report assembler.
#[derive(Debug, Clone, Serialize)]
pub struct ResearchOutcome {
    pub run_id: Uuid,
    pub topic: String,
    pub steps: Vec<ResearchStep>,
    pub sources: SourceRegistry,
}

/// Mutable state of one `research_topic` invocation.
struct RunState {
    topic: String,
    current_query: String,
    accumulated_findings: String,
    steps: Vec<ResearchStep>,
}

impl RunState {
    fn new(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
            current_query: topic.to_string(),
            accumulated_findings: String::new(),
            steps: Vec::new(),
        }
    }

    fn record_synthesis(&mut self, synthesis: &str) {
        if !self.accumulated_findings.is_empty() {
            self.accumulated_findings.push('\n');
        }
        self.accumulated_findings.push_str(synthesis);
    }
}

/// Drives the multi-round search → fetch → synthesize → refine cycle.
///
/// Rounds run strictly in order because each synthesis sees the findings of
/// all earlier rounds. Search and fetch problems degrade the round; any
/// synthesizer error aborts the whole run.
pub struct ResearchLoop {
    fetcher: Box<dyn ContentFetcher>,
    synthesizer: Box<dyn Synthesizer>,
}

impl ResearchLoop {
    pub fn new(fetcher: Box<dyn ContentFetcher>, synthesizer: Box<dyn Synthesizer>) -> Self {
        Self {
            fetcher,
            synthesizer,
        }
    }

    /// Research `topic` for `max_steps` rounds.
    ///
    /// Returns exactly `max_steps` steps. With `max_steps` zero nothing is
    /// called and the outcome is empty, whatever the topic.
    pub async fn research_topic(&self, topic: &str, max_steps: usize) -> Result<ResearchOutcome> {
        let topic = topic.trim();
        let run_id = Uuid::new_v4();
        let mut state = RunState::new(topic);
        let mut sources = SourceRegistry::new();

        if max_steps == 0 {
            tracing::debug!(%run_id, "No research rounds requested");
            return Ok(ResearchOutcome {
                run_id,
                topic: state.topic,
                steps: state.steps,
                sources,
            });
        }

        if topic.is_empty() {
            return Err(AppError::InvalidInput("Research topic is empty".to_string()));
        }

        tracing::info!(%run_id, topic, max_steps, "Starting research");

        for round in 0..max_steps {
            let span = tracing::info_span!("round", round = round + 1, query = %state.current_query);
            self.run_round(&mut state, &mut sources, round)
                .instrument(span)
                .await?;

            if round + 1 < max_steps {
                state.current_query = self.next_query(&state).await?;
            }
        }

        tracing::info!(
            %run_id,
            steps = state.steps.len(),
            sources = sources.len(),
            "Research complete"
        );

        Ok(ResearchOutcome {
            run_id,
            topic: state.topic,
            steps: state.steps,
            sources,
        })
    }

    async fn run_round(
        &self,
        state: &mut RunState,
        sources: &mut SourceRegistry,
        round: usize,
    ) -> Result<()> {
        tracing::info!("Research step {}: {}", round + 1, state.current_query);

        let results = self.fetcher.search(&state.current_query).await;
        if results.is_empty() {
            tracing::warn!("No search results, synthesizing from prior findings only");
        }

        let contents = self.fetch_all(results.iter().map(|r| r.link.as_str())).await;
        let retrieved: Vec<RetrievedSource> = results
            .iter()
            .map(|result| RetrievedSource {
                result: result.clone(),
                content: contents
                    .get(result.link.as_str())
                    .cloned()
                    .unwrap_or(FetchedContent::Unavailable),
            })
            .collect();

        let synthesis = self
            .synthesizer
            .synthesize(&state.topic, &state.accumulated_findings, &retrieved)
            .await?;
        state.record_synthesis(&synthesis);

        for result in &results {
            sources.register(&result.link, round);
        }

        state.steps.push(ResearchStep {
            query: state.current_query.clone(),
            results,
            synthesis,
        });

        Ok(())
    }

    /// Fetch each distinct link once, concurrently.
    async fn fetch_all<'a>(
        &self,
        links: impl Iterator<Item = &'a str>,
    ) -> HashMap<&'a str, FetchedContent> {
        let mut unique: Vec<&'a str> = Vec::new();
        for link in links {
            if !unique.contains(&link) {
                unique.push(link);
            }
        }

        let fetched = join_all(unique.iter().map(|link| self.fetcher.fetch_content(link))).await;
        let unavailable = fetched.iter().filter(|c| !c.is_available()).count();
        if unavailable > 0 {
            tracing::warn!(unavailable, total = unique.len(), "Some page content was unavailable");
        }

        unique.into_iter().zip(fetched).collect()
    }

    /// First usable follow-up suggestion, or the fallback query.
    async fn next_query(&self, state: &RunState) -> Result<String> {
        let suggestions = self
            .synthesizer
            .generate_follow_up_queries(&state.topic, &state.accumulated_findings)
            .await?;

        let next = suggestions
            .iter()
            .map(|query| sanitize_query(query))
            .find(|query| !query.is_empty())
            .unwrap_or_else(|| {
                tracing::warn!("No usable follow-up query, using fallback");
                fallback_query(&state.topic)
            });

        tracing::debug!(
            suggested = suggestions.len(),
            next = %next,
            "Selected next query"
        );
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchResult;
    use async_trait::async_trait;

    struct StaticFetcher;

    #[async_trait]
    impl ContentFetcher for StaticFetcher {
        async fn search(&self, query: &str) -> Vec<SearchResult> {
            vec![SearchResult::new(
                query,
                format!("https://{}.example", query.replace(' ', "-")),
                "snippet",
            )]
        }

        async fn fetch_content(&self, _url: &str) -> FetchedContent {
            FetchedContent::Text("body".to_string())
        }
    }

    struct EchoSynthesizer;

    #[async_trait]
    impl Synthesizer for EchoSynthesizer {
        async fn synthesize(
            &self,
            _topic: &str,
            _prior_findings: &str,
            sources: &[RetrievedSource],
        ) -> Result<String> {
            Ok(format!("saw {} sources", sources.len()))
        }

        async fn generate_follow_up_queries(
            &self,
            _topic: &str,
            _accumulated_findings: &str,
        ) -> Result<Vec<String>> {
            Ok(vec!["next query".to_string()])
        }
    }

    fn research_loop() -> ResearchLoop {
        ResearchLoop::new(Box::new(StaticFetcher), Box::new(EchoSynthesizer))
    }

    #[test]
    fn test_record_synthesis_separates_with_newline() {
        let mut state = RunState::new("topic");
        state.record_synthesis("first");
        state.record_synthesis("second");
        assert_eq!(state.accumulated_findings, "first\nsecond");
    }

    #[tokio::test]
    async fn test_zero_steps_is_empty() {
        let outcome = research_loop().research_topic("topic", 0).await.unwrap();
        assert!(outcome.steps.is_empty());
        assert!(outcome.sources.is_empty());
    }

    #[tokio::test]
    async fn test_zero_steps_ignores_blank_topic() {
        let outcome = research_loop().research_topic("  ", 0).await.unwrap();
        assert!(outcome.steps.is_empty());
        assert_eq!(outcome.topic, "");
    }

    #[tokio::test]
    async fn test_empty_topic_rejected() {
        let result = research_loop().research_topic("   ", 3).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_follow_up_drives_next_round() {
        let outcome = research_loop().research_topic("topic", 2).await.unwrap();
        assert_eq!(outcome.topic, "topic");
        assert_eq!(outcome.steps[0].query, "topic");
        assert_eq!(outcome.steps[1].query, "next query");
        assert_eq!(outcome.steps[1].synthesis, "saw 1 sources");
        assert_eq!(
            outcome.sources.references(),
            "[1] https://topic.example\n[2] https://next-query.example"
        );
    }
}
