//! Mock implementations for testing.
//!
//! This module provides mock collaborators for the research loop that can be
//! used across different test files without duplication. Every mock records
//! what it was asked through shared handles, so a clone kept by the test
//! still sees the calls made through the boxed copy owned by the loop.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use webscout::llm::{GenerationParams, LLMClient};
use webscout::research::{ContentFetcher, Synthesizer};
use webscout::types::{AppError, FetchedContent, Result, RetrievedSource, SearchResult};

/// Mock LLM client with a fixed response.
///
/// # Examples
///
/// ```ignore
/// let client = MockLLMClient::new("# Report");
/// let client = MockLLMClient::failing();
/// ```
#[derive(Clone)]
pub struct MockLLMClient {
    response: String,
    should_fail: bool,
    calls: Arc<Mutex<Vec<(String, String, GenerationParams)>>>,
}

impl MockLLMClient {
    /// Create a new mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            calls: Arc::default(),
        }
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            should_fail: true,
            calls: Arc::default(),
        }
    }

    /// `(system, prompt, params)` for every call so far.
    pub fn calls(&self) -> Vec<(String, String, GenerationParams)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate_with_params(
        &self,
        system: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string(), *params));

        if self.should_fail {
            return Err(AppError::LLM("Mock LLM failure".to_string()));
        }
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Mock fetcher serving canned search results and page text.
///
/// Unknown queries return no results. Links registered with
/// [`MockFetcher::failing_link`] behave like a failed fetch.
#[derive(Clone, Default)]
pub struct MockFetcher {
    results: HashMap<String, Vec<SearchResult>>,
    pages: HashMap<String, String>,
    failing_links: HashSet<String>,
    queries: Arc<Mutex<Vec<String>>>,
    fetched: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve results with these links (titled after the link) for `query`.
    pub fn with_results(mut self, query: &str, links: &[&str]) -> Self {
        let results = links
            .iter()
            .map(|link| SearchResult::new(format!("Title of {}", link), *link, "snippet"))
            .collect();
        self.results.insert(query.to_string(), results);
        self
    }

    /// Serve `text` when `link` is fetched.
    pub fn with_page(mut self, link: &str, text: &str) -> Self {
        self.pages.insert(link.to_string(), text.to_string());
        self
    }

    /// Make fetching `link` fail.
    pub fn failing_link(mut self, link: &str) -> Self {
        self.failing_links.insert(link.to_string());
        self
    }

    /// Queries searched so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// Links fetched so far.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentFetcher for MockFetcher {
    async fn search(&self, query: &str) -> Vec<SearchResult> {
        self.queries.lock().unwrap().push(query.to_string());
        self.results.get(query).cloned().unwrap_or_default()
    }

    async fn fetch_content(&self, url: &str) -> FetchedContent {
        self.fetched.lock().unwrap().push(url.to_string());
        if self.failing_links.contains(url) {
            return FetchedContent::Unavailable;
        }
        FetchedContent::Text(
            self.pages
                .get(url)
                .cloned()
                .unwrap_or_else(|| format!("content of {}", url)),
        )
    }
}

/// One recorded `synthesize` call.
#[derive(Debug, Clone)]
pub struct SynthesisCall {
    pub topic: String,
    pub prior_findings: String,
    pub sources: Vec<RetrievedSource>,
}

/// Mock synthesizer returning `finding <n>` for the n-th round.
///
/// Follow-up suggestions are served from a queue, one list per call; once
/// the queue is empty it suggests nothing.
#[derive(Clone, Default)]
pub struct MockSynthesizer {
    follow_ups: Arc<Mutex<Vec<Vec<String>>>>,
    fail_on_call: Option<usize>,
    fail_follow_ups: bool,
    calls: Arc<Mutex<Vec<SynthesisCall>>>,
    follow_up_calls: Arc<Mutex<usize>>,
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the suggestion lists returned by successive follow-up calls.
    pub fn with_follow_ups(self, follow_ups: Vec<Vec<&str>>) -> Self {
        *self.follow_ups.lock().unwrap() = follow_ups
            .into_iter()
            .map(|queries| queries.into_iter().map(str::to_string).collect())
            .collect();
        self
    }

    /// Fail the synthesis call with this zero-based index.
    pub fn failing_on_call(mut self, index: usize) -> Self {
        self.fail_on_call = Some(index);
        self
    }

    /// Make every follow-up request fail.
    pub fn failing_follow_ups(mut self) -> Self {
        self.fail_follow_ups = true;
        self
    }

    pub fn calls(&self) -> Vec<SynthesisCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn follow_up_calls(&self) -> usize {
        *self.follow_up_calls.lock().unwrap()
    }
}

#[async_trait]
impl Synthesizer for MockSynthesizer {
    async fn synthesize(
        &self,
        topic: &str,
        prior_findings: &str,
        sources: &[RetrievedSource],
    ) -> Result<String> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        calls.push(SynthesisCall {
            topic: topic.to_string(),
            prior_findings: prior_findings.to_string(),
            sources: sources.to_vec(),
        });

        if self.fail_on_call == Some(index) {
            return Err(AppError::LLM("Mock synthesis failure".to_string()));
        }
        Ok(format!("finding {}", index + 1))
    }

    async fn generate_follow_up_queries(
        &self,
        _topic: &str,
        _accumulated_findings: &str,
    ) -> Result<Vec<String>> {
        *self.follow_up_calls.lock().unwrap() += 1;

        if self.fail_follow_ups {
            return Err(AppError::LLM("Mock follow-up failure".to_string()));
        }

        let mut queue = self.follow_ups.lock().unwrap();
        if queue.is_empty() {
            return Ok(Vec::new());
        }
        Ok(queue.remove(0))
    }
}
