//! Web search and page retrieval for the research loop.
//!
//! [`ContentFetcher`] is deliberately infallible: transport and provider
//! failures are logged and degrade to an empty result list or to
//! [`FetchedContent::Unavailable`], so a flaky search never aborts a run.
//!
//! [`WebContentFetcher`] is the production implementation. It searches either
//! DuckDuckGo (through `daedra`) or the RapidAPI Google search endpoint, and
//! retrieves page text with `daedra`'s page fetcher.

use crate::types::{AppError, FetchedContent, Result, SearchResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Search + content retrieval capability consumed by the research loop.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Ranked results for `query`, at most top-K. Empty on failure.
    async fn search(&self, query: &str) -> Vec<SearchResult>;

    /// Extracted text for `url`, or `Unavailable` on failure.
    async fn fetch_content(&self, url: &str) -> FetchedContent;
}

/// Default number of search results kept per round
pub const DEFAULT_TOP_K: usize = 3;

/// Default cap on page text handed to the synthesizer, in characters
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 4000;

/// Request settings for the RapidAPI Google search endpoint.
#[derive(Debug, Clone)]
pub struct RapidApiSettings {
    pub api_key: String,
    pub host: String,
    pub endpoint: String,
    pub country: String,
    pub lang: String,
    pub date_range: String,
}

/// Which provider answers search queries.
#[derive(Debug, Clone)]
pub enum SearchBackend {
    /// DuckDuckGo via daedra, no credentials required
    DuckDuckGo,
    /// Google results via RapidAPI
    RapidApi(RapidApiSettings),
}

impl SearchBackend {
    pub fn name(&self) -> &'static str {
        match self {
            SearchBackend::DuckDuckGo => "duckduckgo",
            SearchBackend::RapidApi(_) => "rapidapi",
        }
    }
}

/// Production [`ContentFetcher`] backed by live web services.
pub struct WebContentFetcher {
    backend: SearchBackend,
    client: reqwest::Client,
    top_k: usize,
    max_content_chars: usize,
    fetch_pages: bool,
}

impl WebContentFetcher {
    pub fn new(backend: SearchBackend) -> Self {
        Self {
            backend,
            client: reqwest::Client::new(),
            top_k: DEFAULT_TOP_K,
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
            fetch_pages: true,
        }
    }

    /// Set the number of results kept per search.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the per-page character cap.
    pub fn with_max_content_chars(mut self, max_content_chars: usize) -> Self {
        self.max_content_chars = max_content_chars;
        self
    }

    /// Skip page retrieval entirely; synthesis then works from snippets.
    pub fn with_page_fetching(mut self, enabled: bool) -> Self {
        self.fetch_pages = enabled;
        self
    }

    pub fn backend(&self) -> &SearchBackend {
        &self.backend
    }

    async fn try_search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let mut results = match &self.backend {
            SearchBackend::DuckDuckGo => self.search_duckduckgo(query).await?,
            SearchBackend::RapidApi(settings) => self.search_rapidapi(settings, query).await?,
        };
        results.truncate(self.top_k);
        Ok(results)
    }

    async fn search_duckduckgo(&self, query: &str) -> Result<Vec<SearchResult>> {
        let search_args = daedra::SearchArgs {
            query: query.to_string(),
            options: Some(daedra::SearchOptions {
                num_results: self.top_k,
                ..Default::default()
            }),
        };

        let response = daedra::tools::search::perform_search(&search_args)
            .await
            .map_err(|e| AppError::Search(format!("DuckDuckGo search failed: {}", e)))?;

        Ok(response
            .data
            .iter()
            .map(|r| SearchResult::new(r.title.clone(), r.url.clone(), r.description.clone()))
            .collect())
    }

    async fn search_rapidapi(
        &self,
        settings: &RapidApiSettings,
        query: &str,
    ) -> Result<Vec<SearchResult>> {
        let request = RapidApiRequest {
            query,
            country: &settings.country,
            lang: &settings.lang,
            date_range: &settings.date_range,
        };

        let response = self
            .client
            .post(&settings.endpoint)
            .header("x-rapidapi-key", &settings.api_key)
            .header("x-rapidapi-host", &settings.host)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Search(format!("RapidAPI request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Search(format!(
                "RapidAPI search error: {}",
                response.status()
            )));
        }

        let body: RapidApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("Invalid RapidAPI response: {}", e)))?;

        Ok(body
            .serp
            .into_iter()
            .filter_map(|item| {
                let link = item.link.filter(|link| !link.trim().is_empty())?;
                let mut result = SearchResult::new(item.title, link, item.snippet);
                result.date = item.date;
                Some(result)
            })
            .collect())
    }

    async fn try_fetch(&self, url: &str) -> Result<String> {
        let fetch_args = daedra::VisitPageArgs {
            url: url.to_string(),
            include_images: false,
            selector: None,
        };

        let page = daedra::tools::fetch::fetch_page(&fetch_args)
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to fetch {}: {}", url, e)))?;

        Ok(page.content)
    }
}

#[derive(Serialize)]
struct RapidApiRequest<'a> {
    query: &'a str,
    country: &'a str,
    lang: &'a str,
    #[serde(rename = "dateRange")]
    date_range: &'a str,
}

#[derive(Deserialize)]
struct RapidApiResponse {
    #[serde(default)]
    serp: Vec<RapidApiResult>,
}

#[derive(Deserialize)]
struct RapidApiResult {
    #[serde(default)]
    title: String,
    link: Option<String>,
    #[serde(default)]
    snippet: String,
    date: Option<String>,
}

/// Trim page text to at most `max_chars` characters.
pub fn truncate_content(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((byte_index, _)) => content[..byte_index].to_string(),
        None => content.to_string(),
    }
}

#[async_trait]
impl ContentFetcher for WebContentFetcher {
    async fn search(&self, query: &str) -> Vec<SearchResult> {
        match self.try_search(query).await {
            Ok(results) => {
                tracing::debug!(
                    backend = self.backend.name(),
                    count = results.len(),
                    "Search completed"
                );
                results
            }
            Err(e) => {
                tracing::warn!(backend = self.backend.name(), query, error = %e, "Search failed, continuing with no results");
                Vec::new()
            }
        }
    }

    async fn fetch_content(&self, url: &str) -> FetchedContent {
        if !self.fetch_pages {
            return FetchedContent::Unavailable;
        }

        match self.try_fetch(url).await {
            Ok(content) if !content.trim().is_empty() => {
                FetchedContent::Text(truncate_content(&content, self.max_content_chars))
            }
            Ok(_) => {
                tracing::warn!(url, "Fetched page had no extractable text");
                FetchedContent::Unavailable
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "Content fetch failed");
                FetchedContent::Unavailable
            }
        }
    }
}
