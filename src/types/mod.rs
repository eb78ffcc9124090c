use serde::{Deserialize, Serialize};

// ============= Research Data Types =============

/// A single ranked hit returned by a web search.
///
/// `link` is the identity of the source: the registry keys citation
/// numbers on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
            date: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// Page text retrieved for a search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchedContent {
    Text(String),
    Unavailable,
}

/// Marker substituted into prompts for pages that could not be retrieved.
pub const CONTENT_UNAVAILABLE: &str = "[content unavailable]";

impl FetchedContent {
    /// Text to embed in a prompt, falling back to [`CONTENT_UNAVAILABLE`].
    pub fn as_prompt_text(&self) -> &str {
        match self {
            FetchedContent::Text(text) => text,
            FetchedContent::Unavailable => CONTENT_UNAVAILABLE,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, FetchedContent::Text(_))
    }
}

/// A search result paired with whatever content could be fetched for it.
#[derive(Debug, Clone)]
pub struct RetrievedSource {
    pub result: SearchResult,
    pub content: FetchedContent,
}

/// One completed research round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchStep {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub synthesis: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("LLM error: {0}")]
    LLM(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_content_renders_marker() {
        assert_eq!(
            FetchedContent::Unavailable.as_prompt_text(),
            CONTENT_UNAVAILABLE
        );
        assert!(!FetchedContent::Unavailable.is_available());

        let text = FetchedContent::Text("body".to_string());
        assert_eq!(text.as_prompt_text(), "body");
        assert!(text.is_available());
    }

    #[test]
    fn test_search_result_serializes_without_missing_date() {
        let result = SearchResult::new("Title", "https://a.example", "snippet");
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("date").is_none());

        let dated = result.with_date("2024-05-01");
        let json = serde_json::to_value(&dated).unwrap();
        assert_eq!(json["date"], "2024-05-01");
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::LLM("model offline".to_string());
        assert_eq!(err.to_string(), "LLM error: model offline");
    }
}
