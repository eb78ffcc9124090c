//! TOML-based configuration for webscout
//!
//! All settings live in `webscout.toml`. Secrets never appear in the file:
//! it names the environment variables that hold them, and those variables
//! are checked when the configuration is validated.

use crate::llm::Provider;
use crate::research::fetcher::{RapidApiSettings, SearchBackend, WebContentFetcher};
use crate::research::prompts::ReportProfile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "webscout.toml";

/// Root configuration structure loaded from webscout.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebscoutConfig {
    pub llm: LlmConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub research: ResearchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

// ============= LLM Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: ProviderConfig,

    #[serde(default = "default_synthesis_temperature")]
    pub synthesis_temperature: f32,

    #[serde(default = "default_query_temperature")]
    pub query_temperature: f32,

    #[serde(default = "default_report_temperature")]
    pub report_temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
        model: String,
    },
    OpenAI {
        /// Environment variable containing API key
        #[serde(default = "default_openai_key_env")]
        api_key_env: String,
        #[serde(default = "default_openai_base")]
        api_base: String,
        model: String,
    },
}

fn default_synthesis_temperature() -> f32 {
    0.7
}

fn default_query_temperature() -> f32 {
    0.8
}

fn default_report_temperature() -> f32 {
    0.7
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_openai_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_openai_base() -> String {
    "https://api.openai.com/v1".to_string()
}

// ============= Search Configuration =============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchBackendKind {
    #[default]
    DuckDuckGo,
    RapidApi,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub backend: SearchBackendKind,

    /// Results kept per round
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Per-page character cap for fetched content
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,

    /// Whether to retrieve full page text at all
    #[serde(default = "default_true")]
    pub fetch_content: bool,

    #[serde(default)]
    pub rapidapi: RapidApiConfig,
}

fn default_top_k() -> usize {
    3
}

fn default_max_content_chars() -> usize {
    4000
}

fn default_true() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            backend: SearchBackendKind::default(),
            top_k: default_top_k(),
            max_content_chars: default_max_content_chars(),
            fetch_content: true,
            rapidapi: RapidApiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RapidApiConfig {
    /// Environment variable containing the RapidAPI key
    #[serde(default = "default_rapidapi_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_rapidapi_host")]
    pub host: String,

    #[serde(default = "default_rapidapi_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_country")]
    pub country: String,

    #[serde(default = "default_lang")]
    pub lang: String,

    #[serde(default = "default_date_range")]
    pub date_range: String,
}

fn default_rapidapi_key_env() -> String {
    "RAPIDAPI_KEY".to_string()
}

fn default_rapidapi_host() -> String {
    "affordable-google-search-api.p.rapidapi.com".to_string()
}

fn default_rapidapi_endpoint() -> String {
    "https://affordable-google-search-api.p.rapidapi.com/api/google/search".to_string()
}

fn default_country() -> String {
    "us".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_date_range() -> String {
    "lastYear".to_string()
}

impl Default for RapidApiConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_rapidapi_key_env(),
            host: default_rapidapi_host(),
            endpoint: default_rapidapi_endpoint(),
            country: default_country(),
            lang: default_lang(),
            date_range: default_date_range(),
        }
    }
}

// ============= Research Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// One of comprehensive, technical, market, summary
    #[serde(default = "default_report_profile")]
    pub report_profile: String,

    /// Directory receiving saved reports and step logs
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_max_steps() -> usize {
    3
}

fn default_report_profile() -> String {
    "comprehensive".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("research_reports")
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            report_profile: default_report_profile(),
            output_dir: default_output_dir(),
        }
    }
}

// ============= Logging Configuration =============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// ============= Validation =============

/// Non-fatal configuration issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl WebscoutConfig {
    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Parse configuration text without validating it
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Validate value ranges and env var availability
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let ProviderConfig::OpenAI { api_key_env, .. } = &self.llm.provider {
            self.validate_env_var(api_key_env)?;
        }

        if self.search.backend == SearchBackendKind::RapidApi {
            self.validate_env_var(&self.search.rapidapi.api_key_env)?;
        }

        for (name, value) in [
            ("llm.synthesis_temperature", self.llm.synthesis_temperature),
            ("llm.query_temperature", self.llm.query_temperature),
            ("llm.report_temperature", self.llm.report_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be between 0.0 and 2.0, got {}",
                    name, value
                )));
            }
        }

        if self.search.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "search.top_k must be at least 1".to_string(),
            ));
        }

        if self.search.max_content_chars == 0 {
            return Err(ConfigError::ValidationError(
                "search.max_content_chars must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate and collect warnings for settings that work but look wrong
    pub fn validate_with_warnings(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        self.validate()?;

        let mut warnings = Vec::new();

        if self.research.report_profile.parse::<ReportProfile>().is_err() {
            warnings.push(ConfigWarning {
                message: format!(
                    "Unknown report profile '{}', the comprehensive profile will be used",
                    self.research.report_profile
                ),
            });
        }

        if self.research.max_steps == 0 {
            warnings.push(ConfigWarning {
                message: "research.max_steps is 0, runs will produce no research steps"
                    .to_string(),
            });
        }

        if !self.search.fetch_content {
            warnings.push(ConfigWarning {
                message: "search.fetch_content is disabled, synthesis will only see snippets"
                    .to_string(),
            });
        }

        Ok(warnings)
    }

    fn validate_env_var(&self, name: &str) -> Result<(), ConfigError> {
        std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))?;
        Ok(())
    }

    /// Get a resolved value from an env var reference
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        std::env::var(env_name).ok()
    }

    /// Runtime LLM provider with secrets resolved
    pub fn provider(&self) -> Result<Provider, ConfigError> {
        match &self.llm.provider {
            ProviderConfig::Ollama { base_url, model } => Ok(Provider::Ollama {
                base_url: base_url.clone(),
                model: model.clone(),
            }),
            ProviderConfig::OpenAI {
                api_key_env,
                api_base,
                model,
            } => Ok(Provider::OpenAI {
                api_key: self
                    .resolve_env(api_key_env)
                    .ok_or_else(|| ConfigError::MissingEnvVar(api_key_env.clone()))?,
                api_base: api_base.clone(),
                model: model.clone(),
            }),
        }
    }

    /// Search backend with secrets resolved
    pub fn search_backend(&self) -> Result<SearchBackend, ConfigError> {
        match self.search.backend {
            SearchBackendKind::DuckDuckGo => Ok(SearchBackend::DuckDuckGo),
            SearchBackendKind::RapidApi => {
                let rapidapi = &self.search.rapidapi;
                let api_key = self
                    .resolve_env(&rapidapi.api_key_env)
                    .ok_or_else(|| ConfigError::MissingEnvVar(rapidapi.api_key_env.clone()))?;

                Ok(SearchBackend::RapidApi(RapidApiSettings {
                    api_key,
                    host: rapidapi.host.clone(),
                    endpoint: rapidapi.endpoint.clone(),
                    country: rapidapi.country.clone(),
                    lang: rapidapi.lang.clone(),
                    date_range: rapidapi.date_range.clone(),
                }))
            }
        }
    }

    /// Content fetcher configured from the `[search]` section
    pub fn content_fetcher(&self) -> Result<WebContentFetcher, ConfigError> {
        Ok(WebContentFetcher::new(self.search_backend()?)
            .with_top_k(self.search.top_k)
            .with_max_content_chars(self.search.max_content_chars)
            .with_page_fetching(self.search.fetch_content))
    }

    /// Configured report profile, falling back to comprehensive
    pub fn report_profile(&self) -> ReportProfile {
        ReportProfile::from_name(&self.research.report_profile)
    }
}
