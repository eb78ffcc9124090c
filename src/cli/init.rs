//! Init command implementation
//!
//! Scaffolds a webscout project: `webscout.toml`, `.env.example` and a
//! `.gitignore` that keeps secrets and generated reports out of git.

use super::output::Output;
use super::ProviderChoice;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug)]
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// Project already exists (webscout.toml found)
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// LLM provider to configure
    pub provider: ProviderChoice,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing webscout project");

    let base_path = &config.path;

    let config_path = base_path.join("webscout.toml");
    if config_path.exists() && !config.force {
        output.warning("webscout.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    if !base_path.exists() {
        if let Err(e) = fs::create_dir_all(base_path) {
            output.error(&format!("Failed to create {}: {}", base_path.display(), e));
            return InitResult::Error(e.to_string());
        }
    }

    let toml_content = generate_webscout_toml(config.provider);
    if let Err(e) = write_file(&config_path, &toml_content, config.force) {
        output.error(&format!("Failed to create webscout.toml: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", "webscout.toml");

    let env_example_path = base_path.join(".env.example");
    if env_example_path.exists() && !config.force {
        output.skipped(".env.example", "already exists");
    } else if let Err(e) = write_file(&env_example_path, &generate_env_example(), config.force) {
        output.error(&format!("Failed to create .env.example: {}", e));
        return InitResult::Error(e.to_string());
    } else {
        output.created("env", ".env.example");
    }

    let gitignore_path = base_path.join(".gitignore");
    if !gitignore_path.exists() {
        if let Err(e) = write_file(&gitignore_path, &generate_gitignore(), false) {
            output.warning(&format!("Failed to create .gitignore: {}", e));
        } else {
            output.created("file", ".gitignore");
        }
    }

    output.complete("webscout project initialized successfully!");

    output.header("Next Steps");
    output.newline();
    for (number, step) in next_steps(config.provider).iter().enumerate() {
        output.info(&format!("{}. {}", number + 1, step.title));
        for command in &step.commands {
            output.command(command);
        }
        output.newline();
    }

    output.hint("Reports are saved to research_reports/ unless --no-save is given");

    InitResult::Success
}

struct NextStep {
    title: &'static str,
    commands: Vec<&'static str>,
}

fn next_steps(provider: ProviderChoice) -> Vec<NextStep> {
    let mut steps = vec![NextStep {
        title: "Set up environment variables:",
        commands: vec![
            "cp .env.example .env",
            match provider {
                ProviderChoice::Openai => "# Edit .env and set OPENAI_API_KEY",
                ProviderChoice::Ollama => "# Edit .env only if you use the RapidAPI backend",
            },
        ],
    }];

    if provider == ProviderChoice::Ollama {
        steps.push(NextStep {
            title: "Start Ollama (if not running):",
            commands: vec![
                "ollama serve",
                "ollama pull llama3.2  # or your preferred model",
            ],
        });
    }

    steps.push(NextStep {
        title: "Research a topic:",
        commands: vec!["webscout research \"quantum computing\""],
    });
    steps
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(());
    }
    fs::write(path, content)
}

fn generate_webscout_toml(provider: ProviderChoice) -> String {
    let provider_section = match provider {
        ProviderChoice::Openai => {
            r#"# OpenAI API (set OPENAI_API_KEY in .env)
[llm.provider]
type = "openai"
api_key_env = "OPENAI_API_KEY"
api_base = "https://api.openai.com/v1"
model = "gpt-4o-mini"
"#
        }
        ProviderChoice::Ollama => {
            r#"# Ollama - Local inference
[llm.provider]
type = "ollama"
base_url = "http://localhost:11434"
model = "llama3.2"
"#
        }
    };

    format!(
        r#"# webscout configuration
# =====================

[llm]
# Sampling temperatures for each kind of model call
synthesis_temperature = 0.7
query_temperature = 0.8
report_temperature = 0.7

{provider_section}
[search]
# duckduckgo needs no key; rapidapi reads RAPIDAPI_KEY
backend = "duckduckgo"
top_k = 3
max_content_chars = 4000
fetch_content = true

[search.rapidapi]
api_key_env = "RAPIDAPI_KEY"
host = "affordable-google-search-api.p.rapidapi.com"
endpoint = "https://affordable-google-search-api.p.rapidapi.com/api/google/search"
country = "us"
lang = "en"
date_range = "lastYear"

[research]
max_steps = 3
# comprehensive, technical, market or summary
report_profile = "comprehensive"
output_dir = "research_reports"

[logging]
level = "info"
# pretty or json
format = "pretty"
"#
    )
}

fn generate_env_example() -> String {
    r#"# webscout Environment Variables
# ==============================
# Copy this file to .env and fill in the values.

# OpenAI API key (if using the OpenAI provider)
# OPENAI_API_KEY=sk-...

# RapidAPI key (if search.backend = "rapidapi")
# RAPIDAPI_KEY=your-key

# Optional: Logging level, overrides [logging].level
# RUST_LOG=info,webscout=debug
"#
    .to_string()
}

fn generate_gitignore() -> String {
    r#"# webscout generated files
/research_reports/

# Environment
.env
.env.local
.env.*.local

# Rust
/target/

# OS
.DS_Store
Thumbs.db
"#
    .to_string()
}
