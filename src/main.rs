use anyhow::{bail, Context};
use chrono::Utc;
use std::path::{Path, PathBuf};
use webscout::cli::init::{self, InitConfig, InitResult};
use webscout::cli::output::Output;
use webscout::cli::{Cli, Commands};
use webscout::research::{
    save_report, LlmSynthesizer, ReportAssembler, ReportProfile, ResearchLoop,
};
use webscout::utils::logging::init_logging;
use webscout::utils::toml_config::{LoggingConfig, ProviderConfig, WebscoutConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    if let Err(e) = run(cli, &output).await {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> anyhow::Result<()> {
    // A missing .env is fine; the config names the variables it needs
    let _ = dotenvy::dotenv();

    match cli.command {
        Commands::Init {
            path,
            force,
            provider,
        } => {
            init_logging(&LoggingConfig::default(), cli.verbose);
            let config = InitConfig {
                path,
                force,
                provider,
            };
            match init::run(config, output) {
                InitResult::Success | InitResult::AlreadyExists => Ok(()),
                InitResult::Error(message) => bail!("init failed: {}", message),
            }
        }

        Commands::Config { validate } => show_config(&cli.config, validate, cli.verbose, output),

        Commands::Research {
            topic,
            steps,
            profile,
            output: output_dir,
            no_save,
        } => {
            let config = WebscoutConfig::load(&cli.config)
                .with_context(|| format!("could not load {}", cli.config.display()))?;
            init_logging(&config.logging, cli.verbose);

            let options = ResearchOptions {
                max_steps: steps.unwrap_or(config.research.max_steps),
                profile: profile
                    .as_deref()
                    .map(ReportProfile::from_name)
                    .unwrap_or_else(|| config.report_profile()),
                output_dir: output_dir.unwrap_or_else(|| config.research.output_dir.clone()),
                save: !no_save,
            };
            research(&config, &topic, options, output).await
        }
    }
}

struct ResearchOptions {
    max_steps: usize,
    profile: ReportProfile,
    output_dir: PathBuf,
    save: bool,
}

async fn research(
    config: &WebscoutConfig,
    topic: &str,
    options: ResearchOptions,
    output: &Output,
) -> anyhow::Result<()> {
    let provider = config.provider()?;
    let fetcher = config.content_fetcher()?;

    output.header(&format!("Researching: {}", topic.trim()));
    output.kv("provider", &format!("{} ({})", provider.name(), provider.model()));
    output.kv("search", fetcher.backend().name());
    output.kv("steps", &options.max_steps.to_string());
    output.kv("profile", options.profile.name());

    let synthesizer = LlmSynthesizer::new(provider.create_client()?)
        .with_temperatures(config.llm.synthesis_temperature, config.llm.query_temperature);
    let research_loop = ResearchLoop::new(Box::new(fetcher), Box::new(synthesizer));

    let outcome = research_loop
        .research_topic(topic, options.max_steps)
        .await
        .context("research run failed")?;

    output.newline();
    for (i, step) in outcome.steps.iter().enumerate() {
        output.step(
            i + 1,
            outcome.steps.len(),
            &format!("{} ({} results)", step.query, step.results.len()),
        );
    }
    output.success(&format!(
        "Collected {} sources over {} rounds",
        outcome.sources.len(),
        outcome.steps.len()
    ));

    let assembler = ReportAssembler::new(provider.create_client()?)
        .with_temperature(config.llm.report_temperature);
    let report = assembler
        .build_report(&outcome.steps, &outcome.sources, options.profile)
        .await
        .context("report generation failed")?;

    if options.save {
        let saved = save_report(
            &options.output_dir,
            &outcome,
            options.profile,
            &report,
            Utc::now(),
        )
        .context("could not save report")?;
        output.created("report", &saved.report_path.display().to_string());
        output.created("log", &saved.log_path.display().to_string());
    }

    output.newline();
    output.report(&report);
    Ok(())
}

fn show_config(
    path: &Path,
    validate: bool,
    verbose: bool,
    output: &Output,
) -> anyhow::Result<()> {
    let config = if validate {
        WebscoutConfig::load(path)
    } else {
        std::fs::read_to_string(path)
            .map_err(Into::into)
            .and_then(|content| WebscoutConfig::parse(&content))
    }
    .with_context(|| format!("could not load {}", path.display()))?;
    init_logging(&config.logging, verbose);

    output.header("Configuration");
    output.kv("file", &path.display().to_string());

    match &config.llm.provider {
        ProviderConfig::Ollama { base_url, model } => {
            output.kv("provider", "ollama");
            output.kv("base_url", base_url);
            output.kv("model", model);
        }
        ProviderConfig::OpenAI {
            api_key_env,
            api_base,
            model,
        } => {
            output.kv("provider", "openai");
            output.kv("api_base", api_base);
            output.kv("api_key_env", api_key_env);
            output.kv("model", model);
        }
    }
    output.kv(
        "temperatures",
        &format!(
            "synthesis {}, queries {}, report {}",
            config.llm.synthesis_temperature,
            config.llm.query_temperature,
            config.llm.report_temperature
        ),
    );

    output.header("Search");
    output.kv("backend", &format!("{:?}", config.search.backend).to_lowercase());
    output.kv("top_k", &config.search.top_k.to_string());
    output.kv("max_content_chars", &config.search.max_content_chars.to_string());
    output.kv("fetch_content", &config.search.fetch_content.to_string());

    output.header("Research");
    output.kv("max_steps", &config.research.max_steps.to_string());
    output.kv("report_profile", config.report_profile().name());
    output.kv("output_dir", &config.research.output_dir.display().to_string());

    if validate {
        let warnings = config.validate_with_warnings()?;
        output.newline();
        for warning in &warnings {
            output.warning(&warning.message);
        }
        output.success("Configuration is valid");
    }

    Ok(())
}
