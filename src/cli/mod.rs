//! CLI module for webscout
//!
//! Provides command-line interface parsing and handling for the webscout binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod init;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// webscout - Iterative web research with cited reports
#[derive(Parser, Debug)]
#[command(
    name = "webscout",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "webscout - Iterative web research with cited reports",
    long_about = "Researches a topic over several rounds of web search, page retrieval and\n\
                  LLM synthesis, refining the query each round, then writes a Markdown report\n\
                  with stable numbered citations.\n\n\
                  Use 'init' to scaffold a configuration, then 'research' to run a topic.",
    after_help = "EXAMPLES:\n    \
                  webscout init                                  # Scaffold webscout.toml\n    \
                  webscout init --provider openai                # Use OpenAI instead of Ollama\n    \
                  webscout research \"quantum computing\"          # Research with defaults\n    \
                  webscout research \"rust async\" -s 5 -p technical\n    \
                  webscout config --validate                     # Check configuration"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "webscout.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Research a topic and write a cited report
    ///
    /// Runs the configured number of search rounds, prints the final report
    /// to stdout and saves it with a JSON step log unless --no-save is given.
    Research {
        /// Topic to research
        topic: String,

        /// Number of research rounds (overrides research.max_steps)
        #[arg(short, long)]
        steps: Option<usize>,

        /// Report profile: comprehensive, technical, market or summary
        #[arg(short, long)]
        profile: Option<String>,

        /// Directory for saved reports (overrides research.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the report without saving it
        #[arg(long)]
        no_save: bool,
    },

    /// Initialize a webscout project with configuration files
    ///
    /// Creates webscout.toml and .env.example in the target directory.
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files without prompting
        #[arg(short, long)]
        force: bool,

        /// LLM provider to configure
        #[arg(long, value_enum, default_value_t = ProviderChoice::Ollama)]
        provider: ProviderChoice,
    },

    /// Show configuration information
    Config {
        /// Validate the configuration file, including env vars
        #[arg(long)]
        validate: bool,
    },
}

/// LLM provider offered by `init`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderChoice {
    Ollama,
    Openai,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
