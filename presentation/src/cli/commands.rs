//! CLI command definitions

use clap::{Parser, ValueEnum};
use debate_domain::{ArgumentStyle, Persona};
use std::path::PathBuf;

/// Output format for debate results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Transcript, verdict and scores
    Full,
    /// Only the verdict
    Verdict,
    /// JSON output
    Json,
}

impl From<OutputFormat> for debate_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => debate_domain::OutputFormat::Full,
            OutputFormat::Verdict => debate_domain::OutputFormat::Verdict,
            OutputFormat::Json => debate_domain::OutputFormat::Json,
        }
    }
}

/// Text generator backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    /// Deterministic, no network
    Offline,
    /// OpenAI-compatible chat completions server
    Openai,
}

fn parse_persona(s: &str) -> Result<Persona, String> {
    s.parse()
}

fn parse_style(s: &str) -> Result<ArgumentStyle, String> {
    s.parse()
}

/// CLI arguments for persona-debate
#[derive(Parser, Debug)]
#[command(name = "persona-debate")]
#[command(author, version, about = "A Scientist and a Philosopher debate; a judge picks the winner")]
#[command(long_about = r#"
Persona Debate runs a turn-based debate between two personas on a topic.

The flow:
1. The Scientist and the Philosopher alternate, each reading the shared memory
   of earlier turns and rebutting the opponent's last point
2. After the configured number of turns, a judge reads the transcript and
   declares a winner with a justification
3. Transcript, verdict and the debate graph are exported

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./debate.toml       Project-level config
3. ~/.config/persona-debate/config.toml   Global config

Example:
  persona-debate "Should AI be regulated like medicine?"
  persona-debate --max-turns 6 --start philosopher "Is mathematics discovered?"
  persona-debate --provider openai --model qwen2:0.5b --out-dir debate-output
"#)]
pub struct Cli {
    /// The debate topic (prompted on stdin when omitted)
    pub topic: Option<String>,

    /// Total persona turns (even, >= 2)
    #[arg(short = 't', long, value_name = "N")]
    pub max_turns: Option<usize>,

    /// Persona that opens the debate
    #[arg(short, long, value_name = "PERSONA", value_parser = parse_persona)]
    pub start: Option<Persona>,

    /// Extra attempts per node after a failure
    #[arg(short, long, value_name = "N")]
    pub retry_limit: Option<usize>,

    /// Timeout in seconds for a single generator call
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// How persona output is shaped: full or first_sentence
    #[arg(long, value_name = "STYLE", value_parser = parse_style)]
    pub style: Option<ArgumentStyle>,

    /// Text generator backend
    #[arg(long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Model name sent to the generator
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible server
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Directory for transcript, verdict and graph files
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Do not write any export files
    #[arg(long)]
    pub no_export: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write logs to a daily-rolling file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
