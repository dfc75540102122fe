//! CLI entrypoint for Persona Debate
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use debate_application::{
    ConversationLogger, DebateExporter, ExecutionParams, LlmGateway, NoConversationLogger,
    NoExport, NoProgress, ProgressNotifier, RunDebateInput, RunDebateUseCase,
};
use debate_domain::{DebateConfig, OutputFormat};
use debate_infrastructure::{
    ConfigLoader, FileConfig, FileDebateExporter, FileProviderKind, JsonlConversationLogger,
    OfflineGateway, OpenAiCompatibleGateway,
};
use debate_presentation::{Cli, ConsoleFormatter, ProgressReporter, ProviderArg, SimpleProgress};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.verbose, cli.log_dir.as_deref());

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // === Configuration ===
    let mut file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_file_overrides(&cli, &mut file_config);

    let debate_config = debate_config(&cli, &file_config)?;
    let params = execution_params(&cli, &file_config)?;
    let format = cli
        .output
        .map(OutputFormat::from)
        .or(file_config.output.format)
        .unwrap_or_default();
    if !file_config.output.color {
        colored::control::set_override(false);
    }

    let topic = match cli.topic.clone() {
        Some(topic) => topic,
        None => prompt_topic()?,
    };

    info!("Starting Persona Debate");

    // === Dependency Injection ===
    let gateway = build_gateway(&file_config)?;
    let (exporter, conversation_logger) = build_exporters(&file_config)?;

    let cancellation = CancellationToken::new();
    let ctrl_c_token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted; aborting debate");
            ctrl_c_token.cancel();
        }
    });

    let use_case = RunDebateUseCase::new(gateway)
        .with_exporter(exporter)
        .with_conversation_logger(conversation_logger)
        .with_params(params)
        .with_cancellation(cancellation);

    let progress: Box<dyn ProgressNotifier> =
        match progress_mode(cli.quiet, format, io::stderr().is_terminal()) {
            ProgressMode::Silent => Box::new(NoProgress),
            ProgressMode::Bar => Box::new(ProgressReporter::new()),
            ProgressMode::Plain => Box::new(SimpleProgress),
        };

    let outcome = use_case
        .execute_with_progress(RunDebateInput::new(topic, debate_config), progress.as_ref())
        .await?;

    // Output results
    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format(&outcome),
        OutputFormat::Verdict => ConsoleFormatter::format_verdict_only(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
    };
    println!("{}", output);

    if let Some(dir) = &file_config.output.dir
        && !cli.quiet
        && format != OutputFormat::Json
    {
        eprintln!("Artifacts written to {}", dir.display());
    }

    match outcome.error {
        Some(error) if error.is_cancelled() => bail!("Debate interrupted before a verdict"),
        Some(error) => bail!("Debate aborted: {}", error),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgressMode {
    Silent,
    Bar,
    Plain,
}

/// Progress bars only on an interactive stderr; JSON output stays clean
fn progress_mode(quiet: bool, format: OutputFormat, stderr_is_terminal: bool) -> ProgressMode {
    if quiet || format == OutputFormat::Json {
        ProgressMode::Silent
    } else if stderr_is_terminal {
        ProgressMode::Bar
    } else {
        ProgressMode::Plain
    }
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the `-v` count picks the level.
/// With `--log-dir`, a daily-rolling plain-text file layer is added and its
/// flush guard returned.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let console = fmt::layer().with_target(false).with_writer(io::stderr);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "persona-debate.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .init();
            None
        }
    }
}

/// CLI flags that map onto raw file settings
fn apply_file_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(provider) = cli.provider {
        config.generation.provider = match provider {
            ProviderArg::Offline => FileProviderKind::Offline,
            ProviderArg::Openai => FileProviderKind::OpenAi,
        };
    }
    if let Some(model) = &cli.model {
        config.generation.model = model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.generation.base_url = base_url.clone();
    }
    if let Some(dir) = &cli.out_dir {
        config.output.dir = Some(dir.clone());
    }
    if cli.no_export {
        config.output.dir = None;
    }
    if cli.no_color {
        config.output.color = false;
    }
}

/// File settings with CLI debate flags on top
fn debate_config(cli: &Cli, config: &FileConfig) -> Result<DebateConfig> {
    let mut debate = config
        .to_debate_config()
        .context("Invalid configuration")?;
    if let Some(max_turns) = cli.max_turns {
        debate = debate.with_max_turns(max_turns);
    }
    if let Some(start) = cli.start {
        debate = debate.with_starting_persona(start);
    }
    if let Some(retry_limit) = cli.retry_limit {
        debate = debate.with_retry_limit(retry_limit);
    }
    if let Some(style) = cli.style {
        debate = debate.with_argument_style(style);
    }
    debate.validate().context("Invalid configuration")?;
    Ok(debate)
}

fn execution_params(cli: &Cli, config: &FileConfig) -> Result<ExecutionParams> {
    let params = config.to_execution_params();
    match cli.timeout {
        Some(0) => bail!("--timeout must be greater than 0"),
        Some(secs) => Ok(params.with_call_timeout(Some(Duration::from_secs(secs)))),
        None => Ok(params),
    }
}

fn build_gateway(config: &FileConfig) -> Result<Arc<dyn LlmGateway>> {
    let generation = &config.generation;
    let gateway: Arc<dyn LlmGateway> = match generation.provider {
        FileProviderKind::Offline => Arc::new(OfflineGateway::new()),
        FileProviderKind::OpenAi => {
            let api_key = generation.api_key();
            if api_key.is_none() {
                info!(
                    "{} not set; calling {} without an API key",
                    generation.api_key_env, generation.base_url
                );
            }
            Arc::new(
                OpenAiCompatibleGateway::new(&generation.base_url, &generation.model, api_key)
                    .map_err(|e| anyhow!("Failed to create generator client: {}", e))?,
            )
        }
    };
    info!("Using generator: {}", gateway.model_name());
    Ok(gateway)
}

fn build_exporters(
    config: &FileConfig,
) -> Result<(Arc<dyn DebateExporter>, Arc<dyn ConversationLogger>)> {
    let Some(dir) = &config.output.dir else {
        return Ok((Arc::new(NoExport), Arc::new(NoConversationLogger)));
    };

    let exporter = FileDebateExporter::create(dir)
        .with_context(|| format!("Cannot prepare output directory {}", dir.display()))?;

    let logger: Arc<dyn ConversationLogger> = if config.output.conversation_log {
        match JsonlConversationLogger::in_dir(dir) {
            Ok(logger) => {
                info!("Conversation log: {}", logger.path().display());
                Arc::new(logger)
            }
            Err(e) => {
                warn!("Could not create conversation log in {}: {}", dir.display(), e);
                Arc::new(NoConversationLogger)
            }
        }
    } else {
        Arc::new(NoConversationLogger)
    };

    Ok((Arc::new(exporter), logger))
}

/// Ask for a topic on stdin until a non-blank line is entered
fn prompt_topic() -> Result<String> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("Enter debate topic: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            bail!("No topic given");
        }
        let topic = line.trim();
        if !topic.is_empty() {
            return Ok(topic.to_string());
        }
    }
}
