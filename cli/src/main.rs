//! CLI entrypoint for companion-classifier
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod commands;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use commands::{Cli, Command, OutputFormat};
use companion_application::{
    ClassificationDispatcher, ClassifyRequestUseCase, SharedStore, request_channel,
};
use companion_domain::{
    AnalyzedText, ClassificationResult, FeaturePipeline, QuestionType, RequestId, Sentence,
    tense_bag,
};
use companion_infrastructure::{
    ClassifierRegistry, ConfigLoader, FileConfig, FileLoggingConfig, InMemorySharedStore,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };

    // Held until exit so buffered file logs are flushed
    let _guard = init_logging(cli.verbose, &config.logging)?;

    match cli.command {
        Command::Transform {
            tokens,
            tags,
            raw_terminators,
        } => transform(&tokens, &tags, raw_terminators),
        Command::Classify { input, id, output } => {
            check_config(&config)?;
            classify(&config, &input, RequestId::new(id), output).await
        }
        Command::ShowConfig { sources } => show_config(&config, cli.config.as_ref(), sources),
    }
}

/// Initialize logging based on verbosity level, or the configured level when no `-v` is given.
fn init_logging(verbose: u8, logging: &FileLoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::try_new(&logging.level)
            .with_context(|| format!("Invalid logging.level '{}'", logging.level))?,
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match &logging.file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("logging.file '{}' has no file name", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Log every issue; refuse to start on errors.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    let mut errors = 0;
    for issue in &issues {
        if issue.is_error() {
            error!("{}", issue.message);
            errors += 1;
        } else {
            warn!("{}", issue.message);
        }
    }
    if errors > 0 {
        bail!("Configuration has {errors} error(s); see `companion-classifier show-config`");
    }
    Ok(())
}

fn transform(tokens: &str, tags: &str, raw_terminators: bool) -> Result<()> {
    let tokens: Vec<&str> = tokens.split_whitespace().collect();
    let tags: Vec<&str> = tags.split_whitespace().collect();
    let sentence = Sentence::from_parts(&tokens.join(" "), &tokens, &tags);

    let pipeline = if raw_terminators {
        FeaturePipeline::without_terminator_normalization()
    } else {
        FeaturePipeline::canonical()
    };
    let features = pipeline.transform(&sentence)?;
    println!("{features}");

    if let Some(question_type) = QuestionType::detect_interrogative(&tokens, &tags) {
        println!("question type: {}", question_type.label());
    }
    let tense = tense_bag(&sentence)?;
    if !tense.is_empty() {
        println!("tense: {tense}");
    }
    Ok(())
}

async fn classify(
    config: &FileConfig,
    input: &Path,
    id: RequestId,
    output: OutputFormat,
) -> Result<()> {
    let content = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let text = AnalyzedText::from_json(&content)
        .with_context(|| format!("{} is not analyzed text", input.display()))?;
    info!(sentences = text.len(), "Loaded analyzed text");

    // === Dependency Injection ===
    let classifiers =
        ClassifierRegistry::load(&config.models).context("Failed to load classifier models")?;
    let dispatch = config.dispatch.to_dispatch_config();
    let keys = config.dispatch.store_keys();
    let timeout = dispatch.reply_timeout;

    let store = Arc::new(InMemorySharedStore::new());
    store.put(id.as_str(), &keys.nlp, content).await?;

    let use_case = ClassifyRequestUseCase::new(Arc::clone(&store), classifiers, keys.clone());
    let (handle, requests) = request_channel(dispatch.channel_capacity);
    let dispatcher = ClassificationDispatcher::new(use_case, dispatch);

    let cancel = CancellationToken::new();
    let server = tokio::spawn({
        let cancel = cancel.clone();
        async move { dispatcher.run(requests, cancel).await }
    });
    let interrupt = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted");
                cancel.cancel();
            }
        }
    });

    let reply = handle.request(id.clone(), timeout).await;
    drop(handle);
    let summary = server.await.context("Dispatcher task failed")?;
    interrupt.abort();
    info!(replied = summary.replied, failed = summary.failed, "Dispatcher finished");

    let replied = reply.with_context(|| format!("Request {id} was not classified"))?;
    let stored = store
        .get(replied.as_str(), &keys.classification)
        .await?
        .with_context(|| format!("No '{}' field written for {replied}", keys.classification))?;

    match output {
        OutputFormat::Json => println!("{stored}"),
        OutputFormat::Pretty => {
            let value: serde_json::Value = serde_json::from_str(&stored)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Summary => {
            let result = ClassificationResult::from_json(&stored)?;
            for (sentence, predicted) in text.sentences.iter().zip(&result.sentences) {
                let labels: Vec<String> = predicted
                    .predictions
                    .iter()
                    .map(|(name, distribution)| {
                        format!("{name}={}", distribution.most_likely().unwrap_or("-"))
                    })
                    .collect();
                println!("{}\t{}", sentence.raw, labels.join(" "));
            }
        }
    }
    Ok(())
}

fn show_config(config: &FileConfig, config_path: Option<&PathBuf>, sources: bool) -> Result<()> {
    if sources {
        ConfigLoader::print_config_sources(config_path);
        println!();
    }
    print!("{}", config.to_toml()?);

    let issues = config.validate();
    if !issues.is_empty() {
        println!();
        for issue in issues {
            let level = if issue.is_error() { "error" } else { "warning" };
            println!("# {level}: {}", issue.message);
        }
    }
    Ok(())
}
