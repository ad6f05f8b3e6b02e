//! Sinscreen CLI
//!
//! Command-line front end for the analysis engine. Analyzes the text
//! given as an argument, or newline-delimited texts from stdin, and
//! prints one JSON result per input.

use std::io::BufRead;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use sinscreen_core::{AnalysisResult, EngineConfig};
use sinscreen_engine::{Analyzer, HttpLearnedScorer};
use sinscreen_lexicon::{Lexicon, LexiconStore};

#[derive(Parser, Debug)]
#[command(name = "sinscreen")]
#[command(about = "Sinhala/Singlish hate-speech analyzer", long_about = None)]
struct Cli {
    /// Text to analyze; reads newline-delimited texts from stdin when omitted
    text: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "sinscreen.yaml")]
    config: String,

    /// Lexicon YAML file merged over the built-in seed
    #[arg(short, long)]
    lexicon: Option<String>,

    /// Feedback journal path, replayed on startup
    #[arg(short, long)]
    journal: Option<String>,

    /// Learned-model sidecar URL, overrides the config file
    #[arg(long, env = "SINSCREEN_LEARNED_URL")]
    learned_url: Option<String>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    describe_metrics();

    info!("Starting Sinscreen analyzer");

    let mut config = EngineConfig::load(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config))?;
    if cli.learned_url.is_some() {
        config.learned.endpoint = cli.learned_url.clone();
    }

    let mut lexicon = Lexicon::builtin();
    if let Some(path) = &cli.lexicon {
        let extra = Lexicon::from_file(path)
            .with_context(|| format!("failed to load lexicon from {path}"))?;
        info!(
            terms = extra.term_count(),
            bigrams = extra.bigram_count(),
            "merging lexicon file"
        );
        lexicon = lexicon.merged(extra);
    }
    info!(
        terms = lexicon.term_count(),
        bigrams = lexicon.bigram_count(),
        "lexicon ready"
    );

    let store = Arc::new(match &cli.journal {
        Some(path) => LexiconStore::with_journal(lexicon, path)
            .with_context(|| format!("failed to open feedback journal at {path}"))?,
        None => LexiconStore::new(lexicon),
    });

    let learned = HttpLearnedScorer::from_config(&config.learned)?;
    let mut analyzer = Analyzer::new(config, store)?;
    if let Some(scorer) = learned {
        if scorer.health().await {
            info!("learned scorer is healthy");
        } else {
            warn!("learned scorer did not answer its health probe, predictions may degrade");
        }
        analyzer = analyzer.with_learned(Arc::new(scorer));
    }

    match &cli.text {
        Some(text) => {
            let result = analyzer.analyze(text).await;
            print_result(&result, cli.pretty)?;
        }
        None => {
            for line in std::io::stdin().lock().lines() {
                let line = line.context("failed to read stdin")?;
                if line.trim().is_empty() {
                    continue;
                }
                let result = analyzer.analyze(&line).await;
                print_result(&result, cli.pretty)?;
            }
        }
    }

    Ok(())
}

fn print_result(result: &AnalysisResult, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("sinscreen=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sinscreen=info"))
    };

    // logs go to stderr; stdout carries only JSON results
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn describe_metrics() {
    metrics::describe_counter!("sinscreen_analyses_total", "Total number of texts analyzed");
    metrics::describe_counter!(
        "sinscreen_classifications_total",
        "Analysis verdicts by classification"
    );
    metrics::describe_counter!(
        "sinscreen_learned_failures_total",
        "Learned scorer calls that failed or timed out"
    );
    metrics::describe_histogram!(
        "sinscreen_analysis_latency_us",
        "Analysis latency in microseconds"
    );
}
