use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use veritas_ai::{ClassifierBackend, HttpClassifier, PatternCatalog, Pipeline, normalize_status};
use veritas_core::{ClassificationInput, PipelineConfig};

mod display;

#[derive(Parser)]
#[command(name = "veritas", version, about = "Classify legislative proposals and normalize their statuses")]
struct Cli {
    /// External classifier endpoint (full model URL). Omit to run purely heuristic.
    #[arg(long, env = "VERITAS_CLASSIFIER_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Bearer token for the classifier endpoint.
    #[arg(long, env = "VERITAS_CLASSIFIER_TOKEN", global = true)]
    token: Option<String>,

    /// Heuristic confidence above which the classifier is never consulted.
    #[arg(long, default_value_t = 0.75, global = true)]
    threshold: f32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify one proposal from its summary text.
    Classify {
        /// Summary ("ementa") text.
        text: String,
        /// Feed keyword string.
        #[arg(long, default_value = "")]
        keywords: String,
        /// Emit the result as JSON instead of a card.
        #[arg(long)]
        json: bool,
    },
    /// Normalize a raw status description and optional situation code.
    Status {
        description: String,
        #[arg(long)]
        code: Option<u32>,
    },
    /// Classify a JSON array of {"text", "keywords"} objects in rate-limited groups.
    Batch {
        /// Path to the JSON input file.
        file: PathBuf,
        /// Seconds to pause between groups.
        #[arg(long, default_value_t = 1)]
        delay: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("veritas v{}", env!("CARGO_PKG_VERSION"));
    let cli = Cli::parse();

    let config = PipelineConfig {
        confidence_threshold: cli.threshold,
        ..PipelineConfig::default()
    };
    let backend: Option<Arc<dyn ClassifierBackend>> = cli.endpoint.clone().map(|endpoint| {
        Arc::new(HttpClassifier::new(endpoint, cli.token.clone())) as Arc<dyn ClassifierBackend>
    });

    match cli.command {
        Command::Classify { text, keywords, json } => {
            let pipeline = Pipeline::new(PatternCatalog::default(), config, backend);
            let input = ClassificationInput::new(text, keywords);
            let result = pipeline.classify(&input).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                display::print_classification(&result);
            }
        }
        Command::Status { description, code } => {
            let result = normalize_status(&description, code);
            display::print_status(&result);
        }
        Command::Batch { file, delay } => {
            let config = PipelineConfig {
                batch_delay: Duration::from_secs(delay),
                ..config
            };
            let pipeline = Pipeline::new(PatternCatalog::default(), config, backend);

            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let inputs: Vec<ClassificationInput> =
                serde_json::from_str(&raw).context("parsing batch input")?;

            eprintln!("Classifying {} proposals...", inputs.len());
            let results = pipeline.classify_batch(&inputs).await;
            for (input, result) in inputs.iter().zip(&results) {
                display::print_batch_line(input, result);
            }
            let stats = pipeline.stats();
            eprintln!("Done. {} cached classifications.", stats.category_entries);
        }
    }

    Ok(())
}
