use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use vantage_core::scene::SceneGraph;
use vantage_engine::{ExperimentConfig, ExperimentRunner};
use vantage_llm::{credentials, OpenAiProvider};

/// Scene-perception experiment harness: scans a scene through a virtual
/// camera, describes it in natural language, and asks a chat-completion
/// model to decide, logging one CSV row per repetition.
#[derive(Debug, Parser)]
#[command(name = "vantage", version)]
struct Cli {
    /// Scene definition file (camera + objects).
    #[arg(long, default_value = "scene.json")]
    scene: PathBuf,

    /// Experiment configuration file; defaults are used when absent.
    #[arg(long, default_value = "experiment.json")]
    config: PathBuf,

    /// Env file holding the API credential.
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = if cli.config.exists() {
        ExperimentConfig::load(&cli.config).expect("failed to load experiment config")
    } else {
        tracing::warn!(path = %cli.config.display(), "config file not found; using defaults");
        ExperimentConfig::default()
    };

    let api_key = credentials::load_api_key(&cli.env_file);

    let (scene, camera) = SceneGraph::load(&cli.scene).expect("failed to load scene");
    tracing::info!(path = %cli.scene.display(), nodes = scene.len(), "scene loaded");

    let provider = Arc::new(OpenAiProvider::new(api_key, Some(config.model.as_str())));
    let runner = ExperimentRunner::new(provider, config);

    let report = runner
        .run(&scene, &camera)
        .await
        .expect("experiment run failed");

    tracing::info!(
        run_id = %report.run_id,
        repetitions = report.repetitions,
        rows = report.rows_written,
        total_tokens = report.usage.total_tokens(),
        "done"
    );
}
