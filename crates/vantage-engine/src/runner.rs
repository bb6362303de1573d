use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{error, info, instrument};

use vantage_core::camera::Camera;
use vantage_core::ids::RunId;
use vantage_core::messages::ChatMessage;
use vantage_core::provider::ChatProvider;
use vantage_core::scene::SceneGraph;
use vantage_core::tokens::AccumulatedUsage;

use crate::config::ExperimentConfig;
use crate::describe;
use crate::error::EngineError;
use crate::experiment::{ExperimentLoop, LoopAction};
use crate::results::ResultsWriter;
use crate::scan::ScanGrid;

/// Summary of one completed run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub repetitions: u32,
    pub rows_written: usize,
    pub usage: AccumulatedUsage,
}

/// Drives a full experiment: scenario assembly, the repetition loop against
/// a chat provider, and the single end-of-run flush.
pub struct ExperimentRunner {
    provider: Arc<dyn ChatProvider>,
    config: ExperimentConfig,
    writer: ResultsWriter,
}

impl ExperimentRunner {
    pub fn new(provider: Arc<dyn ChatProvider>, config: ExperimentConfig) -> Self {
        let writer = ResultsWriter::new(
            config.results_path.clone(),
            config.scenario_path.clone(),
        );
        Self {
            provider,
            config,
            writer,
        }
    }

    #[instrument(skip_all, fields(model = %self.provider.model()))]
    pub async fn run(&self, scene: &SceneGraph, camera: &Camera) -> Result<RunReport, EngineError> {
        let run_id = RunId::new();
        let started_at = Utc::now();

        // The scene is analyzed once; every repetition reuses the scenario.
        let grid = ScanGrid::new(self.config.num_x_rays, self.config.num_y_rays);
        let description = describe::describe_scene(
            scene,
            camera,
            &grid,
            &self.config.x_categories,
            &self.config.y_categories,
        );
        let scenario = describe::scenario(&self.config.prologue, &description, &self.config.epilogue);
        info!(%run_id, chars = scenario.len(), "scenario prepared");

        self.writer.write_scenario(&scenario)?;
        self.writer.write_header()?;

        let messages = vec![ChatMessage::user(scenario)];
        let mut experiment = ExperimentLoop::new(self.config.repetitions);
        let mut usage = AccumulatedUsage::default();

        loop {
            match experiment.next_action() {
                LoopAction::StartRequest => {
                    let repetition = experiment.completed();
                    info!(%run_id, repetition, "dispatching chat completion");
                    let started = Instant::now();
                    match self.provider.complete(&messages).await {
                        Ok(completion) => {
                            if let Some(u) = &completion.usage {
                                usage.record(u);
                            }
                            experiment.on_request_completed(&completion.text, started.elapsed());
                        }
                        Err(e) => {
                            error!(%run_id, repetition, kind = e.error_kind(), error = %e, "request failed");
                            experiment.on_request_failed(&e.to_string(), started.elapsed());
                        }
                    }
                }
                LoopAction::Wait => unreachable!("the driver completes each request before polling again"),
                LoopAction::Finish => break,
            }
        }

        let rows = experiment.take_rows();
        self.writer.append_rows(&rows)?;
        info!(
            %run_id,
            rows = rows.len(),
            total_tokens = usage.total_tokens(),
            path = %self.writer.results_path().display(),
            "results flushed"
        );

        Ok(RunReport {
            run_id,
            started_at,
            repetitions: self.config.repetitions,
            rows_written: rows.len(),
            usage,
        })
    }
}
