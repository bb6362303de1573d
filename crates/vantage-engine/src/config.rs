use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Experiment parameters. Every field is defaulted so a partial config file
/// (or none at all) still yields a runnable experiment.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub model: String,
    /// Context prepended before the scene description.
    pub prologue: String,
    /// Instructions appended after the scene description.
    pub epilogue: String,
    /// Horizontal position labels, left to right.
    pub x_categories: Vec<String>,
    /// Vertical position labels, bottom to top.
    pub y_categories: Vec<String>,
    pub num_x_rays: u32,
    pub num_y_rays: u32,
    /// Number of times to analyze the scene.
    pub repetitions: u32,
    pub scenario_path: PathBuf,
    pub results_path: PathBuf,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            prologue: String::new(),
            epilogue: String::new(),
            x_categories: vec![
                "on the left".to_string(),
                "in the middle".to_string(),
                "on the right".to_string(),
            ],
            y_categories: vec![
                "at the bottom".to_string(),
                "at eye level".to_string(),
                "at the top".to_string(),
            ],
            num_x_rays: 100,
            num_y_rays: 100,
            repetitions: 1,
            scenario_path: PathBuf::from("scenario.txt"),
            results_path: PathBuf::from("results.csv"),
        }
    }
}

impl ExperimentConfig {
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
