pub mod categorize;
pub mod config;
pub mod describe;
pub mod error;
pub mod experiment;
pub mod results;
pub mod runner;
pub mod scan;

pub use categorize::{categorize_viewport_positions, BucketGrid};
pub use config::ExperimentConfig;
pub use error::EngineError;
pub use experiment::{ExperimentLoop, LoopAction, LoopState, ResultRow};
pub use runner::{ExperimentRunner, RunReport};
pub use scan::ScanGrid;
