pub mod calculator;
pub mod config;
pub mod engine;
pub mod error;
pub mod outputs;
pub mod report;
pub mod state;
pub mod types;

pub use config::AnalysisConfig;
pub use engine::{run_analysis, AnalysisOutcome};
pub use error::{AnalysisError, ConfigError, Result};
pub use state::AnalysisState;
