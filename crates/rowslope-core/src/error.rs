// crates/rowslope-core/src/error.rs

use std::path::PathBuf;

use rowslope_parser::LoadError;
use thiserror::Error;

use crate::state::TableKind;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("failed to load {table} table from {source_name}: {error}")]
    Load {
        table: TableKind,
        source_name: String,
        #[source]
        error: LoadError,
    },

    #[error("analysis requires both tables; not loaded: {}", join_tables(.missing))]
    MissingDataset { missing: Vec<TableKind> },

    #[error("no analysis has been run yet")]
    NotAnalyzed,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config TOML is invalid: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

fn join_tables(tables: &[TableKind]) -> String {
    tables
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
