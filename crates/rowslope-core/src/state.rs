use std::fmt;

use blake3::Hasher;
use chrono::{DateTime, Utc};
use rowslope_parser::{
    load_auxiliaries, load_originals, AuxiliaryPoint, LoadError, OriginalPoint, ParsedTable,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::engine::{run_analysis, AnalysisOutcome};
use crate::error::{AnalysisError, Result};
use crate::outputs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Originals,
    Auxiliaries,
}

impl TableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Originals => "originals",
            TableKind::Auxiliaries => "auxiliaries",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable<T> {
    /// Where the bytes came from (usually a file path).
    pub source: String,
    pub hash: String,
    pub table: ParsedTable<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    Replaced,
    /// Same bytes as the table already held; nothing changed.
    Unchanged,
}

/// A table load that failed. Kept so callers can surface it after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub table: TableKind,
    pub source: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    pub table: TableKind,
    pub source: String,
    pub hash: String,
    pub rows: usize,
    pub dropped_rows: usize,
}

/// Everything a caller carries between the load, run and export steps.
#[derive(Debug, Default)]
pub struct AnalysisState {
    config: AnalysisConfig,
    originals: Option<LoadedTable<OriginalPoint>>,
    auxiliaries: Option<LoadedTable<AuxiliaryPoint>>,
    load_errors: Vec<LoadFailure>,
    outcome: Option<AnalysisOutcome>,
}

impl AnalysisState {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn originals(&self) -> Option<&LoadedTable<OriginalPoint>> {
        self.originals.as_ref()
    }

    pub fn auxiliaries(&self) -> Option<&LoadedTable<AuxiliaryPoint>> {
        self.auxiliaries.as_ref()
    }

    pub fn load_errors(&self) -> &[LoadFailure] {
        &self.load_errors
    }

    pub fn outcome(&self) -> Option<&AnalysisOutcome> {
        self.outcome.as_ref()
    }

    /// Loads the originals table. On failure the previously loaded table, if
    /// any, is kept and the failure is recorded.
    pub fn load_originals(&mut self, source: &str, contents: &[u8]) -> Result<LoadStatus> {
        let options = self.config.loader_options()?;
        let status = load_into(
            &mut self.originals,
            &mut self.load_errors,
            TableKind::Originals,
            source,
            contents,
            |bytes| load_originals(bytes, options),
        )?;
        self.invalidate(status);
        Ok(status)
    }

    /// Loads the auxiliaries table; see [`AnalysisState::load_originals`].
    pub fn load_auxiliaries(&mut self, source: &str, contents: &[u8]) -> Result<LoadStatus> {
        let options = self.config.loader_options()?;
        let status = load_into(
            &mut self.auxiliaries,
            &mut self.load_errors,
            TableKind::Auxiliaries,
            source,
            contents,
            |bytes| load_auxiliaries(bytes, options),
        )?;
        self.invalidate(status);
        Ok(status)
    }

    /// Runs the engine over both loaded tables. Nothing runs unless both are
    /// present.
    pub fn run(&mut self) -> Result<&AnalysisOutcome> {
        let (originals, auxiliaries) = match (&self.originals, &self.auxiliaries) {
            (Some(originals), Some(auxiliaries)) => (originals, auxiliaries),
            (originals, auxiliaries) => {
                let mut missing = Vec::new();
                if originals.is_none() {
                    missing.push(TableKind::Originals);
                }
                if auxiliaries.is_none() {
                    missing.push(TableKind::Auxiliaries);
                }
                return Err(AnalysisError::MissingDataset { missing });
            }
        };

        let outcome = run_analysis(
            &originals.table.rows,
            &auxiliaries.table.rows,
            &self.config,
        );
        info!(
            adjusted = outcome.adjusted_count(),
            failed = outcome.failed_count(),
            incomplete = outcome.missing.len(),
            "analysis complete"
        );
        Ok(&*self.outcome.insert(outcome))
    }

    /// Headerless adjusted-pile CSV, or `None` when no pile was adjusted.
    pub fn export_adjusted(&self) -> Result<Option<String>> {
        let outcome = self.outcome.as_ref().ok_or(AnalysisError::NotAnalyzed)?;
        if outcome.adjusted_count() == 0 {
            return Ok(None);
        }
        let mut frame = outputs::adjusted_frame(outcome)?;
        let separator = self.config.loader_options()?.field_delimiter;
        let csv = outputs::write_csv(&mut frame, false, separator)?;
        Ok(Some(csv))
    }

    /// Missing-auxiliaries CSV with header, or `None` when every present side
    /// was complete.
    pub fn export_missing(&self) -> Result<Option<String>> {
        let outcome = self.outcome.as_ref().ok_or(AnalysisError::NotAnalyzed)?;
        if outcome.missing.is_empty() {
            return Ok(None);
        }
        let mut frame = outputs::missing_frame(outcome)?;
        let separator = self.config.loader_options()?.field_delimiter;
        let csv = outputs::write_csv(&mut frame, true, separator)?;
        Ok(Some(csv))
    }

    pub fn run_report(&self, generated_at: DateTime<Utc>) -> Result<serde_json::Value> {
        let outcome = self.outcome.as_ref().ok_or(AnalysisError::NotAnalyzed)?;
        outputs::build_run_report(outcome, &self.config, &self.sources(), generated_at)
    }

    pub fn sources(&self) -> Vec<SourceInfo> {
        let mut sources = Vec::new();
        if let Some(loaded) = &self.originals {
            sources.push(source_info(TableKind::Originals, loaded));
        }
        if let Some(loaded) = &self.auxiliaries {
            sources.push(source_info(TableKind::Auxiliaries, loaded));
        }
        sources
    }

    fn invalidate(&mut self, status: LoadStatus) {
        if status != LoadStatus::Unchanged {
            self.outcome = None;
        }
    }
}

fn load_into<T>(
    slot: &mut Option<LoadedTable<T>>,
    load_errors: &mut Vec<LoadFailure>,
    kind: TableKind,
    source: &str,
    contents: &[u8],
    parse: impl FnOnce(&[u8]) -> std::result::Result<ParsedTable<T>, LoadError>,
) -> Result<LoadStatus> {
    let hash = compute_hash(contents);
    if slot.as_ref().is_some_and(|loaded| loaded.hash == hash) {
        info!(table = kind.as_str(), source, "table unchanged, keeping loaded copy");
        return Ok(LoadStatus::Unchanged);
    }

    let table = match parse(contents) {
        Ok(table) => table,
        Err(error) => {
            warn!(table = kind.as_str(), source, %error, "table load failed");
            load_errors.push(LoadFailure {
                table: kind,
                source: source.to_string(),
                message: error.to_string(),
            });
            return Err(AnalysisError::Load {
                table: kind,
                source_name: source.to_string(),
                error,
            });
        }
    };

    info!(
        table = kind.as_str(),
        source,
        rows = table.len(),
        dropped = table.dropped_rows,
        "table loaded"
    );

    let status = if slot.is_some() {
        LoadStatus::Replaced
    } else {
        LoadStatus::Loaded
    };
    *slot = Some(LoadedTable {
        source: source.to_string(),
        hash,
        table,
    });
    Ok(status)
}

fn source_info<T>(kind: TableKind, loaded: &LoadedTable<T>) -> SourceInfo {
    SourceInfo {
        table: kind,
        source: loaded.source.clone(),
        hash: loaded.hash.clone(),
        rows: loaded.table.len(),
        dropped_rows: loaded.table.dropped_rows,
    }
}

fn compute_hash(contents: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(contents);
    let hash = hasher.finalize();
    hash.to_hex().to_string()
}
