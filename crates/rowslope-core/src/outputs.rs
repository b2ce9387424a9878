use chrono::{DateTime, SecondsFormat, Utc};
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

use crate::config::AnalysisConfig;
use crate::engine::AnalysisOutcome;
use crate::error::Result;
use crate::report::{LogEntry, PointSummary};
use crate::state::SourceInfo;
use crate::types::{AdjustmentCode, MissingAuxiliaryRecord, PointResult, SideReport};

pub const ADJUSTED_COLUMNS: [&str; 5] = ["NAME", "X", "Y", "Z", "CODE"];
pub const MISSING_COLUMNS: [&str; 2] = ["TRACKER_ID", "MISSING_CODES"];

/// Side-by-side view of a pile whose Y moved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewRow {
    pub name: String,
    pub y_original: f64,
    pub y_adjusted: f64,
    pub delta_y: f64,
}

fn adjusted_points(outcome: &AnalysisOutcome) -> impl Iterator<Item = (&PointResult, f64)> {
    outcome
        .with_code(AdjustmentCode::Adjusted)
        .filter_map(|result| result.adjustment.adjusted_y.map(|y| (result, y)))
}

/// Adjusted piles in the originals' four-column layout, the adjusted Y in
/// place of the surveyed one.
pub fn adjusted_frame(outcome: &AnalysisOutcome) -> PolarsResult<DataFrame> {
    let rows: Vec<(&PointResult, f64)> = adjusted_points(outcome).collect();

    let names: Vec<&str> = rows.iter().map(|(r, _)| r.point.name.as_str()).collect();
    let xs: Vec<f64> = rows.iter().map(|(r, _)| r.point.x).collect();
    let ys: Vec<f64> = rows.iter().map(|(_, y)| *y).collect();
    let zs: Vec<f64> = rows.iter().map(|(r, _)| r.point.z).collect();
    let codes = vec![AdjustmentCode::Adjusted.as_code(); rows.len()];

    DataFrame::new(vec![
        Series::new(ADJUSTED_COLUMNS[0].into(), names).into(),
        Series::new(ADJUSTED_COLUMNS[1].into(), xs).into(),
        Series::new(ADJUSTED_COLUMNS[2].into(), ys).into(),
        Series::new(ADJUSTED_COLUMNS[3].into(), zs).into(),
        Series::new(ADJUSTED_COLUMNS[4].into(), codes).into(),
    ])
}

/// One row per distinct (tracker, missing codes) pair, first occurrence wins.
pub fn missing_frame(outcome: &AnalysisOutcome) -> PolarsResult<DataFrame> {
    let rows = distinct_missing(&outcome.missing);
    let trackers: Vec<&str> = rows.iter().map(|(tracker, _)| *tracker).collect();
    let codes: Vec<&str> = rows.iter().map(|(_, codes)| codes.as_str()).collect();

    DataFrame::new(vec![
        Series::new(MISSING_COLUMNS[0].into(), trackers).into(),
        Series::new(MISSING_COLUMNS[1].into(), codes).into(),
    ])
}

fn distinct_missing(records: &[MissingAuxiliaryRecord]) -> Vec<(&str, String)> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|record| (record.tracker_id.as_str(), record.joined_codes()))
        .filter(|row| seen.insert(row.clone()))
        .collect()
}

/// Serializes `frame` as delimited text.
pub fn write_csv(frame: &mut DataFrame, include_header: bool, separator: u8) -> Result<String> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(include_header)
        .with_separator(separator)
        .finish(frame)?;
    let text = String::from_utf8(buffer).map_err(|err| {
        PolarsError::ComputeError(format!("CSV output was not UTF-8: {err}").into())
    })?;
    Ok(text)
}

pub fn preview_rows(outcome: &AnalysisOutcome) -> Vec<PreviewRow> {
    adjusted_points(outcome)
        .map(|(result, y_adjusted)| PreviewRow {
            name: result.point.name.clone(),
            y_original: result.point.y,
            y_adjusted,
            delta_y: y_adjusted - result.point.y,
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct RunCounts {
    adjusted: usize,
    failed: usize,
    incomplete_sides: usize,
    log_entries: usize,
}

#[derive(Debug, Serialize)]
struct RunReport<'a> {
    run_id: Uuid,
    generated_at: String,
    config: &'a AnalysisConfig,
    sources: &'a [SourceInfo],
    summary_line: String,
    summary: &'a PointSummary,
    counts: RunCounts,
    decisions: &'a [SideReport],
    missing: &'a [MissingAuxiliaryRecord],
    log: &'a [LogEntry],
}

/// JSON record of one run: inputs, configuration, decisions and log.
pub fn build_run_report(
    outcome: &AnalysisOutcome,
    config: &AnalysisConfig,
    sources: &[SourceInfo],
    generated_at: DateTime<Utc>,
) -> Result<serde_json::Value> {
    let report = RunReport {
        run_id: Uuid::new_v4(),
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        config,
        sources,
        summary_line: outcome.summary.summary_line(),
        summary: &outcome.summary,
        counts: RunCounts {
            adjusted: outcome.adjusted_count(),
            failed: outcome.failed_count(),
            incomplete_sides: outcome.missing.len(),
            log_entries: outcome.log.len(),
        },
        decisions: &outcome.decisions,
        missing: &outcome.missing,
        log: outcome.log.entries(),
    };
    Ok(serde_json::to_value(report)?)
}
