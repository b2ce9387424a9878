//! Human-readable artifacts built from an analysis run: the process log and
//! the point summary line.

use std::collections::BTreeMap;
use std::fmt;

use rowslope_parser::{is_pile_code, OriginalPoint};
use serde::Serialize;

use crate::types::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub severity: Severity,
    pub tracker_id: String,
    pub side: Option<Side>,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side {
            Some(side) => write!(
                f,
                "{} {} {}: {}",
                self.severity, self.tracker_id, side, self.message
            ),
            None => write!(f, "{} {}: {}", self.severity, self.tracker_id, self.message),
        }
    }
}

/// Ordered audit trail of the engine's decisions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProcessLog {
    entries: Vec<LogEntry>,
}

impl ProcessLog {
    pub fn push(
        &mut self,
        severity: Severity,
        tracker_id: &str,
        side: Option<Side>,
        message: impl Into<String>,
    ) {
        self.entries.push(LogEntry {
            severity,
            tracker_id: tracker_id.to_string(),
            side,
            message: message.into(),
        });
    }

    pub fn info(&mut self, tracker_id: &str, side: Side, message: impl Into<String>) {
        self.push(Severity::Info, tracker_id, Some(side), message);
    }

    pub fn warning(&mut self, tracker_id: &str, side: Side, message: impl Into<String>) {
        self.push(Severity::Warning, tracker_id, Some(side), message);
    }

    pub fn error(&mut self, tracker_id: &str, side: Side, message: impl Into<String>) {
        self.push(Severity::Error, tracker_id, Some(side), message);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.severity == severity)
            .count()
    }

    /// One line per entry.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Pile total and per-code counts of the non-pile points in the originals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PointSummary {
    pub total_piles: usize,
    pub code_counts: BTreeMap<String, usize>,
}

impl PointSummary {
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a OriginalPoint>) -> Self {
        let mut summary = PointSummary::default();
        for code in points
            .into_iter()
            .filter_map(|point| point.point_type.as_deref())
        {
            if is_pile_code(code) {
                summary.total_piles += 1;
            } else {
                *summary.code_counts.entry(code.to_string()).or_insert(0) += 1;
            }
        }
        summary
    }

    pub fn summary_line(&self) -> String {
        let mut parts = vec![format!("Total piles: {}", self.total_piles)];
        parts.extend(
            self.code_counts
                .iter()
                .map(|(code, count)| format!("{code}: {count}")),
        );
        parts.join(" | ")
    }
}

impl fmt::Display for PointSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary_line())
    }
}
