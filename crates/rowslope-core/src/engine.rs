use std::collections::{BTreeMap, BTreeSet, HashMap};

use rowslope_parser::{AuxiliaryPoint, OriginalPoint};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::calculator::{slope_percent, slope_ratio, Projection};
use crate::config::AnalysisConfig;
use crate::report::{PointSummary, ProcessLog};
use crate::types::{
    Adjustment, AdjustmentCode, MissingAuxiliaryRecord, PointResult, Side, SideDecision,
    SideReport,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    /// Every original point, in input order.
    pub points: Vec<PointResult>,
    pub missing: Vec<MissingAuxiliaryRecord>,
    pub decisions: Vec<SideReport>,
    pub log: ProcessLog,
    pub summary: PointSummary,
}

impl AnalysisOutcome {
    pub fn with_code(&self, code: AdjustmentCode) -> impl Iterator<Item = &PointResult> {
        self.points.iter().filter(move |result| result.code() == code)
    }

    pub fn adjusted_count(&self) -> usize {
        self.with_code(AdjustmentCode::Adjusted).count()
    }

    pub fn failed_count(&self) -> usize {
        self.with_code(AdjustmentCode::ErrorAdjust).count()
    }
}

#[derive(Debug, Clone, Copy)]
struct Pile {
    row: usize,
    index: f64,
}

struct TrackerRow<'a> {
    id: &'a str,
    /// Sorted by pile index.
    piles: Vec<Pile>,
    midpoint: f64,
    auxiliaries: &'a [&'a AuxiliaryPoint],
}

impl<'a> TrackerRow<'a> {
    fn present_codes(&self) -> BTreeSet<&'a str> {
        self.auxiliaries
            .iter()
            .map(|aux| aux.point_type.as_str())
            .collect()
    }

    /// First auxiliary carrying `code`, in input order.
    fn auxiliary(&self, code: &str) -> Option<&'a AuxiliaryPoint> {
        self.auxiliaries
            .iter()
            .copied()
            .find(|aux| aux.point_type == code)
    }
}

/// Runs the per-tracker slope check and Y adjustment over both tables.
///
/// Trackers are visited in ascending id order. Inputs are never mutated, so
/// repeated runs over the same tables produce identical outcomes.
pub fn run_analysis(
    originals: &[OriginalPoint],
    auxiliaries: &[AuxiliaryPoint],
    config: &AnalysisConfig,
) -> AnalysisOutcome {
    let mut piles_by_tracker: BTreeMap<&str, Vec<Pile>> = BTreeMap::new();
    for (row, point) in originals.iter().enumerate() {
        if let (Some(tracker), Some(index)) = (point.tracker_id.as_deref(), point.pile_index()) {
            piles_by_tracker
                .entry(tracker)
                .or_default()
                .push(Pile { row, index });
        }
    }

    let mut aux_by_tracker: HashMap<&str, Vec<&AuxiliaryPoint>> = HashMap::new();
    for aux in auxiliaries {
        aux_by_tracker
            .entry(aux.tracker_id.as_str())
            .or_default()
            .push(aux);
    }

    let mut adjuster = RowAdjuster {
        threshold_percent: config.slope_threshold_percent,
        points: originals.iter().cloned().map(PointResult::unadjusted).collect(),
        missing: Vec::new(),
        decisions: Vec::new(),
        log: ProcessLog::default(),
    };

    for (tracker_id, mut piles) in piles_by_tracker {
        let Some(tracker_aux) = aux_by_tracker.get(tracker_id) else {
            debug!(tracker = tracker_id, "no auxiliary points, skipping tracker");
            continue;
        };

        piles.sort_by(|a, b| a.index.total_cmp(&b.index));
        let midpoint = piles.len() as f64 / 2.0;
        debug!(
            tracker = tracker_id,
            piles = piles.len(),
            midpoint,
            "analysing tracker"
        );

        let row = TrackerRow {
            id: tracker_id,
            piles,
            midpoint,
            auxiliaries: tracker_aux.as_slice(),
        };

        for side in Side::ALL {
            adjuster.adjust_side(&row, side);
        }
    }

    let summary = PointSummary::from_points(originals);

    AnalysisOutcome {
        points: adjuster.points,
        missing: adjuster.missing,
        decisions: adjuster.decisions,
        log: adjuster.log,
        summary,
    }
}

struct RowAdjuster {
    threshold_percent: f64,
    points: Vec<PointResult>,
    missing: Vec<MissingAuxiliaryRecord>,
    decisions: Vec<SideReport>,
    log: ProcessLog,
}

impl RowAdjuster {
    fn adjust_side(&mut self, row: &TrackerRow<'_>, side: Side) {
        let present = row.present_codes();
        let required = side.required_codes();

        if !required.iter().any(|code| present.contains(code)) {
            return;
        }

        let (Some(north), Some(south), Some(center)) = (
            row.auxiliary(side.north_code()),
            row.auxiliary(side.south_code()),
            row.auxiliary(side.center_code()),
        ) else {
            let missing_codes: BTreeSet<String> = required
                .iter()
                .filter(|code| !present.contains(*code))
                .map(|code| code.to_string())
                .collect();
            self.report_incomplete(row, side, missing_codes);
            return;
        };

        self.log.info(row.id, side, "row complete, analysing slope");
        let decision = self.adjust_complete_side(row, side, [north, south, center]);
        self.decide(row, side, decision);
    }

    fn report_incomplete(
        &mut self,
        row: &TrackerRow<'_>,
        side: Side,
        missing_codes: BTreeSet<String>,
    ) {
        let record = MissingAuxiliaryRecord {
            tracker_id: row.id.to_string(),
            side,
            missing_codes: missing_codes.clone(),
        };
        warn!(
            tracker = row.id,
            side = side.as_str(),
            missing = %record.joined_codes(),
            "auxiliary row incomplete"
        );
        self.log.error(
            row.id,
            side,
            format!("row incomplete, missing: {}", record.joined_codes()),
        );
        self.missing.push(record);
        self.decide(row, side, SideDecision::Incomplete { missing_codes });
    }

    /// `trio` is north, south, center.
    fn adjust_complete_side(
        &mut self,
        row: &TrackerRow<'_>,
        side: Side,
        trio: [&AuxiliaryPoint; 3],
    ) -> SideDecision {
        let [north, south, center] = trio;

        let delta_y_total = north.y - south.y;
        if delta_y_total == 0.0 {
            warn!(tracker = row.id, side = side.as_str(), "zero Y distance");
            self.log.warning(
                row.id,
                side,
                format!(
                    "Y distance between {} and {} is zero, slope not computable",
                    side.north_code(),
                    side.south_code()
                ),
            );
            return SideDecision::ZeroDistance;
        }

        let slope_percent = slope_percent(north.z_real, south.z_real, delta_y_total);
        if slope_percent <= self.threshold_percent {
            self.log.info(
                row.id,
                side,
                format!(
                    "slope {slope_percent:.2}% (<={}%), no adjustment required",
                    self.threshold_percent
                ),
            );
            return SideDecision::WithinTolerance { slope_percent };
        }

        info!(
            tracker = row.id,
            side = side.as_str(),
            slope_percent,
            "slope above threshold, adjusting piles"
        );
        self.log.info(
            row.id,
            side,
            format!(
                "slope {slope_percent:.2}% (>{}%), Y will be adjusted",
                self.threshold_percent
            ),
        );

        let ratio = slope_ratio(north.z_real, south.z_real, delta_y_total);
        let targets: Vec<Pile> = row
            .piles
            .iter()
            .copied()
            .filter(|pile| side.targets(pile.index, row.midpoint))
            .collect();
        let targeted: Vec<String> = targets
            .iter()
            .map(|pile| {
                self.points[pile.row]
                    .point
                    .point_type
                    .clone()
                    .unwrap_or_default()
            })
            .collect();
        self.log.info(
            row.id,
            side,
            format!("applying to {} piles: [{}]", side, targeted.join(", ")),
        );

        let mut adjusted = 0;
        let mut failed = 0;
        for pile in targets {
            let result = &mut self.points[pile.row];
            let projection = Projection::new(result.point.y, center.y, ratio);
            match projection.adjusted_y(center.y) {
                Some(adjusted_y) => {
                    result.adjustment = Adjustment::adjusted(adjusted_y);
                    adjusted += 1;
                }
                None => {
                    result.adjustment = Adjustment::failed();
                    failed += 1;
                    warn!(
                        tracker = row.id,
                        pile = %result.point.name,
                        "slope exceeds projected distance"
                    );
                    let message = format!(
                        "math error at {}: slope exceeds 100% of projected distance, skipped",
                        result.point.name
                    );
                    self.log.error(row.id, side, message);
                }
            }
        }

        SideDecision::Adjusted {
            slope_percent,
            targeted,
            adjusted,
            failed,
        }
    }

    fn decide(&mut self, row: &TrackerRow<'_>, side: Side, decision: SideDecision) {
        self.decisions.push(SideReport {
            tracker_id: row.id.to_string(),
            side,
            decision,
        });
    }
}
