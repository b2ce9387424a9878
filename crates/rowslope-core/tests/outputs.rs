use std::collections::BTreeSet;

use anyhow::Result;
use rowslope_core::outputs::{
    adjusted_frame, missing_frame, preview_rows, write_csv, ADJUSTED_COLUMNS, MISSING_COLUMNS,
};
use rowslope_core::report::{PointSummary, ProcessLog};
use rowslope_core::types::{Adjustment, MissingAuxiliaryRecord, PointResult, Side};
use rowslope_core::AnalysisOutcome;
use rowslope_parser::OriginalPoint;

fn point(name: &str, y: f64) -> OriginalPoint {
    let (tracker, code) = name.split_once('_').unwrap();
    OriginalPoint {
        name: name.to_string(),
        x: 12.5,
        y,
        z: 101.0,
        tracker_id: Some(tracker.to_string()),
        point_type: Some(code.to_string()),
    }
}

fn missing(tracker: &str, side: Side, codes: &[&str]) -> MissingAuxiliaryRecord {
    MissingAuxiliaryRecord {
        tracker_id: tracker.to_string(),
        side,
        missing_codes: codes.iter().map(|code| code.to_string()).collect::<BTreeSet<_>>(),
    }
}

fn outcome(points: Vec<PointResult>, missing: Vec<MissingAuxiliaryRecord>) -> AnalysisOutcome {
    AnalysisOutcome {
        points,
        missing,
        decisions: Vec::new(),
        log: ProcessLog::default(),
        summary: PointSummary::default(),
    }
}

fn sample() -> AnalysisOutcome {
    let mut adjusted = PointResult::unadjusted(point("T1_3", 85.0));
    adjusted.adjustment = Adjustment::adjusted(84.5);
    let mut failed = PointResult::unadjusted(point("T1_4", 95.0));
    failed.adjustment = Adjustment::failed();

    outcome(
        vec![
            PointResult::unadjusted(point("T1_1", 50.0)),
            adjusted,
            failed,
        ],
        vec![
            missing("T2", Side::West, &["WS"]),
            missing("T5", Side::East, &["EN", "ES"]),
            missing("T2", Side::West, &["WS"]),
        ],
    )
}

#[test]
fn adjusted_frame_holds_only_adjusted_piles() -> Result<()> {
    let frame = adjusted_frame(&sample())?;

    let columns: Vec<&str> = frame.get_column_names().iter().map(|c| c.as_str()).collect();
    assert_eq!(columns, ADJUSTED_COLUMNS.to_vec());
    assert_eq!(frame.height(), 1);

    let y = frame.column("Y")?.f64()?.get(0);
    assert_eq!(y, Some(84.5));
    let code = frame.column("CODE")?.str()?.get(0);
    assert_eq!(code, Some("ajustado"));
    Ok(())
}

#[test]
fn missing_frame_drops_repeated_rows() -> Result<()> {
    let frame = missing_frame(&sample())?;

    let columns: Vec<&str> = frame.get_column_names().iter().map(|c| c.as_str()).collect();
    assert_eq!(columns, MISSING_COLUMNS.to_vec());
    assert_eq!(frame.height(), 2);
    Ok(())
}

#[test]
fn csv_quotes_joined_codes() -> Result<()> {
    let mut frame = missing_frame(&sample())?;
    let text = write_csv(&mut frame, true, b',')?;

    assert_eq!(text, "TRACKER_ID,MISSING_CODES\nT2,WS\nT5,\"EN,ES\"\n");

    let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());
    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect::<std::result::Result<_, _>>()?;
    assert_eq!(rows[1], vec!["T5".to_string(), "EN,ES".to_string()]);
    Ok(())
}

#[test]
fn headerless_adjusted_csv() -> Result<()> {
    let mut frame = adjusted_frame(&sample())?;
    let csv = write_csv(&mut frame, false, b',')?;

    assert_eq!(csv.lines().count(), 1);
    assert!(csv.starts_with("T1_3,12.5,84.5,"));
    assert!(csv.trim_end().ends_with(",ajustado"));
    Ok(())
}

#[test]
fn preview_reports_signed_delta() {
    let rows = preview_rows(&sample());

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "T1_3");
    assert_eq!(rows[0].y_original, 85.0);
    assert_eq!(rows[0].y_adjusted, 84.5);
    assert_eq!(rows[0].delta_y, -0.5);
}

#[test]
fn empty_outcome_gives_empty_frames() -> Result<()> {
    let empty = outcome(Vec::new(), Vec::new());

    assert_eq!(adjusted_frame(&empty)?.height(), 0);
    assert_eq!(missing_frame(&empty)?.height(), 0);
    assert!(preview_rows(&empty).is_empty());
    Ok(())
}
