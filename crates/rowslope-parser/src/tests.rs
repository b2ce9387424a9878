use std::fs;
use std::path::PathBuf;

use crate::errors::LoadError;
use crate::formats::{AuxiliariesLoader, OriginalsLoader};
use crate::naming::{is_pile_code, parse_auxiliary_name, parse_original_name, pile_index, ParsedName};
use crate::registry::{LoaderOptions, TableLoader};
use crate::{load_auxiliaries, load_originals};

fn fixture(path: &str) -> Vec<u8> {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_path = base.join("tests/data").join(path);
    fs::read(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

fn recognized(tracker_id: &str, point_type: &str) -> ParsedName {
    ParsedName::Recognized {
        tracker_id: tracker_id.to_string(),
        point_type: point_type.to_string(),
    }
}

#[test]
fn original_name_uses_first_two_tokens() {
    assert_eq!(parse_original_name("T1_3", '_'), recognized("T1", "3"));
    assert_eq!(parse_original_name("T1_EN_extra", '_'), recognized("T1", "EN"));
    assert_eq!(parse_original_name("T1_", '_'), recognized("T1", ""));
}

#[test]
fn original_name_without_delimiter_is_unrecognized() {
    assert_eq!(parse_original_name("BADNAME", '_'), ParsedName::Unrecognized);
    assert_eq!(parse_original_name("", '_'), ParsedName::Unrecognized);
}

#[test]
fn auxiliary_name_rejects_pile_codes() {
    assert_eq!(parse_auxiliary_name("T1_EN", '_'), recognized("T1", "EN"));
    assert_eq!(parse_auxiliary_name("T1_12", '_'), ParsedName::Unrecognized);
    assert_eq!(parse_auxiliary_name("NOTYPE", '_'), ParsedName::Unrecognized);
    // mixed alphanumerics are not pile codes
    assert_eq!(parse_auxiliary_name("T1_1A", '_'), recognized("T1", "1A"));
}

#[test]
fn pile_codes_are_ascii_digits_only() {
    assert!(is_pile_code("7"));
    assert!(is_pile_code("012"));
    assert!(!is_pile_code(""));
    assert!(!is_pile_code("-1"));
    assert!(!is_pile_code("1.5"));
    assert!(!is_pile_code("EN"));
    assert_eq!(pile_index("012"), Some(12.0));
    assert_eq!(pile_index("99999999999999999999"), Some(1e20));
    assert_eq!(pile_index("EO"), None);
}

#[test]
fn custom_name_delimiter() {
    assert_eq!(parse_original_name("T9-4", '-'), recognized("T9", "4"));
    assert_eq!(parse_original_name("T9_4", '-'), ParsedName::Unrecognized);
}

#[test]
fn loads_originals_fixture() {
    let table = load_originals(&fixture("originals_site.csv"), LoaderOptions::default())
        .expect("originals load failed");

    assert_eq!(table.len(), 13);
    assert_eq!(table.dropped_rows, 0);

    let first = &table.rows[0];
    assert_eq!(first.name, "T1_1");
    assert_eq!(first.tracker_id.as_deref(), Some("T1"));
    assert_eq!(first.point_type.as_deref(), Some("1"));
    assert_eq!(first.pile_index(), Some(1.0));
    assert!((first.y - 50.0).abs() < 1e-9);
    assert!((first.z - 100.0).abs() < 1e-9);

    let en = table
        .rows
        .iter()
        .find(|row| row.name == "T1_EN")
        .expect("missing T1_EN");
    assert_eq!(en.pile_index(), None);

    let bad = table.rows.last().expect("rows present");
    assert_eq!(bad.name, "BADNAME");
    assert!(bad.tracker_id.is_none());
    assert!(bad.point_type.is_none());
}

#[test]
fn loads_auxiliaries_fixture_and_drops_non_auxiliary_rows() {
    let table = load_auxiliaries(&fixture("auxiliaries_site.csv"), LoaderOptions::default())
        .expect("auxiliaries load failed");

    assert_eq!(table.len(), 5);
    assert_eq!(table.dropped_rows, 2);
    assert!(table.rows.iter().all(|row| !is_pile_code(&row.point_type)));

    let eo = table
        .rows
        .iter()
        .find(|row| row.tracker_id == "T1" && row.point_type == "EO")
        .expect("missing T1_EO");
    assert!((eo.y - 75.0).abs() < 1e-9);
    assert!((eo.z_real - 105.0).abs() < 1e-9);
}

#[test]
fn non_numeric_coordinate_fails_whole_table() {
    let err = load_originals(
        &fixture("originals_bad_coordinate.csv"),
        LoaderOptions::default(),
    )
    .expect_err("non-numeric Y must fail");

    match err {
        LoadError::DataRow {
            loader,
            line,
            message,
        } => {
            assert_eq!(loader, "ORIGINALS");
            assert_eq!(line, 2);
            assert!(message.contains("abc"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn short_row_fails_whole_table() {
    let err = load_originals(&fixture("originals_short_row.csv"), LoaderOptions::default())
        .expect_err("short row must fail");
    assert!(matches!(err, LoadError::DataRow { line: 2, .. }));
}

#[test]
fn empty_content_is_rejected() {
    let err = AuxiliariesLoader::default()
        .parse(b"")
        .expect_err("empty table must fail");
    assert!(matches!(err, LoadError::EmptyData { loader: "AUXILIARIES" }));
}

#[test]
fn non_finite_coordinates_are_rejected() {
    let err = OriginalsLoader::default()
        .parse(b"T1_1,NaN,1.0,2.0\n")
        .expect_err("NaN must fail");
    assert!(matches!(err, LoadError::DataRow { line: 1, .. }));
}

#[test]
fn semicolon_tables_with_padding_and_blank_lines() {
    let options = LoaderOptions {
        field_delimiter: b';',
        ..LoaderOptions::default()
    };
    let content = b"T4_1 ; 1.5 ; 2.5 ; 3.5\n\nT4_2;1.0;2.0;3.0\n";

    let loader = OriginalsLoader::new(options);
    assert_eq!(loader.name(), "ORIGINALS");
    let table = loader.parse(content).expect("semicolon table");

    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0].name, "T4_1");
    assert!((table.rows[0].x - 1.5).abs() < 1e-9);
    assert_eq!(table.rows[1].pile_index(), Some(2.0));
}
