//! Point-name conventions shared by both survey datasets.
//!
//! A point name is `<tracker>_<type>[_...]`. Piles carry a purely numeric type
//! (`T12_7`), auxiliary reference points carry a side/position code (`T12_EN`).

pub const DEFAULT_NAME_DELIMITER: char = '_';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedName {
    Recognized {
        tracker_id: String,
        point_type: String,
    },
    Unrecognized,
}

impl ParsedName {
    pub fn into_parts(self) -> Option<(String, String)> {
        match self {
            ParsedName::Recognized {
                tracker_id,
                point_type,
            } => Some((tracker_id, point_type)),
            ParsedName::Unrecognized => None,
        }
    }
}

/// Splits an original point name into tracker id and point type.
///
/// Only the first two tokens are used; anything after them is ignored.
pub fn parse_original_name(name: &str, delimiter: char) -> ParsedName {
    let mut tokens = name.split(delimiter);
    match (tokens.next(), tokens.next()) {
        (Some(tracker_id), Some(point_type)) => ParsedName::Recognized {
            tracker_id: tracker_id.to_string(),
            point_type: point_type.to_string(),
        },
        _ => ParsedName::Unrecognized,
    }
}

/// Like [`parse_original_name`], but numeric point types belong to the pile
/// dataset and are rejected.
pub fn parse_auxiliary_name(name: &str, delimiter: char) -> ParsedName {
    match parse_original_name(name, delimiter) {
        ParsedName::Recognized { point_type, .. } if is_pile_code(&point_type) => {
            ParsedName::Unrecognized
        }
        parsed => parsed,
    }
}

/// True for non-empty, all-ASCII-digit codes.
pub fn is_pile_code(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit())
}

/// Numeric position of a pile along its row. Parsed as `f64` so every code
/// [`is_pile_code`] accepts has an index, however many digits it carries.
pub fn pile_index(code: &str) -> Option<f64> {
    if is_pile_code(code) {
        code.parse().ok()
    } else {
        None
    }
}
