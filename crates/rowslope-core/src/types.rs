use std::collections::BTreeSet;
use std::fmt;

use rowslope_parser::OriginalPoint;
use serde::Serialize;

/// One half of a tracker row, monitored by its own trio of auxiliary points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    East,
    West,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::East, Side::West];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::East => "EAST",
            Side::West => "WEST",
        }
    }

    pub fn north_code(&self) -> &'static str {
        match self {
            Side::East => "EN",
            Side::West => "WN",
        }
    }

    pub fn south_code(&self) -> &'static str {
        match self {
            Side::East => "ES",
            Side::West => "WS",
        }
    }

    pub fn center_code(&self) -> &'static str {
        match self {
            Side::East => "EO",
            Side::West => "WO",
        }
    }

    pub fn required_codes(&self) -> [&'static str; 3] {
        [self.north_code(), self.south_code(), self.center_code()]
    }

    /// East adjusts the far half of the row, West the near half.
    pub fn targets(&self, pile_index: f64, midpoint: f64) -> bool {
        match self {
            Side::East => pile_index > midpoint,
            Side::West => pile_index <= midpoint,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentCode {
    #[default]
    None,
    Adjusted,
    ErrorAdjust,
}

impl AdjustmentCode {
    /// Code written to exports.
    pub fn as_code(&self) -> &'static str {
        match self {
            AdjustmentCode::None => "",
            AdjustmentCode::Adjusted => "ajustado",
            AdjustmentCode::ErrorAdjust => "error_ajuste",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Adjustment {
    pub adjusted_y: Option<f64>,
    pub code: AdjustmentCode,
}

impl Adjustment {
    pub fn adjusted(adjusted_y: f64) -> Self {
        Self {
            adjusted_y: Some(adjusted_y),
            code: AdjustmentCode::Adjusted,
        }
    }

    pub fn failed() -> Self {
        Self {
            adjusted_y: None,
            code: AdjustmentCode::ErrorAdjust,
        }
    }
}

/// An original point together with whatever the engine decided for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointResult {
    pub point: OriginalPoint,
    pub adjustment: Adjustment,
}

impl PointResult {
    pub fn unadjusted(point: OriginalPoint) -> Self {
        Self {
            point,
            adjustment: Adjustment::default(),
        }
    }

    pub fn code(&self) -> AdjustmentCode {
        self.adjustment.code
    }

    /// Adjusted Y when present, otherwise the surveyed Y.
    pub fn final_y(&self) -> f64 {
        self.adjustment.adjusted_y.unwrap_or(self.point.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MissingAuxiliaryRecord {
    pub tracker_id: String,
    pub side: Side,
    pub missing_codes: BTreeSet<String>,
}

impl MissingAuxiliaryRecord {
    pub fn joined_codes(&self) -> String {
        self.missing_codes
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// What the engine concluded for one tracker side that had auxiliary data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum SideDecision {
    Incomplete {
        missing_codes: BTreeSet<String>,
    },
    ZeroDistance,
    WithinTolerance {
        slope_percent: f64,
    },
    Adjusted {
        slope_percent: f64,
        targeted: Vec<String>,
        adjusted: usize,
        failed: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideReport {
    pub tracker_id: String,
    pub side: Side,
    #[serde(flatten)]
    pub decision: SideDecision,
}
