use serde::{Deserialize, Serialize};

use crate::naming::pile_index;

/// A staked point from the originals table (`NAME, X, Y, Z`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginalPoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub tracker_id: Option<String>,
    pub point_type: Option<String>,
}

impl OriginalPoint {
    /// Numeric pile index when this point is a pile.
    pub fn pile_index(&self) -> Option<f64> {
        self.point_type.as_deref().and_then(pile_index)
    }
}

/// A reference point from the auxiliaries table (`NAME, X, Y, Z_REAL`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryPoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z_real: f64,
    pub tracker_id: String,
    pub point_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable<T> {
    pub rows: Vec<T>,
    /// Rows read successfully but discarded because their name carried no
    /// tracker information.
    pub dropped_rows: usize,
}

impl<T> ParsedTable<T> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
