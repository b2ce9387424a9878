use crate::errors::LoadError;
use crate::model::{AuxiliaryPoint, ParsedTable};
use crate::naming::parse_auxiliary_name;
use crate::registry::{LoaderOptions, TableLoader};

use super::{read_rows, RawRow};

/// Loads `NAME, X, Y, Z_REAL`. Rows that are not auxiliary points (pile names,
/// names without a type token) are dropped and counted.
pub struct AuxiliariesLoader {
    options: LoaderOptions,
}

impl Default for AuxiliariesLoader {
    fn default() -> Self {
        Self::new(LoaderOptions::default())
    }
}

impl AuxiliariesLoader {
    const NAME: &'static str = "AUXILIARIES";

    pub fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    fn convert(&self, raw: RawRow) -> Option<AuxiliaryPoint> {
        let (tracker_id, point_type) =
            parse_auxiliary_name(&raw.name, self.options.name_delimiter).into_parts()?;
        Some(AuxiliaryPoint {
            name: raw.name,
            x: raw.x,
            y: raw.y,
            z_real: raw.elevation,
            tracker_id,
            point_type,
        })
    }
}

impl TableLoader for AuxiliariesLoader {
    type Row = AuxiliaryPoint;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, content: &[u8]) -> Result<ParsedTable<AuxiliaryPoint>, LoadError> {
        let raw_rows = read_rows(Self::NAME, content, self.options.field_delimiter)?;
        let total = raw_rows.len();

        let rows: Vec<AuxiliaryPoint> = raw_rows
            .into_iter()
            .filter_map(|raw| self.convert(raw))
            .collect();

        Ok(ParsedTable {
            dropped_rows: total - rows.len(),
            rows,
        })
    }
}
