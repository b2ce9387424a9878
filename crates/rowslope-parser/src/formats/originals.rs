use crate::errors::LoadError;
use crate::model::{OriginalPoint, ParsedTable};
use crate::naming::parse_original_name;
use crate::registry::{LoaderOptions, TableLoader};

use super::read_rows;

/// Loads `NAME, X, Y, Z`. Rows whose name cannot be split are kept with no
/// tracker information.
pub struct OriginalsLoader {
    options: LoaderOptions,
}

impl Default for OriginalsLoader {
    fn default() -> Self {
        Self::new(LoaderOptions::default())
    }
}

impl OriginalsLoader {
    const NAME: &'static str = "ORIGINALS";

    pub fn new(options: LoaderOptions) -> Self {
        Self { options }
    }
}

impl TableLoader for OriginalsLoader {
    type Row = OriginalPoint;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, content: &[u8]) -> Result<ParsedTable<OriginalPoint>, LoadError> {
        let rows = read_rows(Self::NAME, content, self.options.field_delimiter)?
            .into_iter()
            .map(|raw| {
                let (tracker_id, point_type) =
                    match parse_original_name(&raw.name, self.options.name_delimiter)
                        .into_parts()
                    {
                        Some((tracker, point_type)) => (Some(tracker), Some(point_type)),
                        None => (None, None),
                    };
                OriginalPoint {
                    name: raw.name,
                    x: raw.x,
                    y: raw.y,
                    z: raw.elevation,
                    tracker_id,
                    point_type,
                }
            })
            .collect();

        Ok(ParsedTable {
            rows,
            dropped_rows: 0,
        })
    }
}
