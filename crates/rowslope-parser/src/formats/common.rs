use csv::{ReaderBuilder, StringRecord, Trim};

use crate::errors::LoadError;

/// Both tables share the `NAME, X, Y, <elevation>` layout.
pub(crate) const COLUMN_NAMES: [&str; 4] = ["NAME", "X", "Y", "ELEVATION"];

#[derive(Debug, Clone)]
pub(crate) struct RawRow {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub elevation: f64,
}

/// Reads a headerless four-column table. Any malformed row fails the whole
/// table.
pub(crate) fn read_rows(
    loader: &'static str,
    content: &[u8],
    field_delimiter: u8,
) -> Result<Vec<RawRow>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(field_delimiter)
        .from_reader(content);

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|source| LoadError::Csv { loader, source })?;
        let line = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(index as u64 + 1);
        rows.push(parse_record(loader, line, &record)?);
    }

    if rows.is_empty() {
        return Err(LoadError::EmptyData { loader });
    }

    Ok(rows)
}

fn parse_record(
    loader: &'static str,
    line: u64,
    record: &StringRecord,
) -> Result<RawRow, LoadError> {
    if record.len() != COLUMN_NAMES.len() {
        return Err(LoadError::DataRow {
            loader,
            line,
            message: format!(
                "expected {} columns, found {}",
                COLUMN_NAMES.len(),
                record.len()
            ),
        });
    }

    Ok(RawRow {
        name: record[0].to_string(),
        x: parse_coordinate(loader, line, COLUMN_NAMES[1], &record[1])?,
        y: parse_coordinate(loader, line, COLUMN_NAMES[2], &record[2])?,
        elevation: parse_coordinate(loader, line, COLUMN_NAMES[3], &record[3])?,
    })
}

fn parse_coordinate(
    loader: &'static str,
    line: u64,
    column: &'static str,
    value: &str,
) -> Result<f64, LoadError> {
    let parsed: f64 = value.parse().map_err(|_| LoadError::DataRow {
        loader,
        line,
        message: format!("column {column} value '{value}' is not numeric"),
    })?;

    if !parsed.is_finite() {
        return Err(LoadError::DataRow {
            loader,
            line,
            message: format!("column {column} value '{value}' is not finite"),
        });
    }

    Ok(parsed)
}
