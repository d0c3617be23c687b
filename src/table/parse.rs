use crate::error::{ConvertError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{DataRow, COLUMN_COUNT};

/// Column gaps are tab runs or two-plus whitespace; a single space stays inside a field.
static COLUMN_GAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\t+|\s{2,}").expect("column gap pattern is valid"));

/// Any Unicode decimal digit (category Nd) opens the data region, not just `0-9`.
static DATA_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d").expect("data line pattern is valid"));

/// Index of the first line that starts with a digit.
pub fn locate_data_start<S: AsRef<str>>(lines: &[S]) -> Result<usize> {
    lines
        .iter()
        .position(|line| DATA_LINE.is_match(line.as_ref()))
        .ok_or(ConvertError::NoDataFound)
}

/// Split one table line into its raw fields, dropping empty pieces left by
/// leading or trailing separators. Does not check the field count.
pub fn split_row(line: &str) -> Vec<String> {
    COLUMN_GAP
        .split(line.trim())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip every space, e.g. "24 000" -> "24000".
pub fn normalize_field(value: &str) -> String {
    value.replace(' ', "")
}

/// Turn the whole source text into validated rows.
///
/// Blank lines are dropped before anything else, so the data region may contain them.
/// Fails on the first line that does not split into exactly `COLUMN_COUNT` fields.
pub fn parse_rows(text: &str) -> Result<Vec<DataRow>> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let start = locate_data_start(&lines)?;
    debug!(start, total = lines.len(), "located data start");

    lines[start..]
        .iter()
        .map(|line| -> Result<DataRow> {
            let parts = split_row(line);
            let count = parts.len();
            let fields: [String; COLUMN_COUNT] = parts
                .iter()
                .map(|p| normalize_field(p))
                .collect::<Vec<_>>()
                .try_into()
                .map_err(|_| ConvertError::ColumnCount {
                    line: line.to_string(),
                    count,
                })?;
            Ok(DataRow(fields))
        })
        .collect()
}
