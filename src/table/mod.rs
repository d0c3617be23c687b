// src/table/mod.rs
use crate::error::{ConvertError, Result};
use std::{fs, path::Path, time::Instant};
use tracing::info;

pub mod parse;
pub mod write;

pub use parse::{locate_data_start, normalize_field, parse_rows, split_row};
pub use write::{write_csv_atomic, write_rows};

/// Output header, in column order.
pub const HEADER: [&str; 6] = [
    "Ansiotulo (€/vuosi)",
    "Kk-palkka (€)",
    "Verot ja maksut (€/v)",
    "Vero-prosentti",
    "Marginaali-vero",
    "Nettotulo (€/v)",
];

pub const COLUMN_COUNT: usize = HEADER.len();

/// One converted table line: annual income, monthly salary, taxes and fees,
/// tax percentage, marginal tax rate, net annual income. Fields have no spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRow(pub [String; COLUMN_COUNT]);

impl DataRow {
    pub fn fields(&self) -> &[String; COLUMN_COUNT] {
        &self.0
    }
}

/// Read `input_path`, convert its table and write the CSV to `output_path`.
///
/// Every row is validated before the output is touched, so on error the
/// destination is either absent or exactly what it was before.
#[tracing::instrument(level = "info", skip_all, fields(input = %input_path.as_ref().display(), output = %output_path.as_ref().display()))]
pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(input_path: P, output_path: Q) -> Result<()> {
    let start = Instant::now();
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();

    let text = fs::read_to_string(input_path).map_err(|source| ConvertError::Read {
        path: input_path.to_path_buf(),
        source,
    })?;

    let rows = parse_rows(&text)?;
    write_csv_atomic(output_path, &rows)?;

    info!(rows = rows.len(), elapsed = ?start.elapsed(), "wrote csv");
    Ok(())
}
