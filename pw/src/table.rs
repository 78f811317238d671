//! Table sources: sample one row of a delimited file

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, warn};

use crate::error::SourceError;

/// Default field delimiter for table sources
pub const DEFAULT_DELIMITER: u8 = b',';

/// Header (trimmed, lower-cased) to trimmed cell value
pub type SampledRow = HashMap<String, String>;

/// Result of sampling a table source
#[derive(Debug)]
pub enum TableSample {
    /// One row chosen uniformly at random
    Row(SampledRow),
    /// The file has no header or no data rows
    NoRows,
    /// The file could not be opened or parsed
    Unusable(SourceError),
}

impl TableSample {
    pub fn row(&self) -> Option<&SampledRow> {
        match self {
            Self::Row(row) => Some(row),
            _ => None,
        }
    }
}

/// Parsed table: normalized headers plus raw data records
struct Table {
    headers: Vec<String>,
    records: Vec<csv::StringRecord>,
}

/// Pick one data row of the table at `path`
///
/// Failures are absorbed: they are logged and reported as
/// [`TableSample::Unusable`], never returned as errors.
pub fn sample_row<R: Rng + ?Sized>(path: &Path, delimiter: u8, rng: &mut R) -> TableSample {
    debug!(path = %path.display(), "table::sample_row: called");

    let table = match read_table(path, delimiter) {
        Ok(table) => table,
        Err(e) => {
            warn!(path = %e.path().display(), "{}", e);
            return TableSample::Unusable(e);
        }
    };

    let Some(record) = table.records.choose(rng) else {
        debug!(path = %path.display(), "table::sample_row: no data rows");
        return TableSample::NoRows;
    };

    // Positional zip: surplus cells or headers are left unmatched
    let row: SampledRow = table
        .headers
        .iter()
        .zip(record.iter())
        .map(|(header, cell)| (header.clone(), cell.trim().to_string()))
        .collect();

    TableSample::Row(row)
}

/// Read the header names of the table at `path`
pub fn read_headers(path: &Path, delimiter: u8) -> Result<Vec<String>, SourceError> {
    read_table(path, delimiter).map(|table| table.headers)
}

fn read_table(path: &Path, delimiter: u8) -> Result<Table, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut records = reader.records();

    let headers = match records.next() {
        Some(header) => header
            .map_err(|source| SourceError::Table {
                path: path.to_path_buf(),
                source,
            })?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect(),
        None => Vec::new(),
    };

    let records = records
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| SourceError::Table {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(Table { headers, records })
}
