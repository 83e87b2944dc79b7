//! CSV record files
//!
//! Header row `system,model,single_core,multi_core`, with a trailing `url`
//! column when any record carries a detail link.

use crate::models::Record;
use crate::utils::error::StoreError;

const HEADER: [&str; 4] = ["system", "model", "single_core", "multi_core"];
const URL_COLUMN: &str = "url";

/// Encode records as CSV
///
/// # Errors
///
/// Returns `StoreError::Csv` if writing a row fails.
pub fn to_string(records: &[Record]) -> Result<String, StoreError> {
    let with_url = records.iter().any(|record| record.url.is_some());
    let mut writer = csv::Writer::from_writer(vec![]);

    if with_url {
        writer.write_record(HEADER.iter().chain(std::iter::once(&URL_COLUMN)))?;
    } else {
        writer.write_record(HEADER)?;
    }

    for record in records {
        let mut row = vec![
            record.system.as_str(),
            record.model.as_str(),
            record.single_core.as_str(),
            record.multi_core.as_str(),
        ];
        if with_url {
            row.push(record.url.as_deref().unwrap_or_default());
        }
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| StoreError::Io(std::io::Error::other(e)))
}

/// Column positions resolved from the header row
struct Columns {
    system: Option<usize>,
    model: Option<usize>,
    single_core: Option<usize>,
    multi_core: Option<usize>,
    url: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        Self {
            system: find("system"),
            model: find("model"),
            single_core: find("single_core"),
            multi_core: find("multi_core"),
            url: find(URL_COLUMN),
        }
    }
}

fn cell(row: &csv::StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|i| row.get(i))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Decode CSV with a header row
///
/// Columns are matched by name, so their order does not matter. Missing
/// columns and empty cells fall back to `"Unknown"`, `"N/A"` or no URL.
///
/// # Errors
///
/// Returns `StoreError::Csv` on malformed input.
pub fn from_str(content: &str) -> Result<Vec<Record>, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());
    let columns = Columns::from_headers(reader.headers()?);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let url = cell(&row, columns.url);
        records.push(Record::new(
            cell(&row, columns.system),
            cell(&row, columns.model),
            cell(&row, columns.single_core),
            cell(&row, columns.multi_core),
            Some(url),
        ));
    }

    Ok(records)
}
