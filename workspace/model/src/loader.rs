//! Reads the country-level CSV snapshot into a [`Dataset`].

use polars::prelude::*;
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument, trace};

use crate::dataset::Dataset;
use crate::record::{Metric, Record};

const COUNTRY_COLUMN: &str = "Country/Region";
const REGION_COLUMN: &str = "WHO Region";

/// Columns that must be present in the header. Any others are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    COUNTRY_COLUMN,
    REGION_COLUMN,
    "Confirmed",
    "Deaths",
    "Recovered",
    "Active",
    "New cases",
    "New deaths",
];

/// Errors raised while loading the dataset. All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened or read
    #[error("Cannot read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Required columns are missing or the rows break a dataset invariant
    #[error("Schema error: {0}")]
    Schema(String),

    /// The file is not parseable CSV or a cell holds an unusable value
    #[error("Malformed dataset: {0}")]
    Malformed(String),
}

impl From<PolarsError> for LoadError {
    fn from(error: PolarsError) -> Self {
        LoadError::Malformed(error.to_string())
    }
}

/// Loads the dataset from a CSV file with a header row.
#[instrument]
pub fn load(path: &Path) -> Result<Dataset, LoadError> {
    trace!("Opening dataset file");
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(file)
        .finish()?;
    debug!("Parsed CSV with {} rows and {} columns", df.height(), df.width());

    let records = records_from_dataframe(&df)?;
    info!("Loaded {} records from {}", records.len(), path.display());

    Ok(Dataset::new(records, path))
}

/// Converts a parsed frame into records, validating the schema on the way.
pub fn records_from_dataframe(df: &DataFrame) -> Result<Vec<Record>, LoadError> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| df.get_column_index(name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::Schema(format!(
            "missing required columns: {}",
            missing.join(", ")
        )));
    }

    // A header-only file parses every column as text; there are no cells to check.
    if df.height() == 0 {
        debug!("Dataset has a header but no rows");
        return Ok(Vec::new());
    }

    let country_col = df.column(COUNTRY_COLUMN)?;
    let region_col = df.column(REGION_COLUMN)?;
    for metric in Metric::ALL {
        let col = df.column(metric.column())?;
        if !col.dtype().is_integer() {
            return Err(LoadError::Malformed(format!(
                "column '{}' must hold integers, found {}",
                metric.column(),
                col.dtype()
            )));
        }
        if col.null_count() > 0 {
            return Err(LoadError::Malformed(format!(
                "column '{}' has {} empty cells",
                metric.column(),
                col.null_count()
            )));
        }
    }

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(df.height());

    for i in 0..df.height() {
        let line = file_line(i);
        let country = text_cell(country_col, i, COUNTRY_COLUMN)?;
        let who_region = text_cell(region_col, i, REGION_COLUMN)?;

        if !seen.insert(country.clone()) {
            return Err(LoadError::Schema(format!(
                "duplicate Country/Region '{}' at line {}",
                country, line
            )));
        }

        let mut record = Record::new(country, who_region);
        for metric in Metric::ALL {
            let value = df
                .column(metric.column())?
                .get(i)?
                .try_extract::<i64>()
                .map_err(|e| {
                    LoadError::Malformed(format!(
                        "line {}, column '{}': {}",
                        line,
                        metric.column(),
                        e
                    ))
                })?;
            record = record.with(metric, value);
        }
        records.push(record);
    }

    Ok(records)
}

/// 1-based line in the file of a frame row; the header is line 1.
fn file_line(row: usize) -> usize {
    row + 2
}

fn text_cell(col: &Column, row: usize, name: &str) -> Result<String, LoadError> {
    match col.get(row)? {
        AnyValue::String(s) => Ok(s.to_string()),
        AnyValue::StringOwned(s) => Ok(s.to_string()),
        AnyValue::Null => Err(LoadError::Malformed(format!(
            "line {}, column '{}': empty cell",
            file_line(row),
            name
        ))),
        other => Ok(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Country/Region,Confirmed,Deaths,Recovered,Active,New cases,New deaths,WHO Region";

    fn write_csv(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_reads_rows_in_order() {
        let file = write_csv(&format!(
            "{HEADER}\n\
             Afghanistan,36263,1269,25198,9796,106,10,Eastern Mediterranean\n\
             Albania,4880,144,2745,1991,117,6,Europe\n\
             Algeria,27973,1163,18837,7973,616,8,Africa\n"
        ));

        let dataset = load(file.path()).unwrap();

        assert_eq!(dataset.len(), 3);
        let first = &dataset.records()[0];
        assert_eq!(first.country, "Afghanistan");
        assert_eq!(first.who_region, "Eastern Mediterranean");
        assert_eq!(first.confirmed, 36263);
        assert_eq!(first.new_deaths, 10);
        assert_eq!(dataset.records()[2].country, "Algeria");
        assert_eq!(dataset.source(), file.path());
    }

    #[test]
    fn test_load_accepts_negative_daily_counts_and_extra_columns() {
        let file = write_csv(
            "Country/Region,Confirmed,Deaths,Recovered,Active,New cases,New deaths,WHO Region,1 week change\n\
             Italy,246286,35112,198593,12581,168,-5,Europe,1659\n",
        );

        let dataset = load(file.path()).unwrap();
        assert_eq!(dataset.records()[0].new_deaths, -5);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = load(Path::new("/definitely/not/here/country_wise_latest.csv"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_load_reports_missing_columns() {
        let file = write_csv("Country/Region,Confirmed,WHO Region\nItaly,100,Europe\n");

        let err = load(file.path()).unwrap_err();
        match err {
            LoadError::Schema(message) => {
                assert!(message.contains("Deaths"));
                assert!(message.contains("New deaths"));
                assert!(!message.contains("Confirmed"));
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_duplicate_country() {
        let file = write_csv(&format!(
            "{HEADER}\nItaly,1,1,1,1,1,1,Europe\nItaly,2,2,2,2,2,2,Europe\n"
        ));

        match load(file.path()) {
            Err(LoadError::Schema(message)) => {
                assert!(message.contains("'Italy'"));
                assert!(message.contains("line 3"), "{message}");
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_reports_file_line_of_empty_country() {
        let file = write_csv(&format!(
            "{HEADER}\nItaly,1,1,1,1,1,1,Europe\nSpain,2,2,2,2,2,2,Europe\n,3,3,3,3,3,3,Europe\n"
        ));

        match load(file.path()) {
            Err(LoadError::Malformed(message)) => {
                assert!(message.contains("line 4"), "{message}");
                assert!(message.contains("Country/Region"));
            }
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_accepts_header_only_file() {
        let file = write_csv(&format!("{HEADER}\n"));

        let dataset = load(file.path()).unwrap();

        assert!(dataset.is_empty());
        assert!(dataset.regions().is_empty());
    }

    #[test]
    fn test_load_rejects_non_numeric_metric() {
        let file = write_csv(&format!("{HEADER}\nItaly,lots,1,1,1,1,1,Europe\n"));

        assert!(matches!(load(file.path()), Err(LoadError::Malformed(_))));
    }
}
