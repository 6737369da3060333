//! Delimited table reading and writing

use crate::error::CleanError;
use crate::etl::{Extractor, Loader};

use eyre::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs::File;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Field delimiter of every table read or written
pub const DELIMITER: u8 = b',';

/// A raw source row with a known column contract
pub trait SourceRow: DeserializeOwned {
    /// Columns that must be present in the header
    const REQUIRED_COLUMNS: &'static [&'static str];

    /// Whether `athlete_id` must be unique within the table
    const UNIQUE_IDS: bool = false;

    fn athlete_id(&self) -> u64;
}

/// A cleaned record with a fixed output schema
pub trait CsvRecord {
    /// Flat row type serialized in [`CsvRecord::HEADER`] order
    type Row<'a>: Serialize
    where
        Self: 'a;

    const HEADER: &'static [&'static str];

    fn to_row(&self) -> Self::Row<'_>;
}

/// Read a UTF-8, comma-delimited table into raw rows
pub struct CsvReader<T> {
    path: PathBuf,
    _row: PhantomData<T>,
}

impl<T: SourceRow> CsvReader<T> {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _row: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all rows, validating the header and row shapes
    pub fn read(&self) -> Result<Vec<T>> {
        let file = File::open(&self.path).map_err(|source| CleanError::Read {
            path: self.path.clone(),
            source,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .flexible(false)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| self.table_error(e))?
            .clone();
        let missing: Vec<&str> = T::REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h == *column))
            .collect();
        if !missing.is_empty() {
            return Err(CleanError::schema(
                &self.path,
                format!("missing required column(s): {}", missing.join(", ")),
            )
            .into());
        }

        let mut rows = Vec::new();
        let mut seen = HashSet::new();
        for record in reader.deserialize::<T>() {
            let row = record.map_err(|e| self.table_error(e))?;
            if T::UNIQUE_IDS && !seen.insert(row.athlete_id()) {
                return Err(CleanError::schema(
                    &self.path,
                    format!("duplicate athlete_id {}", row.athlete_id()),
                )
                .into());
            }
            rows.push(row);
        }

        log::debug!("Read {} rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }

    fn table_error(&self, error: csv::Error) -> CleanError {
        let line = error
            .position()
            .map(|p| format!("line {}: ", p.line()))
            .unwrap_or_default();
        match error.into_kind() {
            csv::ErrorKind::Io(source) => CleanError::Read {
                path: self.path.clone(),
                source,
            },
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => CleanError::schema(
                &self.path,
                format!("{line}expected {expected_len} fields, found {len}"),
            ),
            csv::ErrorKind::Utf8 { err, .. } => {
                CleanError::schema(&self.path, format!("{line}invalid UTF-8: {err}"))
            }
            csv::ErrorKind::Deserialize { err, .. } => {
                CleanError::schema(&self.path, format!("{line}{err}"))
            }
            other => CleanError::schema(&self.path, format!("{line}{other:?}")),
        }
    }
}

impl<T: SourceRow> Extractor for CsvReader<T> {
    type Item = T;

    fn extract(&self) -> Result<Vec<Self::Item>> {
        self.read()
    }
}

/// Write cleaned records as a comma-delimited table with a header row
pub struct CsvWriter<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: CsvRecord> CsvWriter<T> {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the header and every record, replacing any existing file
    pub fn write(&self, items: &[T]) -> Result<usize> {
        let file = File::create(&self.path).map_err(|source| CleanError::Write {
            path: self.path.clone(),
            source,
        })?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .from_writer(file);

        writer
            .write_record(T::HEADER)
            .with_context(|| format!("Failed to write header: {}", self.path.display()))?;
        for item in items {
            writer
                .serialize(item.to_row())
                .with_context(|| format!("Failed to write row: {}", self.path.display()))?;
        }
        writer.flush().map_err(|source| CleanError::Write {
            path: self.path.clone(),
            source,
        })?;

        Ok(items.len())
    }
}

impl<T: CsvRecord> Loader for CsvWriter<T> {
    type Item = T;

    fn load(&self, items: &[Self::Item]) -> Result<usize> {
        self.write(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        athlete_id: u64,
        #[serde(rename = "Name")]
        name: Option<String>,
    }

    impl SourceRow for Row {
        const REQUIRED_COLUMNS: &'static [&'static str] = &["athlete_id", "Name"];
        const UNIQUE_IDS: bool = true;

        fn athlete_id(&self) -> u64 {
            self.athlete_id
        }
    }

    #[derive(Serialize)]
    struct OutRow {
        id: u64,
        label: Option<String>,
    }

    impl CsvRecord for Row {
        type Row<'a> = OutRow;
        const HEADER: &'static [&'static str] = &["id", "label"];

        fn to_row(&self) -> OutRow {
            OutRow {
                id: self.athlete_id,
                label: self.name.clone(),
            }
        }
    }

    fn schema_reason(err: &eyre::Report) -> String {
        match err.downcast_ref::<CleanError>() {
            Some(CleanError::Schema { reason, .. }) => reason.clone(),
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_with_extra_columns_and_empty_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("t.csv");
        std::fs::write(&path, "Extra,athlete_id,Name\nx,1,\"Smith, John\"\ny,2,\n").unwrap();

        let rows = CsvReader::<Row>::new(&path).read().unwrap();
        assert_eq!(
            rows,
            vec![
                Row {
                    athlete_id: 1,
                    name: Some("Smith, John".to_string())
                },
                Row {
                    athlete_id: 2,
                    name: None
                },
            ]
        );
    }

    #[test]
    fn test_padded_header_names_still_bind_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("t.csv");
        std::fs::write(&path, "athlete_id, Name \n1,Smith\n").unwrap();

        let rows = CsvReader::<Row>::new(&path).read().unwrap();
        assert_eq!(rows[0].name.as_deref(), Some("Smith"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = CsvReader::<Row>::new("/nonexistent/t.csv").read().unwrap_err();
        let clean = err.downcast_ref::<CleanError>().unwrap();
        assert!(clean.is_file_access());
        assert!(err.to_string().contains("/nonexistent/t.csv"));
    }

    #[test]
    fn test_missing_column() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("t.csv");
        std::fs::write(&path, "athlete_id\n1\n").unwrap();

        let err = CsvReader::<Row>::new(&path).read().unwrap_err();
        assert!(schema_reason(&err).contains("Name"));
    }

    #[test]
    fn test_inconsistent_column_count() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("t.csv");
        std::fs::write(&path, "athlete_id,Name\n1,A\n2,B,extra\n").unwrap();

        let err = CsvReader::<Row>::new(&path).read().unwrap_err();
        assert!(schema_reason(&err).contains("expected 2 fields, found 3"));
    }

    #[test]
    fn test_duplicate_and_bad_ids() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("t.csv");

        std::fs::write(&path, "athlete_id,Name\n1,A\n1,B\n").unwrap();
        let err = CsvReader::<Row>::new(&path).read().unwrap_err();
        assert!(schema_reason(&err).contains("duplicate athlete_id 1"));

        std::fs::write(&path, "athlete_id,Name\nabc,A\n").unwrap();
        let err = CsvReader::<Row>::new(&path).read().unwrap_err();
        schema_reason(&err);
    }

    #[test]
    fn test_write_header_even_when_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.csv");

        CsvWriter::<Row>::new(&path).write(&[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "id,label\n");
    }

    #[test]
    fn test_write_rows() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.csv");
        let rows = vec![
            Row {
                athlete_id: 7,
                name: Some("Doe, Jane".to_string()),
            },
            Row {
                athlete_id: 8,
                name: None,
            },
        ];

        let count = CsvWriter::new(&path).load(&rows).unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "id,label\n7,\"Doe, Jane\"\n8,\n"
        );
    }

    #[test]
    fn test_unwritable_destination() {
        let err = CsvWriter::<Row>::new("/nonexistent/dir/out.csv")
            .write(&[])
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CleanError>(),
            Some(CleanError::Write { .. })
        ));
    }
}
