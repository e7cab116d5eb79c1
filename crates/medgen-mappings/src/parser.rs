//! Parser for the pipe-delimited MedGen identifier-mapping export.
//!
//! The export (`MedGenIDMappings.txt`) has one header line and a trailing
//! delimiter on every line, which older readers surfaced as an entirely
//! empty column. Columns are resolved by name, so the unnamed artifact
//! column is never consulted.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};
use medgen_types::{RawMappingRow, SourceSystem};

use crate::types::{MappingError, MappingResult};

/// Accepted spellings of the identifier column across producer
/// generations.
const XREF_COLUMNS: &[&str] = &["#CUI_or_CN_id", "#CUI"];

/// Name of the origin-vocabulary column.
const SOURCE_COLUMN: &str = "source";

/// Name of the foreign-identifier column.
const SOURCE_ID_COLUMN: &str = "source_id";

/// Name of the optional label column.
const PREF_NAME_COLUMN: &str = "pref_name";

/// Positions of the export's columns, resolved from the header line.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    xref: usize,
    source: usize,
    source_id: usize,
    pref_name: Option<usize>,
}

impl ColumnIndex {
    /// Resolves required columns from the header, tolerating historical
    /// header-name variants and a UTF-8 BOM.
    fn resolve(headers: &StringRecord, path: &str) -> MappingResult<Self> {
        let position = |wanted: &[&str]| -> Option<usize> {
            headers.iter().position(|h| {
                let h = h.trim_start_matches('\u{feff}');
                wanted.contains(&h)
            })
        };

        let missing = |column: &str| MappingError::MissingColumn {
            column: column.to_string(),
            path: path.to_string(),
        };

        Ok(Self {
            xref: position(XREF_COLUMNS).ok_or_else(|| missing(XREF_COLUMNS[0]))?,
            source: position(&[SOURCE_COLUMN]).ok_or_else(|| missing(SOURCE_COLUMN))?,
            source_id: position(&[SOURCE_ID_COLUMN]).ok_or_else(|| missing(SOURCE_ID_COLUMN))?,
            pref_name: position(&[PREF_NAME_COLUMN]),
        })
    }
}

/// A streaming parser over the identifier-mapping export.
///
/// Iterates raw rows in file order; the loader applies normalization,
/// filtering, and sorting on top.
#[derive(Debug)]
pub struct ExportParser<R: Read> {
    reader: Reader<R>,
    columns: ColumnIndex,
    path: String,
    records_read: usize,
}

impl ExportParser<BufReader<File>> {
    /// Creates a parser from a file path.
    ///
    /// # Errors
    /// Returns an error if the file does not exist or its header lacks a
    /// required column.
    pub fn from_path<P: AsRef<Path>>(path: P) -> MappingResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(MappingError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), &path.display().to_string())
    }
}

impl<R: Read> ExportParser<R> {
    /// Creates a parser from a reader. `label` names the source in error
    /// messages.
    pub fn from_reader(reader: R, label: &str) -> MappingResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b'|')
            .has_headers(true)
            // Trailing delimiter artifact: row lengths may disagree with
            // the header once the empty field is involved.
            .flexible(true)
            .from_reader(reader);

        let columns = ColumnIndex::resolve(csv_reader.headers()?, label)?;

        Ok(Self {
            reader: csv_reader,
            columns,
            path: label.to_string(),
            records_read: 0,
        })
    }

    /// Returns the number of records read so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Returns the label used in error messages.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn row_from_record(&self, record: &StringRecord) -> RawMappingRow {
        let field = |idx: usize| record.get(idx).unwrap_or("").to_string();
        let pref_name = self
            .columns
            .pref_name
            .and_then(|idx| record.get(idx))
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        RawMappingRow {
            xref_id: field(self.columns.xref),
            source: SourceSystem::parse(record.get(self.columns.source).unwrap_or("")),
            source_id: field(self.columns.source_id),
            pref_name,
        }
    }
}

impl<R: Read> Iterator for ExportParser<R> {
    type Item = MappingResult<RawMappingRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    self.records_read += 1;

                    // Skip blank records
                    if record.is_empty() || record.iter().all(|f| f.trim().is_empty()) {
                        continue;
                    }

                    return Some(Ok(self.row_from_record(&record)));
                }
                Ok(false) => return None, // End of file
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
#CUI_or_CN_id|source|source_id|pref_name|
C0012634|MONDO|MONDO:0000001|Disease|
CN239583|HPO|HP:0000118|Phenotypic abnormality|
766292|MedGen|C3810814|Some term|
";

    #[test]
    fn test_parse_sample_rows() {
        let parser = ExportParser::from_reader(SAMPLE.as_bytes(), "sample").unwrap();
        let rows: Vec<RawMappingRow> = parser.map(Result::unwrap).collect();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].xref_id, "C0012634");
        assert_eq!(rows[0].source, SourceSystem::Mondo);
        assert_eq!(rows[0].source_id, "MONDO:0000001");
        assert_eq!(rows[0].pref_name.as_deref(), Some("Disease"));
        assert_eq!(rows[2].source, SourceSystem::MedGen);
    }

    #[test]
    fn test_historical_header_variant() {
        let data = "#CUI|source|source_id|pref_name|\nC0012634|MONDO|MONDO:0000001|Disease|\n";
        let parser = ExportParser::from_reader(data.as_bytes(), "sample").unwrap();
        let rows: Vec<RawMappingRow> = parser.map(Result::unwrap).collect();
        assert_eq!(rows[0].xref_id, "C0012634");
    }

    #[test]
    fn test_missing_source_id_column() {
        let data = "#CUI_or_CN_id|source|pref_name|\nC0012634|MONDO|Disease|\n";
        let err = ExportParser::from_reader(data.as_bytes(), "sample").unwrap_err();
        match err {
            MappingError::MissingColumn { column, path } => {
                assert_eq!(column, "source_id");
                assert_eq!(path, "sample");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_identifier_column() {
        let data = "id|source|source_id|pref_name|\nC0012634|MONDO|MONDO:0000001|Disease|\n";
        let err = ExportParser::from_reader(data.as_bytes(), "sample").unwrap_err();
        assert!(matches!(err, MappingError::MissingColumn { column, .. } if column == "#CUI_or_CN_id"));
    }

    #[test]
    fn test_blank_lines_skipped_and_counted() {
        let data = "#CUI_or_CN_id|source|source_id|pref_name|\n||||\nC0012634|MONDO|MONDO:0000001|Disease|\n";
        let mut parser = ExportParser::from_reader(data.as_bytes(), "sample").unwrap();
        let rows: Vec<RawMappingRow> = parser.by_ref().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(parser.records_read(), 2);
    }

    #[test]
    fn test_missing_pref_name_is_none() {
        let data = "#CUI_or_CN_id|source|source_id|pref_name|\nC0012634|MONDO|MONDO:0000001||\n";
        let parser = ExportParser::from_reader(data.as_bytes(), "sample").unwrap();
        let rows: Vec<RawMappingRow> = parser.map(Result::unwrap).collect();
        assert_eq!(rows[0].pref_name, None);
    }
}
