//! SSSOM table serialization with commented metadata headers.
//!
//! An SSSOM file carries its mapping-set metadata as a `#`-commented
//! YAML block above the TSV body. The block's `curie_map` is filtered
//! down to the prefixes the table actually uses, keeping outputs minimal
//! and diff-friendly under version control.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use medgen_types::{curie_prefix, SssomRow};
use serde::Deserialize;
use serde_yaml::Value;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::output::write_atomic;
use crate::types::{MappingError, MappingResult};

/// Trait for row types serializable as an SSSOM table.
///
/// Implementations declare their column set and which fields carry
/// CURIEs that count toward the header's `curie_map`.
pub trait SssomRecord {
    /// Column names, in serialization order.
    const COLUMNS: &'static [&'static str];

    /// Field values in column order.
    fn values(&self) -> Vec<String>;

    /// The identifier fields contributing namespace prefixes to the
    /// header (subject, predicate, object; never labels).
    fn curie_fields(&self) -> Vec<&str>;
}

impl SssomRecord for SssomRow {
    const COLUMNS: &'static [&'static str] =
        &["subject_id", "subject_label", "predicate_id", "object_id"];

    fn values(&self) -> Vec<String> {
        vec![
            self.subject_id.clone(),
            self.subject_label.clone(),
            self.predicate_id.clone(),
            self.object_id.clone(),
        ]
    }

    fn curie_fields(&self) -> Vec<&str> {
        vec![&self.subject_id, &self.predicate_id, &self.object_id]
    }
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    curie_map: Option<BTreeMap<String, String>>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

/// Mapping-set metadata loaded from the YAML config.
///
/// `curie_map` is required; every other key is provenance passed through
/// verbatim into output headers.
#[derive(Debug, Clone, PartialEq)]
pub struct SssomMetadata {
    /// Namespace prefix to URI prefix.
    pub curie_map: BTreeMap<String, String>,
    /// Remaining metadata fields, emitted as-is.
    pub extra: BTreeMap<String, Value>,
}

impl SssomMetadata {
    /// Loads metadata from a YAML file.
    ///
    /// # Errors
    /// `Config` if the file lacks a `curie_map` key; `FileNotFound` or
    /// `Yaml` for the usual reasons.
    pub fn load<P: AsRef<Path>>(path: P) -> MappingResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(MappingError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        let raw: RawMetadata = serde_yaml::from_reader(BufReader::new(file))?;
        let curie_map = raw.curie_map.ok_or_else(|| MappingError::Config {
            message: format!("missing required key 'curie_map' in {}", path.display()),
        })?;

        Ok(Self {
            curie_map,
            extra: raw.extra,
        })
    }

    /// Returns a copy whose `curie_map` is restricted to `prefixes`.
    pub fn filtered_to(&self, prefixes: &BTreeSet<String>) -> Self {
        Self {
            curie_map: self
                .curie_map
                .iter()
                .filter(|(prefix, _)| prefixes.contains(*prefix))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            extra: self.extra.clone(),
        }
    }

    /// Serializes the metadata back to YAML, `curie_map` first.
    fn to_yaml(&self) -> MappingResult<String> {
        let mut mapping = serde_yaml::Mapping::new();
        mapping.insert(
            Value::from("curie_map"),
            serde_yaml::to_value(&self.curie_map)?,
        );
        for (key, value) in &self.extra {
            mapping.insert(Value::from(key.clone()), value.clone());
        }
        Ok(serde_yaml::to_string(&Value::Mapping(mapping))?)
    }
}

/// Collects the namespace prefixes occurring in the table's identifier
/// fields. Unprefixed or empty values contribute nothing.
pub fn used_prefixes<T: SssomRecord>(rows: &[T]) -> BTreeSet<String> {
    let mut prefixes = BTreeSet::new();
    for row in rows {
        for value in row.curie_fields() {
            if let Some(prefix) = curie_prefix(value) {
                prefixes.insert(prefix.to_string());
            }
        }
    }
    prefixes
}

/// Writes an SSSOM file: filtered commented-YAML metadata, then the TSV
/// body.
///
/// The config on disk is never mutated; the filtered copy lives in a
/// scoped temporary file that is removed on every exit path. The output
/// itself is written atomically.
pub fn write_sssom<T, P, Q>(rows: &[T], config_path: P, outpath: Q) -> MappingResult<()>
where
    T: SssomRecord,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let metadata = SssomMetadata::load(config_path)?;
    let used = used_prefixes(rows);
    let filtered = metadata.filtered_to(&used);

    // Scoped temporary copy of the filtered metadata; dropped (and
    // removed) on success and on every early return below.
    let mut scratch = NamedTempFile::new()?;
    scratch.write_all(filtered.to_yaml()?.as_bytes())?;
    let header = commented_header(&scratch)?;

    debug!(
        rows = rows.len(),
        prefixes = used.len(),
        out = %outpath.as_ref().display(),
        "writing SSSOM table"
    );

    write_atomic(outpath.as_ref(), |file| {
        file.write_all(header.as_bytes())?;
        let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(file);
        writer.write_record(T::COLUMNS)?;
        for row in rows {
            writer.write_record(row.values())?;
        }
        writer.flush()?;
        Ok(())
    })
}

/// Reads the scratch copy back, prefixing every line as a comment.
fn commented_header(scratch: &NamedTempFile) -> MappingResult<String> {
    let reader = BufReader::new(scratch.reopen()?);
    let mut header = String::new();
    for line in reader.lines() {
        let line = line?;
        header.push_str("# ");
        header.push_str(&line);
        header.push('\n');
    }
    Ok(header)
}

/// Reads the data section of an SSSOM file, skipping the commented
/// metadata block. Columns are located by name; extra columns are
/// ignored and a missing `subject_label` becomes the empty string.
pub fn read_sssom<P: AsRef<Path>>(path: P) -> MappingResult<Vec<SssomRow>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MappingError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path)?;
    read_sssom_from_reader(BufReader::new(file), &path.display().to_string())
}

/// Reads an SSSOM data section from a reader. `label` names the source
/// in error messages.
pub fn read_sssom_from_reader<R: Read>(reader: R, label: &str) -> MappingResult<Vec<SssomRow>> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h == name);
    let require = |name: &str| {
        position(name).ok_or_else(|| MappingError::MissingColumn {
            column: name.to_string(),
            path: label.to_string(),
        })
    };

    let subject_idx = require("subject_id")?;
    let predicate_idx = require("predicate_id")?;
    let object_idx = require("object_id")?;
    let label_idx = position("subject_label");

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while csv_reader.read_record(&mut record)? {
        let field = |idx: usize| record.get(idx).unwrap_or("").to_string();
        rows.push(SssomRow {
            subject_id: field(subject_idx),
            subject_label: label_idx.map(field).unwrap_or_default(),
            predicate_id: field(predicate_idx),
            object_id: field(object_idx),
        });
    }

    Ok(rows)
}
