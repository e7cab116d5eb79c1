//! Loading and standardization of the identifier-mapping export.
//!
//! `load_mapping_set` applies the pipeline's fixed transformation order:
//! prefix normalization, the CUI-novel drop, a deterministic sort, and
//! the optional source filter. `standardize` projects the result into
//! the SSSOM schema.

use std::io::Read;
use std::path::Path;

use medgen_types::{normalize, well_known, RawIdKind, RawMappingRow, SssomRow};
use tracing::debug;

use crate::parser::ExportParser;
use crate::types::{LoadOptions, MappingResult};

/// Loads the identifier-mapping export from a file.
///
/// # Errors
/// Fails if the file is missing, cannot be parsed, or lacks a required
/// column. Nothing is returned on failure; the load is all-or-nothing.
pub fn load_mapping_set<P: AsRef<Path>>(
    path: P,
    options: &LoadOptions,
) -> MappingResult<Vec<RawMappingRow>> {
    let parser = ExportParser::from_path(path)?;
    collect_rows(parser, options)
}

/// Loads the export from an in-memory reader. `label` names the source
/// in error messages.
pub fn load_from_reader<R: Read>(
    reader: R,
    label: &str,
    options: &LoadOptions,
) -> MappingResult<Vec<RawMappingRow>> {
    let parser = ExportParser::from_reader(reader, label)?;
    collect_rows(parser, options)
}

fn collect_rows<R: Read>(
    parser: ExportParser<R>,
    options: &LoadOptions,
) -> MappingResult<Vec<RawMappingRow>> {
    let label = parser.path().to_string();
    let mut rows = parser.collect::<MappingResult<Vec<_>>>()?;
    let parsed = rows.len();

    // Normalization happens exactly once, here. Re-applying it would
    // wrap already-prefixed identifiers a second time.
    if options.normalize_ids {
        for row in &mut rows {
            row.xref_id = normalize(&row.xref_id);
        }
    }

    if options.drop_cui_novel {
        rows.retain(|row| row.id_kind() != RawIdKind::CuiNovel);
    }

    // Deterministic order so joins and diffs are reproducible
    // byte-for-byte across runs.
    rows.sort_by(|a, b| {
        (a.xref_id.as_str(), a.source_id.as_str()).cmp(&(b.xref_id.as_str(), b.source_id.as_str()))
    });

    if let Some(sources) = &options.filter_sources {
        rows.retain(|row| sources.contains(&row.source));
    }

    debug!(
        source = %label,
        parsed,
        retained = rows.len(),
        "loaded mapping set"
    );
    Ok(rows)
}

/// Projects loaded rows into the standardized SSSOM schema.
///
/// Subject is the MedGen-side CURIE, object the foreign identifier, and
/// every row carries the equivalence predicate.
pub fn standardize(rows: Vec<RawMappingRow>) -> Vec<SssomRow> {
    rows.into_iter()
        .map(|row| SssomRow {
            subject_id: row.xref_id,
            subject_label: row.pref_name.unwrap_or_default(),
            predicate_id: well_known::EXACT_MATCH.to_string(),
            object_id: row.source_id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use medgen_types::SourceSystem;

    const SAMPLE: &str = "\
#CUI_or_CN_id|source|source_id|pref_name|
C0012634|MONDO|MONDO:0000001|Disease|
CN239583|HPO|HP:0000118|Phenotypic abnormality|
766292|MedGen|C3810814|Some term|
C0011849|HPO|HP:0000819|Diabetes mellitus|
";

    #[test]
    fn test_load_normalizes_exactly_once() {
        let rows = load_from_reader(SAMPLE.as_bytes(), "sample", &LoadOptions::default()).unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.xref_id.as_str()).collect();
        assert!(ids.contains(&"UMLS:C0012634"));
        assert!(ids.contains(&"MEDGEN:766292"));
        // No double prefixes
        assert!(ids.iter().all(|id| id.matches(':').count() == 1));
    }

    #[test]
    fn test_load_drops_cui_novel_by_default() {
        let rows = load_from_reader(SAMPLE.as_bytes(), "sample", &LoadOptions::default()).unwrap();
        assert!(rows.iter().all(|r| r.id_kind() != RawIdKind::CuiNovel));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_load_keeps_cui_novel_when_asked() {
        let options = LoadOptions {
            drop_cui_novel: false,
            ..LoadOptions::default()
        };
        let rows = load_from_reader(SAMPLE.as_bytes(), "sample", &options).unwrap();
        assert!(rows.iter().any(|r| r.xref_id == "MEDGENCUI:CN239583"));
    }

    #[test]
    fn test_load_sorts_deterministically() {
        let rows = load_from_reader(SAMPLE.as_bytes(), "sample", &LoadOptions::default()).unwrap();
        let again = load_from_reader(SAMPLE.as_bytes(), "sample", &LoadOptions::default()).unwrap();
        assert_eq!(rows, again);

        let keys: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.xref_id.as_str(), r.source_id.as_str()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_load_filters_sources() {
        let options = LoadOptions::for_source(SourceSystem::Hpo);
        let rows = load_from_reader(SAMPLE.as_bytes(), "sample", &options).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].xref_id, "UMLS:C0011849");
    }

    #[test]
    fn test_standardize_projection() {
        let options = LoadOptions::for_source(SourceSystem::Hpo);
        let rows = load_from_reader(SAMPLE.as_bytes(), "sample", &options).unwrap();
        let sssom = standardize(rows);

        assert_eq!(sssom.len(), 1);
        assert_eq!(sssom[0].subject_id, "UMLS:C0011849");
        assert_eq!(sssom[0].subject_label, "Diabetes mellitus");
        assert_eq!(sssom[0].predicate_id, "skos:exactMatch");
        assert_eq!(sssom[0].object_id, "HP:0000819");
    }

    #[test]
    fn test_raw_load_leaves_identifiers_alone() {
        let rows = load_from_reader(SAMPLE.as_bytes(), "sample", &LoadOptions::raw()).unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().any(|r| r.xref_id == "CN239583"));
        assert!(rows.iter().any(|r| r.xref_id == "766292"));
    }
}
