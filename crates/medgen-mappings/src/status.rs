//! Mapping-status reconciliation between MedGen and Mondo.
//!
//! Compares the identifiers MedGen's authoritative mapping set knows
//! against those Mondo previously curated, producing a list of
//! candidate-obsolete identifiers and a per-identifier overlap report.
//! The two systems spell the shared identifier space with different
//! prefixes, so all comparison happens on bare values.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use medgen_types::{curie_local, curie_prefix, well_known, MappingStatus, SssomRow, StatusRow};
use tracing::info;

use crate::output::write_atomic;
use crate::sssom::read_sssom;
use crate::types::{MappingResult, ReconcileOptions, UidScope};

/// Column names of the status report.
const STATUS_COLUMNS: &[&str] = &["subject_id", "in_medgen", "in_mondo", "status"];

/// Paths and options for one reconciliation run.
#[derive(Debug, Clone)]
pub struct StatusJob {
    /// Mondo's previously curated mapping set.
    pub mondo_sssom: PathBuf,
    /// The authoritative MedGen mapping set.
    pub medgen_sssom: PathBuf,
    /// Output path for the obsolete-candidates list.
    pub out_obsolete: PathBuf,
    /// Output path for the status table. A predicate filter appends a
    /// suffix to the file stem.
    pub out_status: PathBuf,
    /// Reconciliation options.
    pub options: ReconcileOptions,
}

/// The three identifier sets reconciliation operates on, already
/// prefix-stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSources {
    /// Union of both systems' identifiers.
    pub all_ids: BTreeSet<String>,
    /// Identifiers in the authoritative MedGen set.
    pub in_medgen: BTreeSet<String>,
    /// Identifiers Mondo previously curated.
    pub in_mondo: BTreeSet<String>,
}

/// Reads both mapping sets and derives the reconciliation sets.
///
/// # Errors
/// Fails if either file is missing or lacks the SSSOM columns; no
/// report is produced on failure.
pub fn read_mapping_sources<P: AsRef<Path>, Q: AsRef<Path>>(
    mondo_sssom: P,
    medgen_sssom: Q,
    options: &ReconcileOptions,
) -> MappingResult<MappingSources> {
    let medgen_rows = read_sssom(medgen_sssom)?;
    let mut in_medgen: BTreeSet<String> =
        medgen_rows.into_iter().map(|row| row.subject_id).collect();

    let mondo_rows = read_sssom(mondo_sssom)?;
    let mut in_mondo: BTreeSet<String> = mondo_rows
        .iter()
        .filter(|row| is_medgen_spelling(&row.object_id))
        .filter(|row| passes_predicate_filter(row, options))
        .map(|row| row.object_id.clone())
        .collect();

    let mut all_ids: BTreeSet<String> = in_medgen.union(&in_mondo).cloned().collect();

    if options.drop_uids {
        all_ids = ids_drop_uids(all_ids);
        in_mondo = ids_drop_uids(in_mondo);
        if options.uid_scope == UidScope::AllSets {
            in_medgen = ids_drop_uids(in_medgen);
        }
    }

    // The two systems disagree on prefix spelling for the same anchor
    // space; strip uniformly before comparing.
    Ok(MappingSources {
        all_ids: ids_prefixless(all_ids),
        in_medgen: ids_prefixless(in_medgen),
        in_mondo: ids_prefixless(in_mondo),
    })
}

fn is_medgen_spelling(object_id: &str) -> bool {
    curie_prefix(object_id)
        .map(|prefix| well_known::HISTORICAL_MEDGEN_PREFIXES.contains(&prefix))
        .unwrap_or(false)
}

fn passes_predicate_filter(row: &SssomRow, options: &ReconcileOptions) -> bool {
    match &options.predicate_filter {
        Some(predicates) => predicates.contains(&row.predicate_id),
        None => true,
    }
}

/// Drops identifiers that are not stable concept anchors, keeping only
/// those whose bare value starts with `C` (CUIs and CUI-novels).
fn ids_drop_uids(ids: BTreeSet<String>) -> BTreeSet<String> {
    ids.into_iter()
        .filter(|id| curie_local(id).starts_with('C'))
        .collect()
}

/// Strips namespace prefixes from every identifier.
fn ids_prefixless(ids: BTreeSet<String>) -> BTreeSet<String> {
    ids.into_iter()
        .map(|id| curie_local(&id).to_string())
        .collect()
}

/// Identifiers Mondo still carries that MedGen no longer knows —
/// candidates for obsoletion, sorted.
pub fn obsolete_ids(sources: &MappingSources) -> Vec<String> {
    sources
        .in_mondo
        .difference(&sources.in_medgen)
        .cloned()
        .collect()
}

/// Classifies every identifier in the union by system membership,
/// sorted by (status, id, membership flags).
pub fn status_rows(sources: &MappingSources) -> Vec<StatusRow> {
    let mut rows: Vec<StatusRow> = sources
        .all_ids
        .iter()
        .map(|id| {
            let in_medgen = sources.in_medgen.contains(id);
            let in_mondo = sources.in_mondo.contains(id);
            StatusRow {
                subject_id: id.clone(),
                in_medgen,
                in_mondo,
                status: MappingStatus::from_membership(in_medgen, in_mondo),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        (a.status, a.subject_id.as_str(), a.in_medgen, a.in_mondo).cmp(&(
            b.status,
            b.subject_id.as_str(),
            b.in_medgen,
            b.in_mondo,
        ))
    });
    rows
}

/// Runs reconciliation end to end, writing both reports.
pub fn run_mapping_status(job: &StatusJob) -> MappingResult<()> {
    let sources = read_mapping_sources(&job.mondo_sssom, &job.medgen_sssom, &job.options)?;

    let obsolete = obsolete_ids(&sources);
    let rows = status_rows(&sources);
    info!(
        all = sources.all_ids.len(),
        obsolete = obsolete.len(),
        "reconciled mapping status"
    );

    write_atomic(&job.out_obsolete, |file| {
        for id in &obsolete {
            writeln!(file, "{id}")?;
        }
        Ok(())
    })?;

    let out_status = suffixed_path(&job.out_status, file_suffix(&job.options));
    write_atomic(&out_status, |file| {
        let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(file);
        writer.write_record(STATUS_COLUMNS)?;
        for row in &rows {
            writer.write_record([
                row.subject_id.as_str(),
                if row.in_medgen { "true" } else { "false" },
                if row.in_mondo { "true" } else { "false" },
                row.status.as_str(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    })
}

/// File-stem suffix describing the active predicate filter.
fn file_suffix(options: &ReconcileOptions) -> &'static str {
    match &options.predicate_filter {
        None => "",
        Some(predicates) if predicates == &[well_known::EXACT_MATCH.to_string()] => {
            "-mondo-exacts-only"
        }
        Some(_) => "-custom",
    }
}

/// Inserts `suffix` before the path's extension.
fn suffixed_path(path: &Path, suffix: &str) -> PathBuf {
    if suffix.is_empty() {
        return path.to_path_buf();
    }
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let name = match path.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn sources(in_medgen: &[&str], in_mondo: &[&str]) -> MappingSources {
        let in_medgen = set(in_medgen);
        let in_mondo = set(in_mondo);
        MappingSources {
            all_ids: in_medgen.union(&in_mondo).cloned().collect(),
            in_medgen,
            in_mondo,
        }
    }

    #[test]
    fn test_obsolete_is_old_minus_new() {
        let sources = sources(&["C2", "C3", "C4"], &["C1", "C2", "C3"]);
        assert_eq!(obsolete_ids(&sources), vec!["C1".to_string()]);
    }

    #[test]
    fn test_status_classification() {
        let sources = sources(&["C2", "C3", "C4"], &["C1", "C2", "C3"]);
        let rows = status_rows(&sources);

        let status_of = |id: &str| rows.iter().find(|r| r.subject_id == id).unwrap().status;
        assert_eq!(status_of("C1"), MappingStatus::Mondo);
        assert_eq!(status_of("C4"), MappingStatus::Medgen);
        assert_eq!(status_of("C2"), MappingStatus::Both);
        assert_eq!(status_of("C3"), MappingStatus::Both);

        // Sorted by status first: both < medgen < mondo
        let statuses: Vec<MappingStatus> = rows.iter().map(|r| r.status).collect();
        let mut sorted = statuses.clone();
        sorted.sort();
        assert_eq!(statuses, sorted);
    }

    #[test]
    fn test_drop_uids_keeps_stable_anchors() {
        let ids = set(&["MEDGEN:766292", "UMLS:C0011849", "MEDGENCUI:CN239583"]);
        let kept = ids_drop_uids(ids);
        assert_eq!(kept, set(&["UMLS:C0011849", "MEDGENCUI:CN239583"]));
    }

    #[test]
    fn test_prefixless() {
        let ids = set(&["UMLS:C0011849", "MedGen_UID:766292"]);
        assert_eq!(ids_prefixless(ids), set(&["C0011849", "766292"]));
    }

    #[test]
    fn test_suffixed_path() {
        assert_eq!(
            suffixed_path(Path::new("out/status.tsv"), "-custom"),
            PathBuf::from("out/status-custom.tsv")
        );
        assert_eq!(
            suffixed_path(Path::new("out/status.tsv"), ""),
            PathBuf::from("out/status.tsv")
        );
    }

    fn write_sssom_fixture(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_read_mapping_sources_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let medgen = write_sssom_fixture(
            dir.path(),
            "medgen.sssom.tsv",
            "# curie_map:\n\
             #   UMLS: https://uts.nlm.nih.gov/uts/umls/concept/\n\
             subject_id\tsubject_label\tpredicate_id\tobject_id\n\
             UMLS:C2\tterm two\tskos:exactMatch\tHP:2\n\
             UMLS:C3\tterm three\tskos:exactMatch\tHP:3\n\
             MEDGEN:766292\tuid term\tskos:exactMatch\tHP:4\n",
        );
        let mondo = write_sssom_fixture(
            dir.path(),
            "mondo.sssom.tsv",
            "subject_id\tsubject_label\tpredicate_id\tobject_id\n\
             MONDO:1\tdisease one\tskos:exactMatch\tUMLS_CUI:C1\n\
             MONDO:2\tdisease two\tskos:exactMatch\tMedGen:C2\n\
             MONDO:3\tdisease three\tskos:exactMatch\tOMIM:123456\n\
             MONDO:4\tdisease four\tskos:broadMatch\tUMLS:C9\n",
        );

        let sources =
            read_mapping_sources(&mondo, &medgen, &ReconcileOptions::default()).unwrap();

        // UID dropped everywhere, prefixes stripped, OMIM row ignored
        assert_eq!(sources.in_medgen, set(&["C2", "C3"]));
        assert_eq!(sources.in_mondo, set(&["C1", "C2", "C9"]));
        assert_eq!(sources.all_ids, set(&["C1", "C2", "C3", "C9"]));

        // With a predicate filter the broadMatch row disappears
        let options = ReconcileOptions {
            predicate_filter: Some(vec!["skos:exactMatch".to_string()]),
            ..ReconcileOptions::default()
        };
        let filtered = read_mapping_sources(&mondo, &medgen, &options).unwrap();
        assert_eq!(filtered.in_mondo, set(&["C1", "C2"]));
    }

    #[test]
    fn test_uid_scope_skip_new_system() {
        let dir = tempfile::tempdir().unwrap();
        let medgen = write_sssom_fixture(
            dir.path(),
            "medgen.sssom.tsv",
            "subject_id\tsubject_label\tpredicate_id\tobject_id\n\
             MEDGEN:766292\tuid term\tskos:exactMatch\tHP:4\n",
        );
        let mondo = write_sssom_fixture(
            dir.path(),
            "mondo.sssom.tsv",
            "subject_id\tsubject_label\tpredicate_id\tobject_id\n\
             MONDO:1\tdisease\tskos:exactMatch\tUMLS:C1\n",
        );

        let options = ReconcileOptions {
            uid_scope: UidScope::SkipNewSystem,
            ..ReconcileOptions::default()
        };
        let sources = read_mapping_sources(&mondo, &medgen, &options).unwrap();
        assert_eq!(sources.in_medgen, set(&["766292"]));
        // The union is still pruned
        assert_eq!(sources.all_ids, set(&["C1"]));
    }

    #[test]
    fn test_run_mapping_status_reports() {
        let dir = tempfile::tempdir().unwrap();
        let medgen = write_sssom_fixture(
            dir.path(),
            "medgen.sssom.tsv",
            "subject_id\tsubject_label\tpredicate_id\tobject_id\n\
             UMLS:C2\tt\tskos:exactMatch\tHP:2\n\
             UMLS:C3\tt\tskos:exactMatch\tHP:3\n\
             UMLS:C4\tt\tskos:exactMatch\tHP:4\n",
        );
        let mondo = write_sssom_fixture(
            dir.path(),
            "mondo.sssom.tsv",
            "subject_id\tsubject_label\tpredicate_id\tobject_id\n\
             MONDO:1\td\tskos:exactMatch\tUMLS:C1\n\
             MONDO:2\td\tskos:exactMatch\tUMLS:C2\n\
             MONDO:3\td\tskos:exactMatch\tUMLS:C3\n",
        );

        let job = StatusJob {
            mondo_sssom: mondo,
            medgen_sssom: medgen,
            out_obsolete: dir.path().join("obsoleted_medgen_terms_in_mondo.txt"),
            out_status: dir.path().join("medgen_terms_mapping_status.tsv"),
            options: ReconcileOptions::default(),
        };
        run_mapping_status(&job).unwrap();

        let obsolete = std::fs::read_to_string(&job.out_obsolete).unwrap();
        assert_eq!(obsolete, "C1\n");

        let status = std::fs::read_to_string(&job.out_status).unwrap();
        let lines: Vec<&str> = status.lines().collect();
        assert_eq!(lines[0], "subject_id\tin_medgen\tin_mondo\tstatus");
        assert!(lines.contains(&"C1\tfalse\ttrue\tmondo"));
        assert!(lines.contains(&"C4\ttrue\tfalse\tmedgen"));
        assert!(lines.contains(&"C2\ttrue\ttrue\tboth"));
    }
}
