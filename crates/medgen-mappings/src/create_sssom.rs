//! SSSOM output production.
//!
//! Builds the two released mapping sets from the identifier export:
//! HPO↔UMLS directly, and HPO↔MeSH by re-anchoring MeSH rows through the
//! shared UMLS CUI. MeSH rows with no UMLS match are kept in a separate
//! review file so curators can inspect them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use medgen_types::{well_known, Namespace, SourceSystem, SssomRow};
use tracing::{info, warn};

use crate::mapping_set::{load_mapping_set, standardize};
use crate::sssom::{write_sssom, SssomRecord};
use crate::types::{LoadOptions, MappingResult};

/// Paths and toggles for one SSSOM production run.
#[derive(Debug, Clone)]
pub struct SssomJob {
    /// The identifier-mapping export.
    pub input_mappings: PathBuf,
    /// SSSOM metadata YAML with the `curie_map`.
    pub metadata_config: PathBuf,
    /// Output path for the HPO↔UMLS mapping set.
    pub out_umls: PathBuf,
    /// Output path for the matched HPO↔MeSH mapping set.
    pub out_mesh: PathBuf,
    /// Output path for the HPO↔MeSH review set including non-matches.
    pub out_mesh_review: PathBuf,
    /// Keep only UMLS-anchored subjects in the HPO set. Edge case
    /// handling; the export's HPO rows have been 100% UMLS in practice.
    pub umls_only: bool,
}

/// A standardized row carrying its curation justification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuratedSssomRow {
    /// Namespaced subject identifier.
    pub subject_id: String,
    /// Display label for the subject.
    pub subject_label: String,
    /// Mapping predicate.
    pub predicate_id: String,
    /// Namespaced object identifier.
    pub object_id: String,
    /// How the mapping was established.
    pub mapping_justification: String,
}

impl SssomRecord for CuratedSssomRow {
    const COLUMNS: &'static [&'static str] = &[
        "subject_id",
        "subject_label",
        "predicate_id",
        "object_id",
        "mapping_justification",
    ];

    fn values(&self) -> Vec<String> {
        vec![
            self.subject_id.clone(),
            self.subject_label.clone(),
            self.predicate_id.clone(),
            self.object_id.clone(),
            self.mapping_justification.clone(),
        ]
    }

    fn curie_fields(&self) -> Vec<&str> {
        vec![&self.subject_id, &self.predicate_id, &self.object_id]
    }
}

/// An HPO↔MeSH row in the review output, keeping the UMLS anchor that
/// the join ran through. `subject_id` is empty when no HPO mapping
/// exists for the CUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshReviewRow {
    /// HPO identifier, or empty for a non-match.
    pub subject_id: String,
    /// Mapping predicate.
    pub predicate_id: String,
    /// MeSH identifier, prefixed.
    pub object_id: String,
    /// The UMLS CUI the join ran through.
    pub umls_id: String,
    /// Label of the UMLS concept.
    pub umls_label: String,
    /// How the mapping was established.
    pub mapping_justification: String,
}

impl SssomRecord for MeshReviewRow {
    const COLUMNS: &'static [&'static str] = &[
        "subject_id",
        "predicate_id",
        "object_id",
        "umls_id",
        "umls_label",
        "mapping_justification",
    ];

    fn values(&self) -> Vec<String> {
        vec![
            self.subject_id.clone(),
            self.predicate_id.clone(),
            self.object_id.clone(),
            self.umls_id.clone(),
            self.umls_label.clone(),
            self.mapping_justification.clone(),
        ]
    }

    fn curie_fields(&self) -> Vec<&str> {
        vec![&self.subject_id, &self.predicate_id, &self.object_id]
    }
}

/// The matched HPO↔MeSH row shape, with the join columns dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshSssomRow {
    /// HPO identifier.
    pub subject_id: String,
    /// Mapping predicate.
    pub predicate_id: String,
    /// MeSH identifier, prefixed.
    pub object_id: String,
    /// How the mapping was established.
    pub mapping_justification: String,
}

impl SssomRecord for MeshSssomRow {
    const COLUMNS: &'static [&'static str] = &[
        "subject_id",
        "predicate_id",
        "object_id",
        "mapping_justification",
    ];

    fn values(&self) -> Vec<String> {
        vec![
            self.subject_id.clone(),
            self.predicate_id.clone(),
            self.object_id.clone(),
            self.mapping_justification.clone(),
        ]
    }

    fn curie_fields(&self) -> Vec<&str> {
        vec![&self.subject_id, &self.predicate_id, &self.object_id]
    }
}

/// Runs SSSOM production end to end.
pub fn run_sssom(job: &SssomJob) -> MappingResult<()> {
    let umls_rows = build_umls_rows(&job.input_mappings, job.umls_only)?;
    info!(rows = umls_rows.len(), "built HPO-UMLS mapping set");
    write_sssom(&umls_rows, &job.metadata_config, &job.out_umls)?;

    let mesh_rows = standardize(load_mapping_set(
        &job.input_mappings,
        &LoadOptions::for_source(SourceSystem::Mesh),
    )?);
    let review_rows = join_mesh_to_hpo(&mesh_rows, &umls_rows);

    write_sssom(&review_rows, &job.metadata_config, &job.out_mesh_review)?;

    let matched: Vec<MeshSssomRow> = review_rows
        .iter()
        .filter(|row| !row.subject_id.is_empty())
        .map(|row| MeshSssomRow {
            subject_id: row.subject_id.clone(),
            predicate_id: row.predicate_id.clone(),
            object_id: row.object_id.clone(),
            mapping_justification: row.mapping_justification.clone(),
        })
        .collect();
    info!(
        mesh_rows = review_rows.len(),
        matched = matched.len(),
        "built HPO-MeSH mapping set"
    );
    write_sssom(&matched, &job.metadata_config, &job.out_mesh)?;

    Ok(())
}

/// Loads the HPO view of the export as curated SSSOM rows.
fn build_umls_rows(input: &Path, umls_only: bool) -> MappingResult<Vec<CuratedSssomRow>> {
    let mut rows = standardize(load_mapping_set(
        input,
        &LoadOptions::for_source(SourceSystem::Hpo),
    )?);

    if umls_only {
        rows.retain(|row| Namespace::of_curie(&row.subject_id) == Some(Namespace::Umls));
    }

    Ok(rows.into_iter().map(curated).collect())
}

fn curated(row: SssomRow) -> CuratedSssomRow {
    CuratedSssomRow {
        subject_id: row.subject_id,
        subject_label: row.subject_label,
        predicate_id: row.predicate_id,
        object_id: row.object_id,
        mapping_justification: well_known::MANUAL_MAPPING_CURATION.to_string(),
    }
}

/// Re-anchors MeSH rows on HPO via the shared UMLS CUI.
///
/// Each MeSH row joins to every HPO row with the same CUI subject; rows
/// with no match are kept with an empty subject. Output is sorted by
/// (subject_id, object_id), non-matches first.
fn join_mesh_to_hpo(mesh: &[SssomRow], hpo: &[CuratedSssomRow]) -> Vec<MeshReviewRow> {
    let mut hpo_by_cui: HashMap<&str, Vec<&CuratedSssomRow>> = HashMap::new();
    for row in hpo {
        hpo_by_cui.entry(&row.subject_id).or_default().push(row);
    }

    let mut out = Vec::new();
    for row in mesh {
        let object_id = format!("{}:{}", well_known::MESH, row.object_id);
        match hpo_by_cui.get(row.subject_id.as_str()) {
            Some(matches) => {
                for matched in matches {
                    out.push(MeshReviewRow {
                        subject_id: matched.object_id.clone(),
                        predicate_id: row.predicate_id.clone(),
                        object_id: object_id.clone(),
                        umls_id: row.subject_id.clone(),
                        umls_label: row.subject_label.clone(),
                        mapping_justification: well_known::MANUAL_MAPPING_CURATION.to_string(),
                    });
                }
            }
            None => out.push(MeshReviewRow {
                subject_id: String::new(),
                predicate_id: row.predicate_id.clone(),
                object_id: object_id.clone(),
                umls_id: row.subject_id.clone(),
                umls_label: row.subject_label.clone(),
                mapping_justification: well_known::MANUAL_MAPPING_CURATION.to_string(),
            }),
        }
    }

    if !mesh.is_empty() && out.iter().all(|row| row.subject_id.is_empty()) {
        warn!("no MeSH row matched an HPO mapping; source format may have changed");
    }

    // Empty subjects sort first, putting non-matches at the top for review.
    out.sort_by(|a, b| {
        (a.subject_id.as_str(), a.object_id.as_str())
            .cmp(&(b.subject_id.as_str(), b.object_id.as_str()))
    });
    out
}
