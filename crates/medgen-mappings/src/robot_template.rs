//! ROBOT cross-reference template builder.
//!
//! The export never states (Mondo ↔ MedGen UID) or (Mondo ↔ MeSH)
//! directly; both are derived transitively through the UMLS CUI that the
//! Mondo, MedGen, and MeSH views all share. The direct Mondo↔CUI rows
//! plus the two derived joins are unioned into one template, with MeSH
//! cross-references split into their own output.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use medgen_types::{
    curie_local, normalize, well_known, MeshClass, Namespace, RawIdKind, RawMappingRow,
    SourceSystem, TemplateRow,
};
use tracing::{info, warn};

use crate::mapping_set::load_mapping_set;
use crate::output::write_atomic;
use crate::types::{LoadOptions, MappingResult};

/// Column names of the template outputs.
const TEMPLATE_COLUMNS: &[&str] = &["mondo_id", "xref_id", "source_id", "mapping_predicate"];

/// Paths and toggles for one template build.
#[derive(Debug, Clone)]
pub struct RobotTemplateJob {
    /// The identifier-mapping export.
    pub input_mappings: PathBuf,
    /// Output path for the general cross-reference template.
    pub out_xrefs: PathBuf,
    /// Output path for the MeSH cross-reference template.
    pub out_mesh_xrefs: PathBuf,
    /// Drop CUI-novel identifiers before joining. They have no stable
    /// cross-system anchor. When disabled, CUI rows are additionally
    /// mirrored into the MEDGENCUI namespace, the historical behavior.
    pub filter_out_medgencui: bool,
}

/// Builds both template outputs from the export.
pub fn build_robot_templates(job: &RobotTemplateJob) -> MappingResult<()> {
    let rows = load_mapping_set(&job.input_mappings, &LoadOptions::raw())?;
    let (general, mesh) = build_rows(&rows, job.filter_out_medgencui);

    info!(
        general = general.len(),
        mesh = mesh.len(),
        "built cross-reference templates"
    );

    write_template(&job.out_xrefs, &general)?;
    write_template(&job.out_mesh_xrefs, &mesh)?;
    Ok(())
}

/// Derives, unions, sorts, and partitions all cross-reference rows.
///
/// Returns the (general, MeSH) tables, each without its header-row
/// record; `write_template` prepends that.
pub fn build_rows(
    rows: &[RawMappingRow],
    filter_out_medgencui: bool,
) -> (Vec<TemplateRow>, Vec<TemplateRow>) {
    let keep = |row: &&RawMappingRow| !(filter_out_medgencui && row.id_kind() == RawIdKind::CuiNovel);
    let view = |source: SourceSystem| -> Vec<&RawMappingRow> {
        rows.iter().filter(|r| r.source == source).filter(keep).collect()
    };

    let mondo = view(SourceSystem::Mondo);
    let medgen = view(SourceSystem::MedGen);
    let mesh = view(SourceSystem::Mesh);

    let mut out = direct_rows(&mondo, filter_out_medgencui);

    // Mondo never references UIDs directly; resolve them by proxy:
    // UID <-> CUI <-> MONDO.
    let mut mondo_by_cui: HashMap<&str, Vec<&str>> = HashMap::new();
    for row in &mondo {
        mondo_by_cui
            .entry(row.xref_id.as_str())
            .or_default()
            .push(row.source_id.as_str());
    }

    let uid_rows = joined_rows(&mondo_by_cui, &medgen, |row| {
        format!("{}:{}", well_known::MEDGEN, row.source_id)
    });
    if uid_rows.is_empty() && !medgen.is_empty() && !mondo.is_empty() {
        warn!("UID join produced no rows; source format may have changed");
    }
    out.extend(uid_rows);

    let mesh_rows = joined_rows(&mondo_by_cui, &mesh, |row| {
        format!("{}:{}", well_known::MESH, row.source_id)
    });
    if mesh_rows.is_empty() && !mesh.is_empty() && !mondo.is_empty() {
        warn!("MeSH join produced no rows; source format may have changed");
    }
    out.extend(mesh_rows);

    for row in &mut out {
        row.mapping_predicate = predicate_for(&row.xref_id).to_string();
    }

    out.sort();
    out.dedup();
    // Final presentation order, stable under the full sort above
    out.sort_by(|a, b| {
        (a.xref_id.as_str(), a.mondo_id.as_str()).cmp(&(b.xref_id.as_str(), b.mondo_id.as_str()))
    });

    out.into_iter()
        .partition(|row| row.xref_namespace() != Some(Namespace::Mesh))
}

/// Direct Mondo↔CUI cross-references from the Mondo view.
fn direct_rows(mondo: &[&RawMappingRow], filter_out_medgencui: bool) -> Vec<TemplateRow> {
    let mut out = Vec::new();
    for row in mondo {
        let xref_id = normalize(&row.xref_id);
        out.push(TemplateRow {
            mondo_id: row.source_id.clone(),
            xref_id: xref_id.clone(),
            source_id: String::new(),
            mapping_predicate: String::new(),
        });
        // Historically every CUI xref was recorded twice, once per
        // namespace spelling.
        if !filter_out_medgencui && row.id_kind() == RawIdKind::Cui {
            out.push(TemplateRow {
                mondo_id: row.source_id.clone(),
                xref_id: xref_id.replacen(well_known::UMLS, well_known::MEDGENCUI, 1),
                source_id: String::new(),
                mapping_predicate: String::new(),
            });
        }
    }
    out
}

/// Inner-joins a view against the Mondo CUI index, deriving one row per
/// (Mondo id, foreign id) pair. The shared CUI is kept as provenance.
fn joined_rows<F>(
    mondo_by_cui: &HashMap<&str, Vec<&str>>,
    view: &[&RawMappingRow],
    xref_of: F,
) -> Vec<TemplateRow>
where
    F: Fn(&RawMappingRow) -> String,
{
    let mut out = Vec::new();
    for row in view {
        if let Some(mondo_ids) = mondo_by_cui.get(row.xref_id.as_str()) {
            let xref_id = xref_of(row);
            for mondo_id in mondo_ids {
                out.push(TemplateRow {
                    mondo_id: (*mondo_id).to_string(),
                    xref_id: xref_id.clone(),
                    source_id: normalize(&row.xref_id),
                    mapping_predicate: String::new(),
                });
            }
        }
    }
    out
}

/// Predicate assignment keyed on the xref's namespace: MeSH descriptors
/// are equivalences, other MeSH sub-types looser matches, everything
/// else an equivalence.
fn predicate_for(xref_id: &str) -> &'static str {
    match Namespace::of_curie(xref_id) {
        Some(Namespace::Mesh) => match MeshClass::of(curie_local(xref_id)) {
            MeshClass::Descriptor => well_known::EXACT_MATCH,
            _ => well_known::RELATED_MATCH,
        },
        _ => well_known::EXACT_MATCH,
    }
}

/// Writes a template: column header, the fixed header-row record, then
/// the data rows. No metadata comment block.
fn write_template(outpath: &Path, rows: &[TemplateRow]) -> MappingResult<()> {
    write_atomic(outpath, |file| {
        let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(file);
        writer.write_record(TEMPLATE_COLUMNS)?;
        for row in std::iter::once(&TemplateRow::header_row()).chain(rows) {
            writer.write_record([
                row.mondo_id.as_str(),
                row.xref_id.as_str(),
                row.source_id.as_str(),
                row.mapping_predicate.as_str(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    })
}
