//! Record types for each stage of the mapping pipeline.
//!
//! Each stage has an explicit typed schema; transformations between
//! stages are named functions rather than runtime column renames.

use crate::{Namespace, RawIdKind};

/// Origin vocabulary named in the `source` column of the export.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceSystem {
    /// Genetic Testing Registry.
    Gtr,
    /// Human Phenotype Ontology.
    Hpo,
    /// Mondo disease ontology.
    Mondo,
    /// MedGen itself (UID-to-CUI rows).
    MedGen,
    /// Medical Subject Headings.
    Mesh,
    /// Online Mendelian Inheritance in Man.
    Omim,
    /// Orphanet rare disease nomenclature.
    Orphanet,
    /// SNOMED CT, US edition.
    SnomedCtUs,
    /// Any source not otherwise recognized, spelling preserved.
    Other(String),
}

impl SourceSystem {
    /// Parses the export's `source` column spelling.
    pub fn parse(value: &str) -> Self {
        match value {
            "GTR" => Self::Gtr,
            "HPO" => Self::Hpo,
            "MONDO" => Self::Mondo,
            "MedGen" => Self::MedGen,
            "MeSH" => Self::Mesh,
            "OMIM" => Self::Omim,
            "Orphanet" => Self::Orphanet,
            "SNOMEDCT_US" => Self::SnomedCtUs,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the export's spelling for this source.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gtr => "GTR",
            Self::Hpo => "HPO",
            Self::Mondo => "MONDO",
            Self::MedGen => "MedGen",
            Self::Mesh => "MeSH",
            Self::Omim => "OMIM",
            Self::Orphanet => "Orphanet",
            Self::SnomedCtUs => "SNOMEDCT_US",
            Self::Other(s) => s,
        }
    }
}

/// One row of the MedGen identifier-mapping export.
///
/// `xref_id` holds the bare identifier as exported, or the normalized
/// CURIE once the loader has applied prefixing. Many rows share the same
/// `xref_id`: one row per (identifier, source) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawMappingRow {
    /// The MedGen-side identifier (CUI, CUI-novel, or UID).
    pub xref_id: String,
    /// Origin vocabulary of this mapping.
    pub source: SourceSystem,
    /// Identifier local to the origin vocabulary.
    pub source_id: String,
    /// Preferred display name, when the export carries one.
    pub pref_name: Option<String>,
}

impl RawMappingRow {
    /// Lexical class of the identifier, computed on the local part so it
    /// is stable whether or not the row has been normalized.
    pub fn id_kind(&self) -> RawIdKind {
        RawIdKind::of(crate::curie_local(&self.xref_id))
    }
}

/// A standardized SSSOM mapping row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SssomRow {
    /// Namespaced subject identifier.
    pub subject_id: String,
    /// Display label for the subject; empty when the source had none.
    pub subject_label: String,
    /// Mapping predicate, always populated.
    pub predicate_id: String,
    /// Namespaced object identifier.
    pub object_id: String,
}

/// One row of a ROBOT cross-reference template.
///
/// Optional fields hold the empty string rather than a null marker so
/// serialization is stable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateRow {
    /// Mondo identifier the xref attaches to.
    pub mondo_id: String,
    /// Namespaced identifier being attached.
    pub xref_id: String,
    /// Provenance identifier, or empty.
    pub source_id: String,
    /// Predicate describing the strength of the mapping, or empty.
    pub mapping_predicate: String,
}

impl TemplateRow {
    /// The fixed first row of every template output, telling ROBOT how
    /// to interpret each column.
    pub fn header_row() -> Self {
        Self {
            mondo_id: crate::well_known::ROBOT_ID.to_string(),
            xref_id: crate::well_known::ROBOT_XREF.to_string(),
            source_id: crate::well_known::ROBOT_SOURCE.to_string(),
            mapping_predicate: crate::well_known::ROBOT_SOURCE.to_string(),
        }
    }

    /// Namespace of the xref, if recognized.
    pub fn xref_namespace(&self) -> Option<Namespace> {
        Namespace::of_curie(&self.xref_id)
    }
}

/// Membership status of a MedGen identifier across the two systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MappingStatus {
    /// Present in both mapping sets.
    Both,
    /// Only in the authoritative MedGen set.
    Medgen,
    /// Only in Mondo's previously curated set.
    Mondo,
}

impl MappingStatus {
    /// Derives the status from membership flags.
    ///
    /// An id reaches the reconciler only via one of the two sets, so the
    /// (false, false) combination cannot occur; it is mapped to `Both`
    /// for totality.
    pub fn from_membership(in_medgen: bool, in_mondo: bool) -> Self {
        match (in_medgen, in_mondo) {
            (true, false) => Self::Medgen,
            (false, true) => Self::Mondo,
            _ => Self::Both,
        }
    }

    /// Status label written to the report.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Medgen => "medgen",
            Self::Mondo => "mondo",
            Self::Both => "both",
        }
    }
}

/// One row of the mapping-status report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusRow {
    /// Prefix-stripped identifier.
    pub subject_id: String,
    /// Present in the authoritative MedGen mapping set.
    pub in_medgen: bool,
    /// Present in Mondo's previously curated mapping set.
    pub in_mondo: bool,
    /// Derived membership status.
    pub status: MappingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_system_round_trip() {
        for spelling in ["GTR", "HPO", "MONDO", "MedGen", "MeSH", "OMIM", "Orphanet", "SNOMEDCT_US"] {
            assert_eq!(SourceSystem::parse(spelling).as_str(), spelling);
        }
        let other = SourceSystem::parse("ClinVar");
        assert_eq!(other, SourceSystem::Other("ClinVar".to_string()));
        assert_eq!(other.as_str(), "ClinVar");
    }

    #[test]
    fn test_raw_row_id_kind_survives_normalization() {
        let mut row = RawMappingRow {
            xref_id: "CN239583".to_string(),
            source: SourceSystem::Mondo,
            source_id: "MONDO:0013588".to_string(),
            pref_name: None,
        };
        assert_eq!(row.id_kind(), RawIdKind::CuiNovel);
        row.xref_id = crate::normalize(&row.xref_id);
        assert_eq!(row.id_kind(), RawIdKind::CuiNovel);
    }

    #[test]
    fn test_template_header_row() {
        let header = TemplateRow::header_row();
        assert_eq!(header.mondo_id, "ID");
        assert_eq!(header.xref_id, "A oboInOwl:hasDbXref");
        assert_eq!(header.source_id, ">A oboInOwl:source");
    }

    #[test]
    fn test_mapping_status_from_membership() {
        assert_eq!(MappingStatus::from_membership(true, false), MappingStatus::Medgen);
        assert_eq!(MappingStatus::from_membership(false, true), MappingStatus::Mondo);
        assert_eq!(MappingStatus::from_membership(true, true), MappingStatus::Both);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let row = SssomRow {
            subject_id: "UMLS:C0011849".to_string(),
            subject_label: "Diabetes mellitus".to_string(),
            predicate_id: "skos:exactMatch".to_string(),
            object_id: "HP:0000819".to_string(),
        };
        let json = serde_json::to_string(&row).unwrap();
        let parsed: SssomRow = serde_json::from_str(&json).unwrap();
        assert_eq!(row, parsed);
    }
}
