//! Well-known namespace prefixes, predicates, and fixed header values.
//!
//! # Examples
//!
//! ```
//! use medgen_types::well_known;
//!
//! assert_eq!(well_known::UMLS, "UMLS");
//! assert_eq!(well_known::EXACT_MATCH, "skos:exactMatch");
//! ```

// =============================================================================
// Namespace prefixes
// =============================================================================

/// Mondo disease ontology, the anchor ontology for cross-references.
pub const MONDO: &str = "MONDO";

/// UMLS concept identifiers (CUIs), shared across source vocabularies.
pub const UMLS: &str = "UMLS";

/// MedGen CUI-novel identifiers, minted for records with no UMLS CUI.
pub const MEDGENCUI: &str = "MEDGENCUI";

/// MedGen-internal UIDs, unstable across releases.
pub const MEDGEN: &str = "MEDGEN";

/// Medical Subject Headings.
pub const MESH: &str = "MESH";

/// Prefix spellings Mondo has historically used for MedGen-space
/// identifiers. Some are old, some current; all must be recognized when
/// extracting MedGen ids from Mondo's mapping set.
pub const HISTORICAL_MEDGEN_PREFIXES: &[&str] = &[
    "Medgen",
    "MedGen",
    "MEDGEN",
    "Medgen_UID",
    "MedGen_UID",
    "UMLS",
    "UMLS_CUI",
];

// =============================================================================
// Mapping predicates
// =============================================================================

/// Equivalence predicate attached to standardized mapping rows.
pub const EXACT_MATCH: &str = "skos:exactMatch";

/// Looser relation used for non-descriptor MeSH cross-references.
pub const RELATED_MATCH: &str = "skos:relatedMatch";

/// Justification recorded on curated SSSOM outputs.
pub const MANUAL_MAPPING_CURATION: &str = "semapv:ManualMappingCuration";

// =============================================================================
// ROBOT template header-row record
// =============================================================================

/// Header-row value for the anchor id column.
pub const ROBOT_ID: &str = "ID";

/// Header-row value for the xref column: annotation axiom adding a
/// database cross-reference to the anchor term.
pub const ROBOT_XREF: &str = "A oboInOwl:hasDbXref";

/// Header-row value for provenance columns: axiom annotation on the
/// xref naming its source.
pub const ROBOT_SOURCE: &str = ">A oboInOwl:source";
