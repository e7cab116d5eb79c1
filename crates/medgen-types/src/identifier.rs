//! Identifier classification and normalization.
//!
//! MedGen's identifier-mapping export carries bare identifiers in three
//! lexical shapes, each belonging to a different namespace. This module
//! provides the classification of raw identifiers, the CURIE normalizer
//! built on it, and the namespace classification of already-prefixed
//! identifiers used by the template builder and the reconciler.

use crate::well_known;

/// Lexical class of a bare identifier from the MedGen export.
///
/// The partition is total: every ASCII string falls into exactly one
/// class. `CN` must be tested before `C` since a CUI-novel id also
/// starts with `C`.
///
/// # Examples
///
/// ```
/// use medgen_types::RawIdKind;
///
/// assert_eq!(RawIdKind::of("CN239583"), RawIdKind::CuiNovel);
/// assert_eq!(RawIdKind::of("C0012634"), RawIdKind::Cui);
/// assert_eq!(RawIdKind::of("766292"), RawIdKind::Uid);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RawIdKind {
    /// CUI-novel: minted by MedGen for records without a UMLS CUI.
    CuiNovel,
    /// Concept Unique Identifier sourced from UMLS.
    Cui,
    /// All-digit identifier local to MedGen, not stable across releases.
    Uid,
}

impl RawIdKind {
    /// Classifies a bare identifier by its prefix characters.
    pub fn of(raw: &str) -> Self {
        if raw.starts_with("CN") {
            Self::CuiNovel
        } else if raw.starts_with('C') {
            Self::Cui
        } else {
            Self::Uid
        }
    }

    /// Returns the namespace prefix assigned to this identifier class.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::CuiNovel => well_known::MEDGENCUI,
            Self::Cui => well_known::UMLS,
            Self::Uid => well_known::MEDGEN,
        }
    }
}

/// Converts a bare identifier into a prefixed CURIE.
///
/// Total over well-formed ASCII input; applies no validation beyond the
/// prefix test, so unexpected shapes land in whichever class matches.
///
/// # Examples
///
/// ```
/// use medgen_types::normalize;
///
/// assert_eq!(normalize("CN239583"), "MEDGENCUI:CN239583");
/// assert_eq!(normalize("C0012634"), "UMLS:C0012634");
/// assert_eq!(normalize("766292"), "MEDGEN:766292");
/// ```
pub fn normalize(raw: &str) -> String {
    format!("{}:{}", RawIdKind::of(raw).prefix(), raw)
}

/// Namespace of a prefixed identifier.
///
/// Used wherever downstream logic branches on an identifier's namespace,
/// instead of re-deriving prefix tests at each call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Namespace {
    /// Mondo disease ontology (the anchor ontology).
    Mondo,
    /// UMLS concept identifiers, the cross-system join key.
    Umls,
    /// MedGen CUI-novel identifiers.
    MedgenCui,
    /// MedGen-local UIDs.
    Medgen,
    /// Medical Subject Headings.
    Mesh,
}

impl Namespace {
    /// Classifies a CURIE by its namespace prefix.
    ///
    /// Returns `None` for prefixes outside the pipeline's vocabulary.
    pub fn of_curie(curie: &str) -> Option<Self> {
        match curie_prefix(curie)? {
            well_known::MONDO => Some(Self::Mondo),
            well_known::UMLS => Some(Self::Umls),
            well_known::MEDGENCUI => Some(Self::MedgenCui),
            well_known::MEDGEN => Some(Self::Medgen),
            well_known::MESH => Some(Self::Mesh),
            _ => None,
        }
    }

    /// Returns the namespace prefix string.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Mondo => well_known::MONDO,
            Self::Umls => well_known::UMLS,
            Self::MedgenCui => well_known::MEDGENCUI,
            Self::Medgen => well_known::MEDGEN,
            Self::Mesh => well_known::MESH,
        }
    }
}

/// Returns the prefix part of a CURIE, if it has one.
pub fn curie_prefix(value: &str) -> Option<&str> {
    match value.split_once(':') {
        Some((prefix, _)) if !prefix.is_empty() => Some(prefix),
        _ => None,
    }
}

/// Returns the local part of a CURIE, or the whole value if unprefixed.
pub fn curie_local(value: &str) -> &str {
    match value.split_once(':') {
        Some((_, local)) => local,
        None => value,
    }
}

/// Sub-type of a MeSH identifier, keyed on its leading character.
///
/// Only descriptors are treated as equivalences when building
/// cross-reference rows; supplementary records and qualifiers are
/// looser matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeshClass {
    /// Descriptor record (`D...`).
    Descriptor,
    /// Supplementary concept record (`C...`).
    Supplementary,
    /// Qualifier record (`Q...`).
    Qualifier,
    /// Any other shape.
    Other,
}

impl MeshClass {
    /// Classifies a bare MeSH identifier.
    pub fn of(local: &str) -> Self {
        match local.chars().next() {
            Some('D') => Self::Descriptor,
            Some('C') => Self::Supplementary,
            Some('Q') => Self::Qualifier,
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_id_partition_priority() {
        // CN must win over C
        assert_eq!(RawIdKind::of("CN239583"), RawIdKind::CuiNovel);
        assert_eq!(RawIdKind::of("C0012634"), RawIdKind::Cui);
        assert_eq!(RawIdKind::of("766292"), RawIdKind::Uid);
        // Partition is total: garbage falls into the digit fallback
        assert_eq!(RawIdKind::of(""), RawIdKind::Uid);
        assert_eq!(RawIdKind::of("X123"), RawIdKind::Uid);
        assert_eq!(RawIdKind::of("CN"), RawIdKind::CuiNovel);
        assert_eq!(RawIdKind::of("C"), RawIdKind::Cui);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("CN239583"), "MEDGENCUI:CN239583");
        assert_eq!(normalize("C0012634"), "UMLS:C0012634");
        assert_eq!(normalize("766292"), "MEDGEN:766292");
    }

    #[test]
    fn test_normalize_is_not_idempotent() {
        // Normalizing an already-prefixed id wraps it again; the loader
        // must therefore apply normalization exactly once.
        assert_eq!(normalize("UMLS:C0012634"), "MEDGEN:UMLS:C0012634");
    }

    #[test]
    fn test_namespace_of_curie() {
        assert_eq!(Namespace::of_curie("MONDO:0005015"), Some(Namespace::Mondo));
        assert_eq!(Namespace::of_curie("UMLS:C0011849"), Some(Namespace::Umls));
        assert_eq!(
            Namespace::of_curie("MEDGENCUI:CN239583"),
            Some(Namespace::MedgenCui)
        );
        assert_eq!(Namespace::of_curie("MEDGEN:766292"), Some(Namespace::Medgen));
        assert_eq!(Namespace::of_curie("MESH:D003920"), Some(Namespace::Mesh));
        assert_eq!(Namespace::of_curie("HP:0000118"), None);
        assert_eq!(Namespace::of_curie("no-prefix"), None);
        assert_eq!(Namespace::of_curie(":empty"), None);
    }

    #[test]
    fn test_curie_split() {
        assert_eq!(curie_prefix("UMLS:C0011849"), Some("UMLS"));
        assert_eq!(curie_local("UMLS:C0011849"), "C0011849");
        assert_eq!(curie_prefix("bare"), None);
        assert_eq!(curie_local("bare"), "bare");
    }

    #[test]
    fn test_mesh_class() {
        assert_eq!(MeshClass::of("D003920"), MeshClass::Descriptor);
        assert_eq!(MeshClass::of("C537163"), MeshClass::Supplementary);
        assert_eq!(MeshClass::of("Q000175"), MeshClass::Qualifier);
        assert_eq!(MeshClass::of("123"), MeshClass::Other);
        assert_eq!(MeshClass::of(""), MeshClass::Other);
    }
}
