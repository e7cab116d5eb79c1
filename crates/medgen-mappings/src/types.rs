//! Error taxonomy and option structs for mapping operations.

use medgen_types::SourceSystem;
use thiserror::Error;

/// Errors that can occur while loading or producing mapping tables.
#[derive(Error, Debug)]
pub enum MappingError {
    /// I/O error reading or writing a mapping file.
    #[error("IO error on mapping file: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// YAML metadata parsing error.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Input file not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A required column is absent from a source file.
    #[error("Missing required column '{column}' in {path}")]
    MissingColumn {
        /// The name of the missing column.
        column: String,
        /// The file that lacked it.
        path: String,
    },

    /// The metadata config is missing a required key or is malformed.
    #[error("Config error: {message}")]
    Config {
        /// Description of what the config lacked.
        message: String,
    },
}

/// Result type for mapping operations.
pub type MappingResult<T> = Result<T, MappingError>;

/// Options applied while loading the identifier-mapping export.
///
/// The load pipeline runs in a fixed order: prefix normalization, the
/// CUI-novel drop, the deterministic sort, then the source filter.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Retain only rows from these sources; `None` keeps everything.
    pub filter_sources: Option<Vec<SourceSystem>>,
    /// Drop CUI-novel rows. They have no stable cross-system anchor.
    pub drop_cui_novel: bool,
    /// Rewrite each bare identifier into its prefixed CURIE form.
    pub normalize_ids: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            filter_sources: None,
            drop_cui_novel: true,
            normalize_ids: true,
        }
    }
}

impl LoadOptions {
    /// Creates options filtered to a single source.
    pub fn for_source(source: SourceSystem) -> Self {
        Self {
            filter_sources: Some(vec![source]),
            ..Self::default()
        }
    }

    /// Creates options that keep every row untouched except for the
    /// deterministic sort. Used by the template builder, which joins on
    /// the bare CUI and applies prefixes itself.
    pub fn raw() -> Self {
        Self {
            filter_sources: None,
            drop_cui_novel: false,
            normalize_ids: false,
        }
    }
}

/// Which id sets the UID drop applies to during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UidScope {
    /// Prune UIDs from the union and both per-system sets.
    AllSets,
    /// Prune the union and the Mondo set but leave the authoritative
    /// MedGen set intact.
    SkipNewSystem,
}

/// Options for the mapping-status reconciler.
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Restrict Mondo-side rows to these predicates; `None` keeps all.
    pub predicate_filter: Option<Vec<String>>,
    /// Drop MedGen UIDs before comparing. UIDs are unstable and cannot
    /// be reconciled across releases.
    pub drop_uids: bool,
    /// Scope of the UID drop.
    pub uid_scope: UidScope,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            predicate_filter: None,
            drop_uids: true,
            uid_scope: UidScope::AllSets,
        }
    }
}
