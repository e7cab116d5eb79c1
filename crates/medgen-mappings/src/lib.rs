//! # medgen-mappings
//!
//! Transforms MedGen's identifier-mapping export into the artifacts the
//! Mondo ingest consumes: SSSOM mapping sets, ROBOT cross-reference
//! templates, and mapping-status reconciliation reports.
//!
//! The export is loaded once per operation through [`load_mapping_set`],
//! which applies prefix normalization, filtering, and a deterministic
//! sort so every output is reproducible byte-for-byte.

#![warn(missing_docs)]

mod create_sssom;
mod mapping_set;
mod output;
mod parser;
mod robot_template;
mod sssom;
mod status;
mod types;

// Re-export medgen-types for convenience
pub use medgen_types;

pub use create_sssom::{run_sssom, CuratedSssomRow, MeshReviewRow, MeshSssomRow, SssomJob};
pub use mapping_set::{load_from_reader, load_mapping_set, standardize};
pub use parser::ExportParser;
pub use robot_template::{build_robot_templates, build_rows, RobotTemplateJob};
pub use sssom::{
    read_sssom, read_sssom_from_reader, used_prefixes, write_sssom, SssomMetadata, SssomRecord,
};
pub use status::{
    obsolete_ids, read_mapping_sources, run_mapping_status, status_rows, MappingSources, StatusJob,
};
pub use types::{LoadOptions, MappingError, MappingResult, ReconcileOptions, UidScope};
