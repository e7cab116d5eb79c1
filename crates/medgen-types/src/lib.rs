//! # medgen-types
//!
//! Type definitions for the MedGen identifier-mapping pipeline.
//!
//! This crate provides the identifier classification and normalization
//! rules for MedGen's mapping export, plus the typed records flowing
//! through the loader, the SSSOM writer, the ROBOT template builder, and
//! the mapping-status reconciler.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via
//!   serde. Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use medgen_types::{normalize, Namespace, RawIdKind};
//!
//! // Bare export identifiers partition into three namespaces
//! assert_eq!(normalize("C0012634"), "UMLS:C0012634");
//! assert_eq!(normalize("CN239583"), "MEDGENCUI:CN239583");
//! assert_eq!(normalize("766292"), "MEDGEN:766292");
//!
//! // Prefixed identifiers classify by namespace
//! assert_eq!(Namespace::of_curie("MESH:D003920"), Some(Namespace::Mesh));
//! assert_eq!(RawIdKind::of("CN239583"), RawIdKind::CuiNovel);
//! ```

#![warn(missing_docs)]

mod identifier;
mod record;
pub mod well_known;

// Re-export all public types at crate root
pub use identifier::{curie_local, curie_prefix, normalize, MeshClass, Namespace, RawIdKind};
pub use record::{MappingStatus, RawMappingRow, SourceSystem, SssomRow, StatusRow, TemplateRow};
