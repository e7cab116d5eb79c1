//! Command line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use medgen_mappings::{ReconcileOptions, RobotTemplateJob, SssomJob, StatusJob, UidScope};

use crate::layout::ProjectLayout;

/// Build cross-reference artifacts from the MedGen identifier-mapping
/// export.
#[derive(Debug, Parser)]
#[command(name = "medgen-xrefs", version)]
pub struct Cli {
    /// Project directory the default paths derive from.
    #[arg(long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Pipeline entry points.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create SSSOM mapping-set outputs from the MedGen export.
    Sssom(SssomArgs),
    /// Create ROBOT templates adding MedGen xrefs to Mondo.
    RobotTemplate(RobotTemplateArgs),
    /// Reconcile mapping status between MedGen and Mondo.
    MappingStatus(MappingStatusArgs),
}

/// Arguments for SSSOM production.
#[derive(Debug, Args)]
pub struct SssomArgs {
    /// Path to the mapping file sourced from MedGen.
    #[arg(short = 'm', long)]
    pub input_mappings: Option<PathBuf>,

    /// Path to the SSSOM metadata config YAML.
    #[arg(short = 'c', long)]
    pub input_sssom_config: Option<PathBuf>,

    /// Output path for the HPO-UMLS mapping set.
    #[arg(long)]
    pub out_umls: Option<PathBuf>,

    /// Output path for the HPO-MeSH mapping set.
    #[arg(long)]
    pub out_mesh: Option<PathBuf>,

    /// Output path for the HPO-MeSH review set with non-matches.
    #[arg(long)]
    pub out_mesh_review: Option<PathBuf>,

    /// Keep HPO rows whose subject is not UMLS-anchored.
    #[arg(long)]
    pub keep_non_umls: bool,
}

impl SssomArgs {
    /// Fills unset paths from the project layout.
    pub fn into_job(self, layout: &ProjectLayout) -> SssomJob {
        SssomJob {
            input_mappings: self.input_mappings.unwrap_or_else(|| layout.input_mappings()),
            metadata_config: self
                .input_sssom_config
                .unwrap_or_else(|| layout.sssom_metadata_config()),
            out_umls: self.out_umls.unwrap_or_else(|| layout.out_umls_hpo()),
            out_mesh: self.out_mesh.unwrap_or_else(|| layout.out_hpo_mesh()),
            out_mesh_review: self
                .out_mesh_review
                .unwrap_or_else(|| layout.out_hpo_mesh_review()),
            umls_only: !self.keep_non_umls,
        }
    }
}

/// Arguments for ROBOT template production.
#[derive(Debug, Args)]
pub struct RobotTemplateArgs {
    /// Path to the mapping file sourced from MedGen.
    #[arg(short = 'i', long)]
    pub input_file: Option<PathBuf>,

    /// Output path for the general cross-reference template.
    #[arg(short = 'o', long)]
    pub output_file: Option<PathBuf>,

    /// Output path for the MeSH cross-reference template.
    #[arg(long)]
    pub mesh_output_file: Option<PathBuf>,

    /// Keep CUI-novel identifiers (and mirror CUI xrefs into the
    /// MEDGENCUI namespace).
    #[arg(long)]
    pub keep_medgencui: bool,
}

impl RobotTemplateArgs {
    /// Fills unset paths from the project layout.
    pub fn into_job(self, layout: &ProjectLayout) -> RobotTemplateJob {
        RobotTemplateJob {
            input_mappings: self.input_file.unwrap_or_else(|| layout.input_mappings()),
            out_xrefs: self.output_file.unwrap_or_else(|| layout.out_robot_template()),
            out_mesh_xrefs: self
                .mesh_output_file
                .unwrap_or_else(|| layout.out_mesh_robot_template()),
            filter_out_medgencui: !self.keep_medgencui,
        }
    }
}

/// Arguments for mapping-status reconciliation.
#[derive(Debug, Args)]
pub struct MappingStatusArgs {
    /// Path to Mondo's previously curated mapping set.
    #[arg(long)]
    pub mondo_sssom: Option<PathBuf>,

    /// Path to the released MedGen mapping set.
    #[arg(long)]
    pub medgen_sssom: Option<PathBuf>,

    /// Output path for the obsolete-candidates list.
    #[arg(long)]
    pub out_obsolete: Option<PathBuf>,

    /// Output path for the status table.
    #[arg(long)]
    pub out_status: Option<PathBuf>,

    /// Restrict Mondo rows to these predicates.
    #[arg(long, value_delimiter = ',')]
    pub predicate_filter: Option<Vec<String>>,

    /// Keep unstable MedGen UIDs in every set.
    #[arg(long)]
    pub keep_uids: bool,

    /// Prune UIDs from the Mondo and union sets but not from the
    /// authoritative MedGen set.
    #[arg(long, conflicts_with = "keep_uids")]
    pub keep_new_system_uids: bool,
}

impl MappingStatusArgs {
    /// Fills unset paths from the project layout.
    pub fn into_job(self, layout: &ProjectLayout) -> StatusJob {
        StatusJob {
            mondo_sssom: self.mondo_sssom.unwrap_or_else(|| layout.mondo_sssom()),
            medgen_sssom: self.medgen_sssom.unwrap_or_else(|| layout.medgen_sssom()),
            out_obsolete: self.out_obsolete.unwrap_or_else(|| layout.out_obsolete()),
            out_status: self.out_status.unwrap_or_else(|| layout.out_status()),
            options: ReconcileOptions {
                predicate_filter: self.predicate_filter,
                drop_uids: !self.keep_uids,
                uid_scope: if self.keep_new_system_uids {
                    UidScope::SkipNewSystem
                } else {
                    UidScope::AllSets
                },
            },
        }
    }
}
