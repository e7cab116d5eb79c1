//! Default file locations within a MedGen project checkout.
//!
//! Every path the pipeline touches derives from one explicit project
//! directory passed to each entry point; there is no process-wide path
//! state.

use std::path::{Path, PathBuf};

/// Resolves default input and output paths from a project directory.
///
/// The layout mirrors the checkout the pipeline runs in: the NCBI FTP
/// mirror under `ftp.ncbi.nlm.nih.gov/`, configuration under `config/`,
/// and reports under `output/`.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    project_dir: PathBuf,
}

impl ProjectLayout {
    /// Creates a layout rooted at `project_dir`.
    pub fn new<P: Into<PathBuf>>(project_dir: P) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    /// Root of the project checkout.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// The mirrored identifier-mapping export.
    pub fn input_mappings(&self) -> PathBuf {
        self.project_dir
            .join("ftp.ncbi.nlm.nih.gov")
            .join("pub")
            .join("medgen")
            .join("MedGenIDMappings.txt")
    }

    /// The SSSOM metadata config.
    pub fn sssom_metadata_config(&self) -> PathBuf {
        self.project_dir.join("config").join("medgen.sssom-metadata.yml")
    }

    /// Report output directory.
    pub fn outdir(&self) -> PathBuf {
        self.project_dir.join("output")
    }

    /// HPO↔UMLS mapping-set output.
    pub fn out_umls_hpo(&self) -> PathBuf {
        self.project_dir.join("umls-hpo.sssom.tsv")
    }

    /// HPO↔MeSH mapping-set output.
    pub fn out_hpo_mesh(&self) -> PathBuf {
        self.project_dir.join("hpo-mesh.sssom.tsv")
    }

    /// HPO↔MeSH review output, non-matches included.
    pub fn out_hpo_mesh_review(&self) -> PathBuf {
        self.project_dir.join("hpo-mesh-non-matches-included.sssom.tsv")
    }

    /// General cross-reference template output.
    pub fn out_robot_template(&self) -> PathBuf {
        self.project_dir.join("medgen-xrefs.robot.template.tsv")
    }

    /// MeSH cross-reference template output.
    pub fn out_mesh_robot_template(&self) -> PathBuf {
        self.project_dir.join("medgen-mesh-xrefs.robot.template.tsv")
    }

    /// Mondo's previously curated mapping set, staged as an input.
    pub fn mondo_sssom(&self) -> PathBuf {
        self.project_dir.join("tmp").join("input").join("mondo.sssom.tsv")
    }

    /// The released MedGen mapping set.
    pub fn medgen_sssom(&self) -> PathBuf {
        self.outdir().join("release").join("medgen.sssom.tsv")
    }

    /// Obsolete-candidates report.
    pub fn out_obsolete(&self) -> PathBuf {
        self.outdir().join("obsoleted_medgen_terms_in_mondo.txt")
    }

    /// Mapping-status report.
    pub fn out_status(&self) -> PathBuf {
        self.outdir().join("medgen_terms_mapping_status.tsv")
    }
}
