// src/lib.rs
pub mod alignment;
pub mod clustering;
pub mod dereplication;
pub mod error;
pub mod fasta;
pub mod identity;
pub mod matrix;
pub mod otu_writer;
pub mod types;

use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

pub use crate::clustering::{abundance_greedy_clustering, ClusteringConfig};
pub use crate::error::{AgcError, Result};
pub use crate::types::{DereplicatedRecord, Otu};

/// The OTUs of one run. The summary text is generated on demand.
pub struct ClusteringResults {
    /// OTUs in founding order.
    pub otus: Vec<Otu>,
}

impl ClusteringResults {
    /// Human-readable run summary: the OTU count, then one line per OTU.
    pub fn get_summary(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Number of OTUs: {}", self.otus.len());
        for (i, otu) in self.otus.iter().enumerate() {
            let _ = writeln!(
                output,
                "OTU_{}: count={}, length={}",
                i + 1,
                otu.count,
                otu.sequence.len()
            );
        }
        output
    }
}

/// Checks that `path` names an existing regular file.
pub fn validate_amplicon_file<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_file() {
        Ok(path.to_path_buf())
    } else if path.is_dir() {
        Err(AgcError::InputIsDirectory(path.to_path_buf()))
    } else {
        Err(AgcError::InputNotFound(path.to_path_buf()))
    }
}

/// Validates the input, then dereplicates and clusters it.
pub fn cluster_amplicons<P: AsRef<Path>>(
    amplicon_file: P,
    config: &ClusteringConfig,
) -> Result<ClusteringResults> {
    let amplicon_file = validate_amplicon_file(amplicon_file)?;
    log::info!(
        "Clustering {} (minseqlen={}, mincount={})",
        amplicon_file.display(),
        config.minseqlen,
        config.mincount
    );
    let otus = abundance_greedy_clustering(&amplicon_file, config)?;
    Ok(ClusteringResults { otus })
}
