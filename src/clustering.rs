// src/clustering.rs

use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::alignment::NeedlemanWunsch;
use crate::dereplication::dereplication_fulllength;
use crate::error::Result;
use crate::identity::get_identity;
use crate::matrix::{ScoringMatrix, SubstitutionMatrix};
use crate::types::{DereplicatedRecord, Otu};

/// Minimum identity (in percent) for a record to join an existing OTU.
pub const IDENTITY_THRESHOLD: f64 = 97.0;
pub const GAP_OPEN: i32 = -1;
pub const GAP_EXTEND: i32 = -1;

/// Run parameters, with the same defaults as the command line.
#[derive(Debug, Clone)]
pub struct ClusteringConfig {
    pub minseqlen: usize,
    pub mincount: i64,
    /// Accepted for a future k-mer pre-filter; not used yet.
    pub chunk_size: usize,
    /// Accepted for a future k-mer pre-filter; not used yet.
    pub kmer_size: usize,
    /// Substitution matrix file. `None` uses the bundled identity matrix.
    pub matrix: Option<PathBuf>,
    /// Threads used to scan OTU representatives. 1 scans sequentially.
    pub threads: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            minseqlen: 400,
            mincount: 10,
            chunk_size: 100,
            kmer_size: 8,
            matrix: None,
            threads: 1,
        }
    }
}

impl ClusteringConfig {
    /// Loads the configured matrix and builds the aligner used for every
    /// comparison of the run.
    pub fn aligner(&self) -> Result<NeedlemanWunsch<SubstitutionMatrix>> {
        let matrix = match &self.matrix {
            Some(path) => SubstitutionMatrix::from_path(path)?,
            None => SubstitutionMatrix::bundled()?,
        };
        Ok(NeedlemanWunsch::new(matrix, GAP_OPEN, GAP_EXTEND))
    }
}

/// Returns the index of the earliest-founded OTU whose representative is at
/// least `threshold` percent identical to `sequence`.
fn find_matching_otu<S: ScoringMatrix + Sync>(
    otus: &[Otu],
    sequence: &str,
    aligner: &NeedlemanWunsch<S>,
    threshold: f64,
    parallel: bool,
) -> Option<usize> {
    let is_similar = |otu: &Otu| {
        let aln = aligner.align(sequence, &otu.sequence);
        get_identity(&aln.pair()) >= threshold
    };
    if parallel {
        // position_first keeps "first match in founding order" semantics.
        otus.par_iter().position_first(is_similar)
    } else {
        otus.iter().position(is_similar)
    }
}

/// Greedy abundance clustering over records sorted by decreasing count.
///
/// Each record is compared with the existing OTUs in founding order and
/// joins the first one reaching `threshold`; joining changes nothing in the
/// OTU. A record that joins nothing founds a new OTU with its own sequence
/// and count.
pub fn greedy_clustering<I, S>(
    records: I,
    aligner: &NeedlemanWunsch<S>,
    threshold: f64,
    threads: usize,
) -> Result<Vec<Otu>>
where
    I: IntoIterator<Item = DereplicatedRecord>,
    S: ScoringMatrix + Sync,
{
    let pool = if threads > 1 {
        Some(
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?,
        )
    } else {
        None
    };

    let mut otus: Vec<Otu> = Vec::new();
    let mut absorbed = 0usize;
    for record in records {
        let hit = match &pool {
            Some(pool) => pool.install(|| {
                find_matching_otu(&otus, &record.sequence, aligner, threshold, true)
            }),
            None => find_matching_otu(&otus, &record.sequence, aligner, threshold, false),
        };

        match hit {
            Some(idx) => {
                absorbed += 1;
                log::debug!(
                    "record (count {}) joins OTU_{}",
                    record.count,
                    idx + 1
                );
            }
            None => {
                log::debug!(
                    "record (count {}) founds OTU_{}",
                    record.count,
                    otus.len() + 1
                );
                otus.push(Otu::from(record));
            }
        }
    }

    log::info!(
        "Clustered {} records into {} OTUs ({} absorbed)",
        otus.len() + absorbed,
        otus.len(),
        absorbed
    );
    Ok(otus)
}

/// Reads, dereplicates and clusters `amplicon_file`.
pub fn abundance_greedy_clustering<P: AsRef<Path>>(
    amplicon_file: P,
    config: &ClusteringConfig,
) -> Result<Vec<Otu>> {
    let aligner = config.aligner()?;
    log::debug!(
        "chunk_size={} kmer_size={} (reserved, unused)",
        config.chunk_size,
        config.kmer_size
    );

    let records = dereplication_fulllength(amplicon_file, config.minseqlen, config.mincount)?;
    greedy_clustering(records, &aligner, IDENTITY_THRESHOLD, config.threads)
}
