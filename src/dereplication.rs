// src/dereplication.rs

use ahash::AHashMap;
use std::io;
use std::path::Path;

use crate::error::Result;
use crate::fasta::read_fasta;
use crate::types::DereplicatedRecord;

/// Collapses identical sequences into `(sequence, count)` records.
///
/// Every sequence has to be seen before any count is final, so the whole
/// input is consumed here. Records with `count < mincount` are dropped; a
/// `mincount` of 0 or less keeps everything. The result is ordered by count,
/// highest first, and equal counts are ordered by sequence so that two runs
/// over the same input always agree.
pub fn dereplicate<I>(sequences: I, mincount: i64) -> Result<Vec<DereplicatedRecord>>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut counts: AHashMap<String, u64> = AHashMap::new();
    let mut total = 0usize;
    for seq in sequences {
        *counts.entry(seq?).or_insert(0) += 1;
        total += 1;
    }

    let mut records: Vec<DereplicatedRecord> = counts
        .into_iter()
        .filter(|&(_, count)| mincount <= 0 || count >= mincount as u64)
        .map(|(sequence, count)| DereplicatedRecord { sequence, count })
        .collect();
    records.sort_unstable_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.sequence.cmp(&b.sequence))
    });

    log::info!(
        "Dereplicated {} reads into {} records with count >= {}",
        total,
        records.len(),
        mincount
    );
    Ok(records)
}

/// Reads `amplicon_file` and dereplicates it in one go.
pub fn dereplication_fulllength<P: AsRef<Path>>(
    amplicon_file: P,
    minseqlen: usize,
    mincount: i64,
) -> Result<std::vec::IntoIter<DereplicatedRecord>> {
    let sequences = read_fasta(amplicon_file, minseqlen)?;
    Ok(dereplicate(sequences, mincount)?.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reads(seqs: &[&str]) -> Vec<io::Result<String>> {
        seqs.iter().map(|s| Ok(s.to_string())).collect()
    }

    #[test]
    fn counts_and_orders_by_abundance() {
        let input = reads(&["AAA", "CCC", "AAA", "GGG", "CCC", "AAA"]);
        let records = dereplicate(input, 0).unwrap();
        let pairs: Vec<(&str, u64)> = records
            .iter()
            .map(|r| (r.sequence.as_str(), r.count))
            .collect();
        assert_eq!(pairs, vec![("AAA", 3), ("CCC", 2), ("GGG", 1)]);
    }

    #[test]
    fn filters_below_mincount() {
        let input = reads(&["AAA", "CCC", "AAA", "GGG", "CCC", "AAA"]);
        let records = dereplicate(input, 2).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.count >= 2));
    }

    #[test]
    fn negative_mincount_keeps_everything() {
        let records = dereplicate(reads(&["A", "C"]), -5).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn equal_counts_are_ordered_by_sequence() {
        let input = reads(&["TT", "GG", "AA", "CC", "GG", "TT"]);
        let seqs: Vec<String> = dereplicate(input, 0)
            .unwrap()
            .into_iter()
            .map(|r| r.sequence)
            .collect();
        assert_eq!(seqs, vec!["GG", "TT", "AA", "CC"]);
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let records = dereplicate(Vec::<io::Result<String>>::new(), 10).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn read_errors_propagate() {
        let input = vec![
            Ok("AAA".to_string()),
            Err(io::Error::new(io::ErrorKind::InvalidData, "corrupt gzip")),
        ];
        assert!(dereplicate(input, 0).is_err());
    }

    #[test]
    fn counts_are_non_increasing() {
        let input = reads(&["A", "C", "C", "G", "G", "G", "T", "T", "T", "T", "C"]);
        let records = dereplicate(input, 0).unwrap();
        assert!(records.windows(2).all(|w| w[0].count >= w[1].count));
        let total: u64 = records.iter().map(|r| r.count).sum();
        assert_eq!(total, 11);
    }
}
