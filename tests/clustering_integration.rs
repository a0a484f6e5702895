mod common;

use agc_rs::clustering::IDENTITY_THRESHOLD;
use agc_rs::dereplication::dereplication_fulllength;
use agc_rs::fasta::read_fasta;
use agc_rs::identity::get_identity;
use agc_rs::otu_writer::write_otu;
use agc_rs::{cluster_amplicons, ClusteringConfig};
use std::fs;

use common::*;

#[test]
fn single_substitution_variant_is_absorbed() {
    let dir = tempfile::tempdir().unwrap();
    let original = poly_at_420();
    let variant = with_substitution(&original, 100);
    let noise = with_substitution(&original, 300);
    let short = "ACGT".repeat(50);
    let text = fasta_text(&[
        (&original, 12),
        (&variant, 15),
        (&noise, 3),
        (&short, 20),
    ]);
    let input = write_gz(dir.path(), "amplicon.fasta.gz", &text);

    let records: Vec<_> = dereplication_fulllength(&input, 400, 10).unwrap().collect();
    assert_eq!(records.len(), 2);
    assert_eq!((records[0].sequence.as_str(), records[0].count), (variant.as_str(), 15));
    assert_eq!((records[1].sequence.as_str(), records[1].count), (original.as_str(), 12));

    let results = cluster_amplicons(&input, &ClusteringConfig::default()).unwrap();
    assert_eq!(results.otus.len(), 1);
    assert_eq!(results.otus[0].sequence, variant);
    assert_eq!(results.otus[0].count, 15);

    let output = dir.path().join("OTU.fasta");
    write_otu(&results.otus, &output).unwrap();
    let written = fs::read_to_string(&output).unwrap();
    let headers: Vec<&str> = written.lines().filter(|l| l.starts_with('>')).collect();
    assert_eq!(headers, vec![">OTU_1 occurrence:15"]);
    assert_eq!(written.lines().skip(1).collect::<String>(), variant);
    assert!(written.lines().all(|l| l.len() <= 80));
}

#[test]
fn dereplication_invariants_hold_on_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let original = poly_at_420();
    let entries: Vec<(String, usize)> = (0..8)
        .map(|i| (with_substitution(&original, 20 + 45 * i), 3 + 2 * i))
        .collect();
    let borrowed: Vec<(&str, usize)> = entries.iter().map(|(s, n)| (s.as_str(), *n)).collect();
    let input = write_gz(dir.path(), "amplicon.fasta.gz", &fasta_text(&borrowed));

    let first: Vec<String> = read_fasta(&input, 400).unwrap().map(Result::unwrap).collect();
    let second: Vec<String> = read_fasta(&input, 400).unwrap().map(Result::unwrap).collect();
    assert_eq!(first, second);

    let records: Vec<_> = dereplication_fulllength(&input, 400, 7).unwrap().collect();
    assert!(records.windows(2).all(|w| w[0].count >= w[1].count));
    for record in &records {
        assert!(record.count >= 7);
        assert!(record.sequence.len() >= 400);
        let raw = first.iter().filter(|s| **s == record.sequence).count();
        assert_eq!(raw as u64, record.count);
    }
    assert_eq!(records.len(), 6);
}

#[test]
fn strict_thresholds_give_an_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let original = poly_at_420();
    let input = write_gz(dir.path(), "amplicon.fasta.gz", &fasta_text(&[(&original, 3)]));

    let results = cluster_amplicons(&input, &ClusteringConfig::default()).unwrap();
    assert!(results.otus.is_empty());

    let output = dir.path().join("OTU.fasta");
    write_otu(&results.otus, &output).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn distinct_amplicons_stay_apart() {
    let dir = tempfile::tempdir().unwrap();
    let a = poly_at_420();
    let b = format!("{}{}", "C".repeat(210), "G".repeat(210));
    let input = write_gz(
        dir.path(),
        "amplicon.fasta.gz",
        &fasta_text(&[(&a, 20), (&b, 11), (&with_substitution(&a, 5), 10)]),
    );

    let config = ClusteringConfig {
        threads: 2,
        ..ClusteringConfig::default()
    };
    let results = cluster_amplicons(&input, &config).unwrap();
    let summary: Vec<(usize, u64)> = results
        .otus
        .iter()
        .map(|o| (o.sequence.len(), o.count))
        .collect();
    assert_eq!(summary, vec![(420, 20), (420, 11)]);

    let aligner = config.aligner().unwrap();
    let aln = aligner.align(&results.otus[0].sequence, &results.otus[1].sequence);
    assert!(get_identity(&aln.pair()) < IDENTITY_THRESHOLD);
}
