#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// "AAAA...TTTT": 210 A followed by 210 T.
pub fn poly_at_420() -> String {
    format!("{}{}", "A".repeat(210), "T".repeat(210))
}

/// `seq` with a G in place of the base at `pos`.
pub fn with_substitution(seq: &str, pos: usize) -> String {
    let mut out = seq.to_string();
    out.replace_range(pos..pos + 1, "G");
    out
}

/// Builds FASTA text from `(sequence, copies)` pairs, wrapping sequence
/// lines at 60 columns.
pub fn fasta_text(entries: &[(&str, usize)]) -> String {
    let mut text = String::new();
    let mut n = 0;
    for &(seq, copies) in entries {
        for _ in 0..copies {
            n += 1;
            text.push_str(&format!(">read_{n}\n"));
            for chunk in seq.as_bytes().chunks(60) {
                text.push_str(std::str::from_utf8(chunk).unwrap());
                text.push('\n');
            }
        }
    }
    text
}

/// Writes `text` gzip-compressed to `dir/name`.
pub fn write_gz(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    let mut enc = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    enc.write_all(text.as_bytes()).unwrap();
    enc.finish().unwrap();
    path
}
