use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Opens a FASTA file (plain or gzip) and returns a lazy iterator over its
/// normalized sequences that are at least `minseqlen` long.
pub fn read_fasta<P: AsRef<Path>>(
    path: P,
    minseqlen: usize,
) -> io::Result<FastaSequences<Box<dyn BufRead>>> {
    let mut f = BufReader::new(File::open(path.as_ref())?);

    // Gzip is recognized by its magic bytes, whatever the file is called
    let is_gz = f.fill_buf()?.starts_with(&GZIP_MAGIC);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(f)
    };

    Ok(FastaSequences::new(reader, minseqlen))
}

/// Iterator over the sequences of a FASTA stream.
///
/// Each record's lines are trimmed, joined and uppercased. Records shorter
/// than `minseqlen` are skipped without error.
pub struct FastaSequences<R: BufRead> {
    reader: R,
    minseqlen: usize,
    line: String,
    pending: String,
    has_lines: bool,
    done: bool,
}

impl<R: BufRead> FastaSequences<R> {
    pub fn new(reader: R, minseqlen: usize) -> Self {
        Self {
            reader,
            minseqlen,
            line: String::new(),
            pending: String::new(),
            has_lines: false,
            done: false,
        }
    }

    /// Takes the record accumulated so far, if it passes the length filter.
    fn flush(&mut self) -> Option<String> {
        if !self.has_lines {
            return None;
        }
        self.has_lines = false;
        let seq = std::mem::take(&mut self.pending).to_ascii_uppercase();
        if seq.len() >= self.minseqlen {
            Some(seq)
        } else {
            None
        }
    }
}

impl<R: BufRead> Iterator for FastaSequences<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => {
                    self.done = true;
                    return self.flush().map(Ok);
                }
                Ok(_) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }

            let line = self.line.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                continue;
            }
            if line.starts_with('>') {
                if let Some(seq) = self.flush() {
                    return Some(Ok(seq));
                }
                continue;
            }
            self.pending.push_str(line.trim());
            self.has_lines = true;
        }
        None
    }
}
