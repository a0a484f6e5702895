use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::types::Otu;

/// Sequence line width of the OTU FASTA output.
pub const LINE_WIDTH: usize = 80;

/// Writes one FASTA record per OTU, in list order, to any writer.
pub fn write_otu_to<W: Write>(otus: &[Otu], mut writer: W) -> io::Result<()> {
    for (idx, otu) in otus.iter().enumerate() {
        writeln!(writer, ">OTU_{} occurrence:{}", idx + 1, otu.count)?;
        let seq = otu.sequence.as_bytes();
        if seq.is_empty() {
            writer.write_all(b"\n")?;
        }
        for chunk in seq.chunks(LINE_WIDTH) {
            writer.write_all(chunk)?;
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()
}

/// Creates (or truncates) `output_file` and writes the OTUs into it.
pub fn write_otu<P: AsRef<Path>>(otus: &[Otu], output_file: P) -> io::Result<()> {
    let file = File::create(output_file.as_ref())?;
    write_otu_to(otus, BufWriter::new(file))?;
    log::info!(
        "Wrote {} OTUs to {}",
        otus.len(),
        output_file.as_ref().display()
    );
    Ok(())
}
