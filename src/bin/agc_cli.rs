use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process;

use agc_rs::otu_writer::write_otu;
use agc_rs::{cluster_amplicons, validate_amplicon_file, ClusteringConfig};

/// OTU clustering of amplicon reads
///
/// Long options use GNU double-dash spelling (`--minseqlen`); the
/// underscore forms such as `--amplicon_file` are accepted as aliases.
/// Single-dash long options like `-minseqlen` are not supported.
#[derive(Debug, Parser)]
#[command(name = "agc-rs", version, about, long_about)]
struct Args {
    /// Amplicon file, a compressed fasta file (.fasta.gz)
    #[arg(short = 'i', long, alias = "amplicon_file", value_parser = parse_amplicon_file)]
    amplicon_file: PathBuf,

    /// Minimum sequence length for dereplication
    #[arg(short = 's', long, default_value_t = 400)]
    minseqlen: usize,

    /// Minimum count for dereplication
    #[arg(short = 'm', long, default_value_t = 10, allow_negative_numbers = true)]
    mincount: i64,

    /// Chunk size (reserved, currently unused)
    #[arg(short = 'c', long, alias = "chunk_size", default_value_t = 100)]
    chunk_size: usize,

    /// K-mer size (reserved, currently unused)
    #[arg(short = 'k', long, alias = "kmer_size", default_value_t = 8)]
    kmer_size: usize,

    /// Output file
    #[arg(short = 'o', long, alias = "output_file", default_value = "OTU.fasta")]
    output_file: PathBuf,

    /// Substitution matrix file (defaults to the bundled nucleotide identity matrix)
    #[arg(short = 'x', long)]
    matrix: Option<PathBuf>,

    /// Threads used to compare a sequence against existing OTUs
    #[arg(short = 't', long, default_value_t = 1)]
    threads: usize,
}

fn parse_amplicon_file(path: &str) -> Result<PathBuf, String> {
    validate_amplicon_file(path).map_err(|e| e.to_string())
}

fn spinner(color: &str, message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
            ])
            .template(&format!("{{spinner:.{color}}} {{msg}}"))
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = ClusteringConfig {
        minseqlen: args.minseqlen,
        mincount: args.mincount,
        chunk_size: args.chunk_size,
        kmer_size: args.kmer_size,
        matrix: args.matrix,
        threads: args.threads,
    };

    // 1. Dereplicate and cluster
    let pb = spinner("green", "Clustering amplicons...");
    let results = match cluster_amplicons(&args.amplicon_file, &config) {
        Ok(results) => results,
        Err(e) => {
            pb.abandon_with_message("Clustering failed.");
            log::error!("{e}");
            process::exit(1);
        }
    };
    pb.finish_with_message("Clustering finished.");

    print!("{}", results.get_summary());

    // 2. Write the OTU file
    let pb = spinner("yellow", "Writing OTU file...");
    if let Err(e) = write_otu(&results.otus, &args.output_file) {
        pb.abandon_with_message("Writing failed.");
        log::error!("Could not write {}: {e}", args.output_file.display());
        process::exit(1);
    }
    pb.finish_with_message("OTU file written.");

    println!("OTU file written: {}", args.output_file.display());
}
