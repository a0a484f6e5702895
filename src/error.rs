//src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between opening the amplicon file and
/// writing the OTU file.
#[derive(Debug, Error)]
pub enum AgcError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{} is a directory.", .0.display())]
    InputIsDirectory(PathBuf),

    #[error("{} does not exist.", .0.display())]
    InputNotFound(PathBuf),

    /// The substitution matrix resource could not be parsed.
    #[error("malformed substitution matrix at line {line}: {message}")]
    MatrixParse { line: usize, message: String },

    #[error("could not build alignment thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, AgcError>;
