//! # Checksum Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Errors from digest computation.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The algorithm name is unknown, or known to SPDX but not computable.
    #[error("unsupported checksum algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The file to digest could not be opened or read.
    #[error("could not read '{}' for checksum: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
