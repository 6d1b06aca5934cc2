//! # spdxv-crypto: Checksum Provider
//!
//! Computes content digests of referenced SPDX documents so they can be
//! compared against the checksums pinned in `externalDocumentRefs`.
//!
//! - **`ChecksumAlgorithm`** maps SPDX algorithm names (`SHA1`, `SHA256`, ...)
//!   to a hash implementation.
//! - **`ChecksumProvider`** is the seam the validator calls through, so a
//!   test can count or stub digest computations.
//! - **`FileDigester`** is the production provider: it streams the file in
//!   binary mode, so digests are bit-identical to `sha1sum`, `sha256sum` and
//!   friends.
//!
//! ## Crate Policy
//!
//! - No text-mode reads: line endings and encodings are never transformed.
//! - Digests are rendered as lowercase hex.

pub mod checksum;
pub mod error;

pub use checksum::{file_digest, ChecksumAlgorithm, ChecksumProvider, FileDigester};
pub use error::CryptoError;
