//! # File Checksums
//!
//! Streams a file through the hash named by an SPDX checksum algorithm and
//! renders the result as lowercase hex.
//!
//! SPDX 2.2 names nine algorithms. SHA1, SHA224, SHA256, SHA384, SHA512 and
//! MD5 are computed; MD2, MD4 and MD6 are recognized but rejected as
//! unsupported, exactly like an unknown name.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::error::CryptoError;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// A checksum algorithm the validator can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Md5,
}

impl ChecksumAlgorithm {
    /// The SPDX spelling of the algorithm name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha224 => "SHA224",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
            Self::Md5 => "MD5",
        }
    }

    /// Length of the hex rendering of a digest.
    pub fn hex_len(&self) -> usize {
        match self {
            Self::Sha1 => 40,
            Self::Sha224 => 56,
            Self::Sha256 => 64,
            Self::Sha384 => 96,
            Self::Sha512 => 128,
            Self::Md5 => 32,
        }
    }

    /// Hash everything `reader` yields.
    pub fn digest_reader(&self, reader: impl Read) -> io::Result<String> {
        match self {
            Self::Sha1 => hash_reader::<Sha1>(reader),
            Self::Sha224 => hash_reader::<Sha224>(reader),
            Self::Sha256 => hash_reader::<Sha256>(reader),
            Self::Sha384 => hash_reader::<Sha384>(reader),
            Self::Sha512 => hash_reader::<Sha512>(reader),
            Self::Md5 => hash_reader::<Md5>(reader),
        }
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = CryptoError;

    /// Names match case-insensitively; `SHA-256` style hyphens are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match normalized.as_str() {
            "SHA1" => Ok(Self::Sha1),
            "SHA224" => Ok(Self::Sha224),
            "SHA256" => Ok(Self::Sha256),
            "SHA384" => Ok(Self::Sha384),
            "SHA512" => Ok(Self::Sha512),
            "MD5" => Ok(Self::Md5),
            _ => Err(CryptoError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computes the digest of a file given an SPDX algorithm name.
///
/// The validator calls digests through this trait so that tests can wrap
/// the real implementation.
pub trait ChecksumProvider: Send + Sync {
    /// Digest `path` with `algorithm`, returning lowercase hex.
    ///
    /// # Errors
    ///
    /// `CryptoError::UnsupportedAlgorithm` for unknown names,
    /// `CryptoError::Io` if the file cannot be read.
    fn digest(&self, path: &Path, algorithm: &str) -> Result<String, CryptoError>;
}

/// Production [`ChecksumProvider`] reading from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDigester;

impl ChecksumProvider for FileDigester {
    fn digest(&self, path: &Path, algorithm: &str) -> Result<String, CryptoError> {
        let algorithm: ChecksumAlgorithm = algorithm.parse()?;
        file_digest(path, algorithm)
    }
}

/// Digest the bytes of the file at `path`.
pub fn file_digest(path: &Path, algorithm: ChecksumAlgorithm) -> Result<String, CryptoError> {
    let io_err = |source| CryptoError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    let hex = algorithm
        .digest_reader(BufReader::with_capacity(READ_BUFFER_SIZE, file))
        .map_err(io_err)?;
    tracing::trace!(file = %path.display(), %algorithm, digest = %hex, "computed file digest");
    Ok(hex)
}

fn hash_reader<D: Digest + io::Write>(mut reader: impl Read) -> io::Result<String> {
    let mut hasher = D::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file_with(content: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn known_vectors_for_abc() {
        let f = file_with(b"abc");
        let cases = [
            ("SHA1", "a9993e364706816aba3e25717850c26c9cd0d89d"),
            (
                "SHA224",
                "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7",
            ),
            (
                "SHA256",
                "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
            ),
            ("MD5", "900150983cd24fb0d6963f7d28e17f72"),
        ];
        for (name, expected) in cases {
            assert_eq!(FileDigester.digest(f.path(), name).unwrap(), expected, "{name}");
        }
    }

    #[test]
    fn empty_file_sha1() {
        let f = file_with(b"");
        assert_eq!(
            FileDigester.digest(f.path(), "SHA1").unwrap(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn hex_lengths_match_algorithm() {
        let f = file_with(b"{\"name\": \"x\"}\n");
        for alg in [
            ChecksumAlgorithm::Sha1,
            ChecksumAlgorithm::Sha224,
            ChecksumAlgorithm::Sha256,
            ChecksumAlgorithm::Sha384,
            ChecksumAlgorithm::Sha512,
            ChecksumAlgorithm::Md5,
        ] {
            let hex = file_digest(f.path(), alg).unwrap();
            assert_eq!(hex.len(), alg.hex_len(), "{alg}");
            assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn line_endings_are_not_normalized() {
        let unix = file_with(b"a\nb\n");
        let dos = file_with(b"a\r\nb\r\n");
        assert_ne!(
            FileDigester.digest(unix.path(), "SHA1").unwrap(),
            FileDigester.digest(dos.path(), "SHA1").unwrap()
        );
    }

    #[test]
    fn content_larger_than_buffer() {
        let data = vec![b'x'; READ_BUFFER_SIZE * 3 + 17];
        let f = file_with(&data);
        let streamed = FileDigester.digest(f.path(), "SHA256").unwrap();
        let direct: String = Sha256::digest(&data)
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        assert_eq!(streamed, direct);
    }

    #[test]
    fn interrupted_reads_are_retried() {
        struct Flaky {
            interrupted: bool,
            data: &'static [u8],
        }
        impl Read for Flaky {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(io::ErrorKind::Interrupted.into());
                }
                let n = self.data.len().min(buf.len());
                buf[..n].copy_from_slice(&self.data[..n]);
                self.data = &self.data[n..];
                Ok(n)
            }
        }
        let reader = Flaky {
            interrupted: false,
            data: b"abc",
        };
        assert_eq!(
            ChecksumAlgorithm::Sha1.digest_reader(reader).unwrap(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn algorithm_names_are_case_insensitive() {
        assert_eq!("sha1".parse::<ChecksumAlgorithm>().unwrap(), ChecksumAlgorithm::Sha1);
        assert_eq!("SHA-256".parse::<ChecksumAlgorithm>().unwrap(), ChecksumAlgorithm::Sha256);
        assert_eq!("Md5".parse::<ChecksumAlgorithm>().unwrap(), ChecksumAlgorithm::Md5);
    }

    #[test]
    fn unsupported_algorithms_are_rejected() {
        let f = file_with(b"abc");
        for name in ["MD2", "MD4", "MD6", "CRC32", ""] {
            let err = FileDigester.digest(f.path(), name).unwrap_err();
            assert!(
                matches!(err, CryptoError::UnsupportedAlgorithm(ref n) if n == name),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = FileDigester.digest(&missing, "SHA1").unwrap_err();
        match err {
            CryptoError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("expected Io, got {other}"),
        }
    }

    #[test]
    fn unknown_algorithm_checked_before_file_access() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileDigester
            .digest(&dir.path().join("nope.json"), "MD6")
            .unwrap_err();
        assert!(matches!(err, CryptoError::UnsupportedAlgorithm(_)));
    }
}
