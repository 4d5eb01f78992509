#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Content digests for treesum
//!
//! This crate provides the closed set of digest algorithms and chunked
//! file hashing for integrity verification. Files are streamed in fixed
//! blocks, so peak memory stays at one block regardless of file size.

use sha2::Digest as _;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use treesum_errors::{Error, HashError, StorageError};

/// Size of chunks for streaming hash computation
const CHUNK_SIZE: usize = 1024 * 1024; // 1 MiB

/// The closed set of supported digest algorithms.
///
/// Algorithms are a compile-time capability set; an unknown name is a
/// configuration error raised before any file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Sha256,
    Blake3,
}

impl DigestAlgorithm {
    /// All registered algorithms.
    pub const ALL: [DigestAlgorithm; 2] = [DigestAlgorithm::Sha256, DigestAlgorithm::Blake3];

    /// Canonical lowercase name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Blake3 => "blake3",
        }
    }

    /// Digest output length in bytes
    #[must_use]
    pub fn output_len(self) -> usize {
        match self {
            Self::Sha256 | Self::Blake3 => 32,
        }
    }

    fn new_state(self) -> HasherState {
        match self {
            Self::Sha256 => HasherState::Sha256(Box::new(sha2::Sha256::new())),
            Self::Blake3 => HasherState::Blake3(Box::new(blake3::Hasher::new())),
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" => Ok(Self::Sha256),
            "blake3" => Ok(Self::Blake3),
            _ => Err(HashError::UnsupportedAlgorithm {
                name: s.to_string(),
            }
            .into()),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Incremental hasher state behind the algorithm enum
enum HasherState {
    Sha256(Box<sha2::Sha256>),
    Blake3(Box<blake3::Hasher>),
}

impl HasherState {
    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Sha256(h) => {
                h.update(data);
            }
            Self::Blake3(h) => {
                h.update(data);
            }
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            Self::Sha256(h) => h.finalize().to_vec(),
            Self::Blake3(h) => h.finalize().as_bytes().to_vec(),
        }
    }
}

/// A digest value tagged with the algorithm that produced it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    algorithm: DigestAlgorithm,
    bytes: Vec<u8>,
}

impl Digest {
    /// Get the algorithm that produced this digest
    #[must_use]
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Get the raw bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Convert to lowercase hex string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Parse from hex string
    ///
    /// # Errors
    /// Returns an error if the input is not valid hexadecimal or its length
    /// does not match the algorithm's output size.
    pub fn from_hex(algorithm: DigestAlgorithm, s: &str) -> Result<Self, Error> {
        let bytes = hex::decode(s).map_err(|e| HashError::InvalidDigest {
            message: format!("invalid hex: {e}"),
        })?;

        if bytes.len() != algorithm.output_len() {
            return Err(HashError::InvalidDigest {
                message: format!(
                    "{algorithm} digest must be {} bytes, got {}",
                    algorithm.output_len(),
                    bytes.len()
                ),
            }
            .into());
        }

        Ok(Self { algorithm, bytes })
    }

    /// Compute digest of a byte slice
    #[must_use]
    pub fn from_data(algorithm: DigestAlgorithm, data: &[u8]) -> Self {
        let mut state = algorithm.new_state();
        state.update(data);
        Self {
            algorithm,
            bytes: state.finalize(),
        }
    }

    /// Compute digest of a file in fixed-size chunks
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or a read fails
    /// mid-stream; partial hash state is discarded.
    pub async fn hash_file(path: &Path, algorithm: DigestAlgorithm) -> Result<Self, Error> {
        let file = File::open(path)
            .await
            .map_err(|e| StorageError::from_io_with_path(&e, path))?;
        Self::hash_reader(file, algorithm).await
    }

    /// Compute digest of an arbitrary byte stream in fixed-size chunks
    ///
    /// # Errors
    /// Returns an error if reading from the stream fails.
    pub async fn hash_reader<R>(mut reader: R, algorithm: DigestAlgorithm) -> Result<Self, Error>
    where
        R: AsyncReadExt + Unpin,
    {
        let mut state = algorithm.new_state();
        let mut buffer = vec![0; CHUNK_SIZE];

        loop {
            let n = reader.read(&mut buffer).await?;
            if n == 0 {
                break;
            }
            state.update(&buffer[..n]);
        }

        Ok(Self {
            algorithm,
            bytes: state.finalize(),
        })
    }

    /// Compare against an expected hex digest, ignoring hex case
    ///
    /// Different producers emit either case; a case difference is not
    /// content drift.
    #[must_use]
    pub fn matches_hex(&self, expected: &str) -> bool {
        self.to_hex().eq_ignore_ascii_case(expected)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests;
