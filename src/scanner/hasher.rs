//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing BLAKE3 hashes
//! of file contents using memory-efficient streaming: files are read in
//! fixed-size chunks so peak memory stays bounded regardless of file size.
//! Files at or above [`MMAP_THRESHOLD`] use BLAKE3's memory-mapped,
//! rayon-parallel path instead.
//!
//! Only content bytes affect the digest, never the path, name, or
//! filesystem metadata. The empty file hashes to the digest of the empty
//! byte sequence, so zero-byte files group together like any others.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::HashError;

/// A BLAKE3 content digest (256 bits).
pub type Hash = [u8; 32];

/// Read buffer size for streamed hashing.
const CHUNK_SIZE: usize = 64 * 1024;

/// Files at or above this size are hashed via memory mapping.
pub const MMAP_THRESHOLD: u64 = 16 * 1024 * 1024;

/// Render a hash as a 64-character lowercase hex string.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    blake3::Hash::from_bytes(*hash).to_hex().to_string()
}

/// Parse a 64-character hex string back into a hash.
#[must_use]
pub fn hex_to_hash(hex: &str) -> Option<Hash> {
    blake3::Hash::from_hex(hex).ok().map(|h| *h.as_bytes())
}

/// Streaming BLAKE3 file hasher.
///
/// Stateless and cheap to share across worker threads.
#[derive(Debug, Default, Clone)]
pub struct Hasher;

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hash the full content of a file.
    ///
    /// # Errors
    ///
    /// Returns a [`HashError`] if the file vanished, is unreadable, or an
    /// I/O fault occurs mid-read. Failures are per-file; the caller records
    /// them and continues with the remaining files.
    pub fn hash_file(&self, path: &Path) -> Result<Hash, HashError> {
        let file = File::open(path).map_err(|e| map_io_error(path, e))?;
        let size = file
            .metadata()
            .map_err(|e| map_io_error(path, e))?
            .len();

        let mut hasher = blake3::Hasher::new();

        if size >= MMAP_THRESHOLD {
            hasher
                .update_mmap_rayon(path)
                .map_err(|e| map_io_error(path, e))?;
        } else {
            let mut file = file;
            let mut buf = vec![0u8; CHUNK_SIZE];
            loop {
                let n = file.read(&mut buf).map_err(|e| map_io_error(path, e))?;
                if n == 0 {
                    break;
                }
                hasher.update(&buf[..n]);
            }
        }

        Ok(*hasher.finalize().as_bytes())
    }
}

/// Map an I/O error during hashing to a [`HashError`].
fn map_io_error(path: &Path, error: std::io::Error) -> HashError {
    use std::io::ErrorKind;

    match error.kind() {
        ErrorKind::NotFound => {
            log::debug!("File vanished before hashing: {}", path.display());
            HashError::NotFound(path.to_path_buf())
        }
        ErrorKind::PermissionDenied => {
            log::warn!("Permission denied: {}", path.display());
            HashError::PermissionDenied(path.to_path_buf())
        }
        _ => {
            log::warn!("I/O error for {}: {}", path.display(), error);
            HashError::Io {
                path: path.to_path_buf(),
                source: error,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_hash_is_stable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.txt");
        fs::write(&path, b"hello").unwrap();

        let hasher = Hasher::new();
        let first = hasher.hash_file(&path).unwrap();
        let second = hasher.hash_file(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_hash_depends_only_on_content() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("deeply_different_name.dat");
        fs::write(&a, b"same bytes").unwrap();
        fs::write(&b, b"same bytes").unwrap();

        let hasher = Hasher::new();
        assert_eq!(hasher.hash_file(&a).unwrap(), hasher.hash_file(&b).unwrap());
    }

    #[test]
    fn test_different_content_different_hash() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, b"hello").unwrap();
        fs::write(&b, b"world").unwrap();

        let hasher = Hasher::new();
        assert_ne!(hasher.hash_file(&a).unwrap(), hasher.hash_file(&b).unwrap());
    }

    #[test]
    fn test_empty_file_hashes_to_empty_digest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty");
        fs::write(&path, b"").unwrap();

        let hasher = Hasher::new();
        let hash = hasher.hash_file(&path).unwrap();

        assert_eq!(hash, *blake3::hash(b"").as_bytes());
    }

    #[test]
    fn test_hash_matches_in_memory_digest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.bin");
        let content: Vec<u8> = (0..100_000u32).flat_map(u32::to_le_bytes).collect();
        fs::write(&path, &content).unwrap();

        let hasher = Hasher::new();
        let hash = hasher.hash_file(&path).unwrap();

        assert_eq!(hash, *blake3::hash(&content).as_bytes());
    }

    #[test]
    fn test_missing_file_reports_not_found() {
        let hasher = Hasher::new();
        let err = hasher
            .hash_file(Path::new("/nonexistent/file/54321"))
            .unwrap_err();
        assert!(matches!(err, HashError::NotFound(_)));
    }

    #[test]
    fn test_hex_round_trip() {
        let hash = *blake3::hash(b"round trip").as_bytes();
        let hex = hash_to_hex(&hash);

        assert_eq!(hex.len(), 64);
        assert_eq!(hex_to_hash(&hex), Some(hash));
        assert_eq!(hex_to_hash("not hex"), None);
    }
}
