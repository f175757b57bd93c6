//! Streaming file content hashing.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use blake3::Hasher;

use dirsift_core::Digest;

/// Chunk size for streaming reads.
const CHUNK_SIZE: usize = 64 * 1024;

/// Compute the BLAKE3 digest of a file's contents.
///
/// The file is streamed through the hasher in fixed 64 KiB chunks;
/// the whole file is never held in memory. An open or read failure is
/// returned to the caller, which for batch scans means skip the file
/// and keep going.
pub fn digest_file(path: impl AsRef<Path>) -> io::Result<Digest> {
    let mut file = File::open(path)?;
    let mut hasher = Hasher::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(Digest::new(*hasher.finalize().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_identical_content_identical_digest() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a"), "same bytes").unwrap();
        fs::write(temp.path().join("b"), "same bytes").unwrap();

        let a = digest_file(temp.path().join("a")).unwrap();
        let b = digest_file(temp.path().join("b")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_content_different_digest() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a"), "one").unwrap();
        fs::write(temp.path().join("b"), "two").unwrap();

        assert_ne!(
            digest_file(temp.path().join("a")).unwrap(),
            digest_file(temp.path().join("b")).unwrap()
        );
    }

    #[test]
    fn test_matches_single_shot_hash() {
        let temp = TempDir::new().unwrap();
        let content = vec![0x5au8; CHUNK_SIZE * 3 + 17]; // spans chunk boundaries
        fs::write(temp.path().join("big"), &content).unwrap();

        let streamed = digest_file(temp.path().join("big")).unwrap();
        let direct = Digest::new(*blake3::hash(&content).as_bytes());
        assert_eq!(streamed, direct);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(digest_file(temp.path().join("gone")).is_err());
    }
}
