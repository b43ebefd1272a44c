// src/collector/hash.rs

//! # Hashing Utilities
//!
//! Streamed SHA-256 of executable files. Binaries can be large, so the file
//! is read in fixed-size chunks rather than loaded wholesale; the chunk
//! size comes from configuration.

use sha2::{Digest, Sha256};
use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

/// Compute and return the hex SHA-256 of a file's contents, reading
/// `chunk_size` bytes at a time.
pub fn hash_file(path: &Path, chunk_size: usize) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; chunk_size.max(1)];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn chunk_size_does_not_change_the_digest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"a short executable stand-in").unwrap();
        file.flush().unwrap();

        let expected = hex::encode(Sha256::digest(b"a short executable stand-in"));
        assert_eq!(hash_file(file.path(), 4).unwrap(), expected);
        assert_eq!(hash_file(file.path(), 4096).unwrap(), expected);
    }

    #[test]
    fn missing_file_surfaces_not_found() {
        let err = hash_file(Path::new("/nonexistent/procwatch-test"), 1024).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
