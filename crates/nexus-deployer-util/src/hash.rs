use md5::Md5;
use sha1::{Digest, Sha1};
use std::io::Read;
use std::path::Path;

const CHUNK_SIZE: usize = 8192;

/// Lowercase hex MD5 and SHA-1 digests of the same content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digests {
    pub md5: String,
    pub sha1: String,
}

impl Digests {
    /// Digest an in-memory buffer.
    pub fn of_bytes(data: &[u8]) -> Self {
        Self {
            md5: md5_bytes(data),
            sha1: sha1_bytes(data),
        }
    }
}

/// Compute the MD5 hash of a byte slice, returning a lowercase hex string.
pub fn md5_bytes(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Compute the SHA-1 hash of a byte slice, returning a lowercase hex string.
pub fn sha1_bytes(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Feed a reader through MD5 and SHA-1 in fixed-size chunks.
///
/// Memory use is bounded by the chunk size regardless of input length.
pub fn digest_reader<R: Read>(mut reader: R) -> std::io::Result<Digests> {
    let mut md5 = Md5::new();
    let mut sha1 = Sha1::new();
    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        md5.update(&buffer[..n]);
        sha1.update(&buffer[..n]);
    }
    Ok(Digests {
        md5: format!("{:x}", md5.finalize()),
        sha1: format!("{:x}", sha1.finalize()),
    })
}

/// Stream a file through [`digest_reader`].
pub fn digest_file(path: &Path) -> std::io::Result<Digests> {
    let file = std::fs::File::open(path)?;
    digest_reader(file)
}
