//! SHA-256 of release tarballs, for filling in the descriptor checksums.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{FormulaError, Result};

const BUF_SIZE: usize = 64 * 1024;

/// Compute SHA-256 of a file and return the digest as lowercase hex.
/// Reads in chunks so large tarballs don't need to fit in memory.
pub fn sha256_path(path: &Path) -> Result<String> {
    let mut f = File::open(path).map_err(|e| FormulaError::io("open", path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .map_err(|e| FormulaError::io("read", path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
