//! Checksum command: compute SHA-256 of release tarballs.

use anyhow::Result;
use brewgen_core::checksum;
use std::path::PathBuf;

/// Compute and print SHA-256 of each file, `sha256sum` style.
pub fn run_checksum(paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        let digest = checksum::sha256_path(path)?;
        println!("{}  {}", digest, path.display());
    }
    Ok(())
}
