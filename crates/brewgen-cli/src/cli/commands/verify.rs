//! `brewgen verify` – compare the formula on disk with the release inputs.

use anyhow::{bail, Context, Result};
use brewgen_core::parse::verify;

use crate::cli::ReleaseArgs;

pub fn run_verify(release: &ReleaseArgs) -> Result<()> {
    let descriptor = release.descriptor()?;
    let settings = release.settings()?;
    let path = settings.output_path();
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("read {}", path.display()))?;

    let mismatches = verify(&settings, &descriptor, &text)?;
    if mismatches.is_empty() {
        println!("{} is up to date for v{}", path.display(), descriptor.version());
        return Ok(());
    }
    for m in &mismatches {
        println!("{}: {}", path.display(), m);
    }
    bail!(
        "{} does not match v{} ({} mismatches)",
        path.display(),
        descriptor.version(),
        mismatches.len()
    );
}
