//! `brewgen generate` – render and write the formula.

use anyhow::Result;
use brewgen_core::output;

use crate::cli::ReleaseArgs;

pub fn run_generate(release: &ReleaseArgs) -> Result<()> {
    // Descriptor first: a missing input must not touch the output file.
    let descriptor = release.descriptor()?;
    let settings = release.settings()?;
    let path = output::generate(&settings, &descriptor)?;
    println!("Written {} for v{}", path.display(), descriptor.version());
    Ok(())
}
