//! `brewgen render` – print the formula to stdout.

use anyhow::Result;
use brewgen_core::render::render;

use crate::cli::ReleaseArgs;

pub fn run_render(release: &ReleaseArgs) -> Result<()> {
    let descriptor = release.descriptor()?;
    let settings = release.settings()?;
    print!("{}", render(&settings, &descriptor)?);
    Ok(())
}
