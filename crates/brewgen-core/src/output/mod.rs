//! Formula output: write to `<path>.part`, sync, then rename over `<path>`.
//!
//! No directories are created; a missing parent is an I/O error.

mod writer;

pub use writer::FormulaWriter;

use std::path::{Path, PathBuf};

use crate::config::FormulaSettings;
use crate::descriptor::ReleaseDescriptor;
use crate::error::Result;
use crate::render::render;

/// Temporary file suffix used before the rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a3s.rb` → `a3s.rb.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Write `text` to `path`, replacing whatever was there.
pub fn write_formula(path: &Path, text: &str) -> Result<()> {
    let tp = temp_path(path);
    let mut writer = FormulaWriter::create(&tp)?;
    if let Err(e) = writer.write_all(text.as_bytes()).and_then(|_| writer.sync()) {
        drop(writer);
        let _ = std::fs::remove_file(&tp);
        return Err(e);
    }
    writer.finalize(path)
}

/// Render the formula for `descriptor` and write it to the configured output path.
/// Returns the path written.
pub fn generate(settings: &FormulaSettings, descriptor: &ReleaseDescriptor) -> Result<PathBuf> {
    for t in descriptor.malformed_checksums() {
        tracing::warn!(
            target_name = %t,
            checksum = descriptor.checksum(t),
            "checksum is not a 64-character hex digest; writing it verbatim"
        );
    }
    let text = render(settings, descriptor)?;
    let path = settings.output_path();
    write_formula(&path, &text)?;
    tracing::info!(
        path = %path.display(),
        version = descriptor.version(),
        bytes = text.len(),
        "formula written"
    );
    Ok(path)
}
