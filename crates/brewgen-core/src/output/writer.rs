//! Temp-file writer for a formula.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{FormulaError, Result};

/// Open `.part` file next to the final formula. Dropping it without
/// `finalize` closes the handle and leaves the final path untouched.
pub struct FormulaWriter {
    file: File,
    temp_path: PathBuf,
}

impl FormulaWriter {
    /// Create (or truncate) the temp file. The parent directory must exist.
    pub fn create(temp_path: &Path) -> Result<Self> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)
            .map_err(|e| FormulaError::io("create", temp_path, e))?;
        Ok(Self {
            file,
            temp_path: temp_path.to_path_buf(),
        })
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.file
            .write_all(data)
            .map_err(|e| FormulaError::io("write", &self.temp_path, e))
    }

    pub fn sync(&self) -> Result<()> {
        self.file
            .sync_all()
            .map_err(|e| FormulaError::io("sync", &self.temp_path, e))
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Close the temp file and rename it over `final_path`, replacing any existing file.
    /// The temp file is removed if the rename fails.
    pub fn finalize(self, final_path: &Path) -> Result<()> {
        let temp_path = self.temp_path;
        drop(self.file);

        std::fs::rename(&temp_path, final_path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            FormulaError::io("rename", final_path, e)
        })
    }
}
