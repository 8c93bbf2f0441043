pub mod config;
pub mod logging;

pub mod checksum;
pub mod descriptor;
pub mod error;
pub mod output;
pub mod parse;
pub mod render;
pub mod target;

pub use config::FormulaSettings;
pub use descriptor::ReleaseDescriptor;
pub use error::{FormulaError, Result};
pub use target::Target;
