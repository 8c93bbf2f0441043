//! CLI command handlers, one file per subcommand.

mod checksum;
mod generate;
mod render;
mod verify;

pub use checksum::run_checksum;
pub use generate::run_generate;
pub use render::run_render;
pub use verify::run_verify;
