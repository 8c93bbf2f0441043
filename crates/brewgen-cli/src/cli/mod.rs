//! CLI for brewgen.

mod commands;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use brewgen_core::descriptor::VERSION_ENV;
use brewgen_core::{config, FormulaSettings, ReleaseDescriptor, Target};
use std::path::PathBuf;

use commands::{run_checksum, run_generate, run_render, run_verify};

/// Top-level CLI for the brewgen formula generator.
#[derive(Debug, Parser)]
#[command(name = "brewgen")]
#[command(about = "brewgen: render the Homebrew formula for a tagged release", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Formula settings and release inputs shared by generate/render/verify.
/// Every release value defaults from its environment variable.
#[derive(Debug, Clone, Args)]
pub struct ReleaseArgs {
    /// Formula settings file (TOML). Defaults to ~/.config/brewgen/config.toml if present.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Formula path, overriding the settings (default Formula/<name>.rb).
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Release version without the leading `v`.
    #[arg(long = "release-version", value_name = "VERSION", env = "VER", hide_env_values = true)]
    pub version: Option<String>,

    /// SHA-256 of the macOS arm64 tarball.
    #[arg(long, env = "SHA_MACOS_ARM64", hide_env_values = true)]
    pub sha_macos_arm64: Option<String>,

    /// SHA-256 of the macOS x86_64 tarball.
    #[arg(long, env = "SHA_MACOS_X64", hide_env_values = true)]
    pub sha_macos_x64: Option<String>,

    /// SHA-256 of the Linux arm64 tarball.
    #[arg(long, env = "SHA_LINUX_ARM64", hide_env_values = true)]
    pub sha_linux_arm64: Option<String>,

    /// SHA-256 of the Linux x86_64 tarball.
    #[arg(long, env = "SHA_LINUX_X64", hide_env_values = true)]
    pub sha_linux_x64: Option<String>,
}

impl ReleaseArgs {
    /// Build the release descriptor. Presence is checked by the core so a
    /// missing value is always reported as a missing input.
    pub fn descriptor(&self) -> brewgen_core::Result<ReleaseDescriptor> {
        ReleaseDescriptor::from_lookup(|name| self.lookup(name))
    }

    fn lookup(&self, name: &str) -> Option<String> {
        let value = if name == VERSION_ENV {
            &self.version
        } else if name == Target::MacosArm64.env_var() {
            &self.sha_macos_arm64
        } else if name == Target::MacosX64.env_var() {
            &self.sha_macos_x64
        } else if name == Target::LinuxArm64.env_var() {
            &self.sha_linux_arm64
        } else if name == Target::LinuxX64.env_var() {
            &self.sha_linux_x64
        } else {
            return None;
        };
        value.clone()
    }

    /// Load formula settings and apply `--output`.
    pub fn settings(&self) -> Result<FormulaSettings> {
        let mut settings =
            config::load(self.config.as_deref()).context("load formula settings")?;
        if let Some(output) = &self.output {
            settings.output = Some(output.clone());
        }
        tracing::debug!("formula settings: {:?}", settings);
        Ok(settings)
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Render the formula and write it to the output path.
    Generate {
        #[command(flatten)]
        release: ReleaseArgs,
    },

    /// Render the formula to stdout without writing anything.
    Render {
        #[command(flatten)]
        release: ReleaseArgs,
    },

    /// Check that an existing formula matches the release inputs.
    Verify {
        #[command(flatten)]
        release: ReleaseArgs,
    },

    /// Compute SHA-256 of release tarballs.
    Checksum {
        /// Paths to the tarballs.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Generate { release } => run_generate(&release)?,
            CliCommand::Render { release } => run_render(&release)?,
            CliCommand::Verify { release } => run_verify(&release)?,
            CliCommand::Checksum { paths } => run_checksum(&paths)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
