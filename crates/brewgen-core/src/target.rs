//! Release targets: one prebuilt tarball per OS/architecture pair.

use std::fmt;

/// OS/architecture pair a release tarball is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    MacosArm64,
    MacosX64,
    LinuxArm64,
    LinuxX64,
}

impl Target {
    /// All targets in the order they appear in a rendered formula.
    pub const ALL: [Target; 4] = [
        Target::MacosArm64,
        Target::MacosX64,
        Target::LinuxArm64,
        Target::LinuxX64,
    ];

    /// Homebrew OS block (`on_macos` / `on_linux`).
    pub fn os_block(self) -> &'static str {
        match self {
            Target::MacosArm64 | Target::MacosX64 => "on_macos",
            Target::LinuxArm64 | Target::LinuxX64 => "on_linux",
        }
    }

    /// Homebrew CPU block (`on_arm` / `on_intel`).
    pub fn arch_block(self) -> &'static str {
        match self {
            Target::MacosArm64 | Target::LinuxArm64 => "on_arm",
            Target::MacosX64 | Target::LinuxX64 => "on_intel",
        }
    }

    /// Tarball suffix used by the release workflow, e.g. `linux-x86_64-musl`.
    pub fn default_suffix(self) -> &'static str {
        match self {
            Target::MacosArm64 => "darwin-arm64",
            Target::MacosX64 => "darwin-x86_64",
            Target::LinuxArm64 => "linux-arm64-musl",
            Target::LinuxX64 => "linux-x86_64-musl",
        }
    }

    /// Name of the descriptor input carrying this target's checksum.
    pub fn input_name(self) -> &'static str {
        match self {
            Target::MacosArm64 => "checksum_macos_arm64",
            Target::MacosX64 => "checksum_macos_x64",
            Target::LinuxArm64 => "checksum_linux_arm64",
            Target::LinuxX64 => "checksum_linux_x64",
        }
    }

    /// Environment variable the checksum is read from.
    pub fn env_var(self) -> &'static str {
        match self {
            Target::MacosArm64 => "SHA_MACOS_ARM64",
            Target::MacosX64 => "SHA_MACOS_X64",
            Target::LinuxArm64 => "SHA_LINUX_ARM64",
            Target::LinuxX64 => "SHA_LINUX_X64",
        }
    }

    /// Target for an `(os block, arch block)` pair found in a formula.
    pub fn from_blocks(os_block: &str, arch_block: &str) -> Option<Target> {
        Target::ALL
            .into_iter()
            .find(|t| t.os_block() == os_block && t.arch_block() == arch_block)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_suffix())
    }
}
