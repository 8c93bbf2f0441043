//! Release descriptor: the version plus one checksum per target.

use crate::error::{FormulaError, Result};
use crate::target::Target;

/// Environment variable holding the release version (without the leading `v`).
pub const VERSION_ENV: &str = "VER";

/// Immutable input to the renderer. Every field is guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    version: String,
    checksums: [String; 4],
}

impl ReleaseDescriptor {
    /// Build a descriptor. `checksums` are in `Target::ALL` order.
    pub fn new(version: impl Into<String>, checksums: [String; 4]) -> Result<Self> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(FormulaError::MissingInput {
                input: "version",
                env: VERSION_ENV,
            });
        }
        for t in Target::ALL {
            if checksums[t.index()].trim().is_empty() {
                return Err(missing(t));
            }
        }
        Ok(Self { version, checksums })
    }

    /// Read the descriptor from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the descriptor through `lookup` (environment variable name -> value).
    /// Unset and empty values are both reported as missing, version first.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let version = present(lookup(VERSION_ENV)).ok_or(FormulaError::MissingInput {
            input: "version",
            env: VERSION_ENV,
        })?;
        let mut checksums: [String; 4] = Default::default();
        for t in Target::ALL {
            checksums[t.index()] = present(lookup(t.env_var())).ok_or_else(|| missing(t))?;
        }
        Self::new(version, checksums)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn checksum(&self, target: Target) -> &str {
        &self.checksums[target.index()]
    }

    /// Targets whose checksum does not look like a SHA-256 hex digest.
    /// The renderer emits them verbatim regardless.
    pub fn malformed_checksums(&self) -> Vec<Target> {
        Target::ALL
            .into_iter()
            .filter(|t| !is_sha256_hex(self.checksum(*t)))
            .collect()
    }
}

fn missing(target: Target) -> FormulaError {
    FormulaError::MissingInput {
        input: target.input_name(),
        env: target.env_var(),
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn is_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        env(&[
            ("VER", "1.2.3"),
            ("SHA_MACOS_ARM64", &"a".repeat(64)),
            ("SHA_MACOS_X64", &"b".repeat(64)),
            ("SHA_LINUX_ARM64", &"c".repeat(64)),
            ("SHA_LINUX_X64", &"d".repeat(64)),
        ])
    }

    #[test]
    fn from_lookup_reads_all_fields() {
        let vars = full_env();
        let d = ReleaseDescriptor::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(d.version(), "1.2.3");
        assert_eq!(d.checksum(Target::MacosArm64), "a".repeat(64));
        assert_eq!(d.checksum(Target::MacosX64), "b".repeat(64));
        assert_eq!(d.checksum(Target::LinuxArm64), "c".repeat(64));
        assert_eq!(d.checksum(Target::LinuxX64), "d".repeat(64));
        assert!(d.malformed_checksums().is_empty());
    }

    #[test]
    fn empty_version_is_missing() {
        let mut vars = full_env();
        vars.insert("VER".into(), String::new());
        let err = ReleaseDescriptor::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        match err {
            FormulaError::MissingInput { input, env } => {
                assert_eq!(input, "version");
                assert_eq!(env, "VER");
            }
            other => panic!("expected MissingInput, got {other:?}"),
        }
    }

    #[test]
    fn each_unset_checksum_is_reported_by_name() {
        for t in Target::ALL {
            let mut vars = full_env();
            vars.remove(t.env_var());
            let err = ReleaseDescriptor::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
            match err {
                FormulaError::MissingInput { input, env } => {
                    assert_eq!(input, t.input_name());
                    assert_eq!(env, t.env_var());
                }
                other => panic!("expected MissingInput for {t}, got {other:?}"),
            }
        }
    }

    #[test]
    fn new_rejects_blank_checksum() {
        let err = ReleaseDescriptor::new(
            "1.0.0",
            ["x".into(), "  ".into(), "y".into(), "z".into()],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FormulaError::MissingInput {
                input: "checksum_macos_x64",
                ..
            }
        ));
    }

    #[test]
    fn malformed_checksums_flags_non_hex() {
        let d = ReleaseDescriptor::new(
            "1.0.0",
            [
                "a".repeat(64),
                "short".into(),
                "g".repeat(64),
                "F".repeat(64),
            ],
        )
        .unwrap();
        assert_eq!(
            d.malformed_checksums(),
            vec![Target::MacosX64, Target::LinuxArm64]
        );
    }
}
