//! Reading download entries back out of a formula, and checking an existing
//! formula against a release descriptor.

use std::fmt;

use crate::config::FormulaSettings;
use crate::descriptor::ReleaseDescriptor;
use crate::error::Result;
use crate::render::download_url;
use crate::target::Target;

/// One `url`/`sha256` pair and the `on_*` blocks enclosing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaEntry {
    pub os_block: Option<String>,
    pub arch_block: Option<String>,
    pub url: String,
    pub sha256: Option<String>,
}

impl FormulaEntry {
    pub fn target(&self) -> Option<Target> {
        Target::from_blocks(self.os_block.as_deref()?, self.arch_block.as_deref()?)
    }
}

/// Extract every `url "..."` line with the `sha256 "..."` that follows it in the same block.
pub fn parse_entries(text: &str) -> Vec<FormulaEntry> {
    let mut entries: Vec<FormulaEntry> = Vec::new();
    // Stack of open `do` blocks; `None` for blocks that are not `on_*`.
    let mut blocks: Vec<Option<String>> = Vec::new();
    let mut open_entry = false;

    for line in text.lines() {
        let line = line.trim();
        if let Some(head) = line.strip_suffix(" do") {
            let name = head.trim();
            blocks.push(name.starts_with("on_").then(|| name.to_string()));
            open_entry = false;
        } else if line.starts_with("class ") || line.starts_with("def ") {
            blocks.push(None);
            open_entry = false;
        } else if line == "end" {
            blocks.pop();
            open_entry = false;
        } else if let Some(url) = quoted_arg(line, "url") {
            let on: Vec<&String> = blocks.iter().flatten().collect();
            entries.push(FormulaEntry {
                os_block: on.iter().find(|b| is_os_block(b)).map(|b| b.to_string()),
                arch_block: on.iter().rev().find(|b| !is_os_block(b)).map(|b| b.to_string()),
                url,
                sha256: None,
            });
            open_entry = true;
        } else if let Some(sha) = quoted_arg(line, "sha256") {
            if open_entry {
                if let Some(entry) = entries.last_mut() {
                    entry.sha256 = Some(sha);
                }
                open_entry = false;
            }
        }
    }
    entries
}

fn is_os_block(name: &str) -> bool {
    matches!(name, "on_macos" | "on_linux")
}

/// `keyword "value"` -> `value`, with Ruby string escapes undone.
fn quoted_arg(line: &str, keyword: &str) -> Option<String> {
    let rest = line.strip_prefix(keyword)?.strip_prefix(' ')?.trim();
    let body = rest.strip_prefix('"')?.strip_suffix('"')?;
    Some(unescape(body))
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Difference between an existing formula and the expected one for a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    Version {
        expected: String,
        found: Option<String>,
    },
    MissingTarget(Target),
    Url {
        target: Target,
        expected: String,
        found: String,
    },
    Checksum {
        target: Target,
        expected: String,
        found: Option<String>,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Version { expected, found } => write!(
                f,
                "version: expected {}, found {}",
                expected,
                found.as_deref().unwrap_or("none")
            ),
            Mismatch::MissingTarget(t) => write!(f, "{}: no url entry", t),
            Mismatch::Url {
                target,
                expected,
                found,
            } => write!(f, "{}: url {} (expected {})", target, found, expected),
            Mismatch::Checksum {
                target,
                expected,
                found,
            } => write!(
                f,
                "{}: sha256 {} (expected {})",
                target,
                found.as_deref().unwrap_or("missing"),
                expected
            ),
        }
    }
}

/// Compare `text` with what `render` would produce for `descriptor`.
/// An empty result means the formula is up to date.
pub fn verify(
    settings: &FormulaSettings,
    descriptor: &ReleaseDescriptor,
    text: &str,
) -> Result<Vec<Mismatch>> {
    let mut mismatches = Vec::new();

    let found_version = text
        .lines()
        .find_map(|l| quoted_arg(l.trim(), "version"));
    if found_version.as_deref() != Some(descriptor.version()) {
        mismatches.push(Mismatch::Version {
            expected: descriptor.version().to_string(),
            found: found_version,
        });
    }

    let entries = parse_entries(text);
    for t in Target::ALL {
        let Some(entry) = entries.iter().find(|e| e.target() == Some(t)) else {
            mismatches.push(Mismatch::MissingTarget(t));
            continue;
        };
        let expected_url = download_url(settings, descriptor, t)?;
        if entry.url != expected_url {
            mismatches.push(Mismatch::Url {
                target: t,
                expected: expected_url,
                found: entry.url.clone(),
            });
        }
        let expected_sha = descriptor.checksum(t);
        if entry.sha256.as_deref() != Some(expected_sha) {
            mismatches.push(Mismatch::Checksum {
                target: t,
                expected: expected_sha.to_string(),
                found: entry.sha256.clone(),
            });
        }
    }
    Ok(mismatches)
}
