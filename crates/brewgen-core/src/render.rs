//! Formula rendering.
//!
//! Pure templating: the referenced tarballs are never fetched or verified.
//! Values are emitted verbatim inside Ruby double-quoted strings, escaped so
//! that `"`, `\`, line breaks and `#{` interpolation read back as written.

use std::fmt;

use crate::config::FormulaSettings;
use crate::descriptor::ReleaseDescriptor;
use crate::error::{FormulaError, Result};
use crate::target::Target;

/// Download URL for one target: `<base>/<artifact>-<version>-<suffix>.tar.gz`.
///
/// The URL must already be in the parser's normalized form: whitespace and
/// control characters are rejected, not stripped or percent-encoded.
pub fn download_url(
    settings: &FormulaSettings,
    descriptor: &ReleaseDescriptor,
    target: Target,
) -> Result<String> {
    let version = descriptor.version();
    let url = format!(
        "{}/{}-{}-{}.tar.gz",
        settings.base_url(version),
        settings.artifact(),
        version,
        settings.suffix(target)
    );
    let parsed = url::Url::parse(&url).map_err(|source| FormulaError::InvalidUrl {
        url: url.clone(),
        source: Some(source),
    })?;
    if parsed.as_str() != url {
        return Err(FormulaError::InvalidUrl { url, source: None });
    }
    Ok(url)
}

/// Render the formula text for `descriptor`. Same input, same bytes.
pub fn render(settings: &FormulaSettings, descriptor: &ReleaseDescriptor) -> Result<String> {
    let mut urls: [String; 4] = Default::default();
    for t in Target::ALL {
        urls[t.index()] = download_url(settings, descriptor, t)?;
    }
    let formula = Formula {
        class_name: settings.class_name(),
        settings,
        descriptor,
        urls,
    };
    Ok(formula.to_string())
}

/// Display adapter writing the body of a Ruby double-quoted string literal.
struct RubyStr<'a>(&'a str);

impl fmt::Display for RubyStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut chars = self.0.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '"' => f.write_str("\\\"")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                '#' if matches!(chars.peek(), Some('{' | '$' | '@')) => f.write_str("\\#")?,
                c => write!(f, "{}", c)?,
            }
        }
        Ok(())
    }
}

struct Formula<'a> {
    class_name: String,
    settings: &'a FormulaSettings,
    descriptor: &'a ReleaseDescriptor,
    urls: [String; 4],
}

impl Formula<'_> {
    fn write_os_block(&self, f: &mut fmt::Formatter<'_>, os_block: &str) -> fmt::Result {
        writeln!(f, "  {} do", os_block)?;
        for t in Target::ALL.into_iter().filter(|t| t.os_block() == os_block) {
            writeln!(f, "    {} do", t.arch_block())?;
            writeln!(f, "      url \"{}\"", RubyStr(&self.urls[t.index()]))?;
            writeln!(f, "      sha256 \"{}\"", RubyStr(self.descriptor.checksum(t)))?;
            writeln!(f, "    end")?;
        }
        writeln!(f, "  end")
    }
}

impl fmt::Display for Formula<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.settings;
        let bin = RubyStr(s.binary());

        writeln!(f, "class {} < Formula", self.class_name)?;
        writeln!(f, "  desc \"{}\"", RubyStr(&s.desc))?;
        writeln!(f, "  homepage \"{}\"", RubyStr(&s.homepage))?;
        writeln!(f, "  version \"{}\"", RubyStr(self.descriptor.version()))?;
        writeln!(f, "  license \"{}\"", RubyStr(&s.license))?;
        writeln!(f)?;
        self.write_os_block(f, "on_macos")?;
        writeln!(f)?;
        self.write_os_block(f, "on_linux")?;
        writeln!(f)?;
        writeln!(f, "  def install")?;
        writeln!(f, "    bin.install \"{}\"", bin)?;
        writeln!(f, "  end")?;
        writeln!(f)?;
        writeln!(f, "  test do")?;
        writeln!(
            f,
            "    assert_match \"{}\", shell_output(\"#{{bin}}/{} --version\")",
            bin, bin
        )?;
        writeln!(f, "  end")?;
        writeln!(f, "end")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ReleaseDescriptor {
        ReleaseDescriptor::new(
            "1.2.3",
            [
                "a".repeat(64),
                "b".repeat(64),
                "c".repeat(64),
                "d".repeat(64),
            ],
        )
        .unwrap()
    }

    const EXPECTED: &str = r##"class A3s < Formula
  desc "Local development orchestration tool for the A3S monorepo"
  homepage "https://github.com/A3S-Lab/Dev"
  version "1.2.3"
  license "MIT"

  on_macos do
    on_arm do
      url "https://github.com/A3S-Lab/Dev/releases/download/v1.2.3/a3s-1.2.3-darwin-arm64.tar.gz"
      sha256 "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
    end
    on_intel do
      url "https://github.com/A3S-Lab/Dev/releases/download/v1.2.3/a3s-1.2.3-darwin-x86_64.tar.gz"
      sha256 "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"
    end
  end

  on_linux do
    on_arm do
      url "https://github.com/A3S-Lab/Dev/releases/download/v1.2.3/a3s-1.2.3-linux-arm64-musl.tar.gz"
      sha256 "cccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccc"
    end
    on_intel do
      url "https://github.com/A3S-Lab/Dev/releases/download/v1.2.3/a3s-1.2.3-linux-x86_64-musl.tar.gz"
      sha256 "dddddddddddddddddddddddddddddddddddddddddddddddddddddddddddddddd"
    end
  end

  def install
    bin.install "a3s"
  end

  test do
    assert_match "a3s", shell_output("#{bin}/a3s --version")
  end
end
"##;

    #[test]
    fn render_default_formula() {
        let text = render(&FormulaSettings::default(), &descriptor()).unwrap();
        assert_eq!(text, EXPECTED);
    }

    #[test]
    fn render_is_deterministic() {
        let s = FormulaSettings::default();
        let d = descriptor();
        assert_eq!(render(&s, &d).unwrap(), render(&s, &d).unwrap());
    }

    #[test]
    fn render_has_four_tarballs_and_four_checksums() {
        let text = render(&FormulaSettings::default(), &descriptor()).unwrap();
        assert_eq!(text.matches(".tar.gz").count(), 4);
        assert_eq!(text.matches("sha256 \"").count(), 4);
    }

    #[test]
    fn checksum_follows_its_url() {
        let text = render(&FormulaSettings::default(), &descriptor()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        let i = lines
            .iter()
            .position(|l| l.contains("/v1.2.3/a3s-1.2.3-darwin-arm64.tar.gz"))
            .unwrap();
        assert_eq!(lines[i + 1].trim(), format!("sha256 \"{}\"", "a".repeat(64)));
    }

    #[test]
    fn render_uses_custom_settings() {
        let settings = FormulaSettings {
            name: "my-tool".into(),
            binary: Some("mt".into()),
            base_url: Some("https://dl.example.com/{version}".into()),
            ..FormulaSettings::default()
        };
        let text = render(&settings, &descriptor()).unwrap();
        assert!(text.starts_with("class MyTool < Formula\n"));
        assert!(text.contains("url \"https://dl.example.com/1.2.3/my-tool-1.2.3-linux-arm64-musl.tar.gz\""));
        assert!(text.contains("bin.install \"mt\""));
        assert!(text.contains("shell_output(\"#{bin}/mt --version\")"));
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let settings = FormulaSettings {
            base_url: Some("not a url/{version}".into()),
            ..FormulaSettings::default()
        };
        let err = render(&settings, &descriptor()).unwrap_err();
        assert!(matches!(err, FormulaError::InvalidUrl { .. }));
    }

    fn descriptor_with_version(version: &str) -> ReleaseDescriptor {
        ReleaseDescriptor::new(
            version,
            [
                "a".repeat(64),
                "b".repeat(64),
                "c".repeat(64),
                "d".repeat(64),
            ],
        )
        .unwrap()
    }

    #[test]
    fn version_with_trailing_newline_is_rejected() {
        let d = descriptor_with_version("1.2.3\n");
        let err = render(&FormulaSettings::default(), &d).unwrap_err();
        match err {
            FormulaError::InvalidUrl { url, source } => {
                assert!(url.contains("v1.2.3\n/"));
                assert!(source.is_none());
            }
            other => panic!("expected InvalidUrl, got {other:?}"),
        }
    }

    #[test]
    fn version_with_space_is_rejected() {
        let d = descriptor_with_version("1.2 3");
        let err = download_url(&FormulaSettings::default(), &d, Target::MacosArm64).unwrap_err();
        assert!(matches!(err, FormulaError::InvalidUrl { source: None, .. }));
    }

    #[test]
    fn ruby_string_values_are_escaped() {
        let settings = FormulaSettings {
            desc: "Says \"hi\" to #{ENV} and C:\\tmp".into(),
            binary: Some("a#{x}".into()),
            ..FormulaSettings::default()
        };
        let text = render(&settings, &descriptor()).unwrap();
        assert!(text.contains(r##"  desc "Says \"hi\" to \#{ENV} and C:\\tmp""##));
        assert!(text.contains(r##"    bin.install "a\#{x}""##));
        assert!(text.contains(r##"shell_output("#{bin}/a\#{x} --version")"##));
    }

    #[test]
    fn plain_hash_is_not_escaped() {
        let settings = FormulaSettings {
            desc: "Tool #1".into(),
            ..FormulaSettings::default()
        };
        let text = render(&settings, &descriptor()).unwrap();
        assert!(text.contains("  desc \"Tool #1\""));
    }
}
