use std::fmt;

const UNKNOWN: &str = "unknown";

/// How the running `bank_analyzer` binary was built, as recorded by `build.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub tree: &'static str,
    pub built_at: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildInfo {
    /// Commit the binary was built from, suffixed with `-dirty` for uncommitted changes.
    pub fn revision(&self) -> String {
        if self.tree == "dirty" {
            format!("{}-dirty", self.commit)
        } else {
            self.commit.to_string()
        }
    }
}

/// `--version` output: one headline, then the toolchain on its own line.
impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "bank_analyzer {} ({}, {} {}, built {})",
            self.version,
            self.revision(),
            self.target,
            self.profile,
            self.built_at
        )?;
        f.write_str(self.rustc)
    }
}

pub fn current() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        commit: option_env!("BANK_ANALYZER_BUILD_HASH").unwrap_or(UNKNOWN),
        tree: option_env!("BANK_ANALYZER_BUILD_STATUS").unwrap_or(UNKNOWN),
        built_at: option_env!("BANK_ANALYZER_BUILD_TIMESTAMP").unwrap_or(UNKNOWN),
        target: option_env!("BANK_ANALYZER_BUILD_TARGET").unwrap_or(UNKNOWN),
        profile: option_env!("BANK_ANALYZER_BUILD_PROFILE").unwrap_or(UNKNOWN),
        rustc: option_env!("BANK_ANALYZER_BUILD_RUSTC").unwrap_or(UNKNOWN),
    }
}
