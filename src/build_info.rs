//! Build metadata
//!
//! `build.rs` stamps each compile with a build number and UTC timestamp.
//! Both arrive as environment variables and are read here.

use std::fmt;

use serde::Serialize;

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const NAME: &str = env!("CARGO_PKG_NAME");
const RAW_BUILD_NUMBER: Option<&str> = option_env!("LAM_BUILD_NUMBER");
const RAW_BUILD_TIMESTAMP: Option<&str> = option_env!("LAM_BUILD_TIMESTAMP");

/// Identity of the running binary, as reported by the status tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    /// 0 when built without `build.rs` (e.g. from a vendored source tree)
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self::from_raw(RAW_BUILD_NUMBER, RAW_BUILD_TIMESTAMP)
    }

    fn from_raw(build_number: Option<&str>, build_timestamp: Option<&'static str>) -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: build_number
                .and_then(|n| n.trim().parse().ok())
                .unwrap_or(0),
            build_timestamp: build_timestamp.unwrap_or("unknown"),
        }
    }

    /// Lines of the startup banner
    pub fn banner(&self) -> Vec<String> {
        let rule = "=".repeat(47);
        vec![
            rule.clone(),
            "  Land Area Manager (LAM)".to_string(),
            format!("  {}", self),
            "  1 acre = 8 kanal = 160 marle = 1440 sarsai".to_string(),
            rule,
        ]
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v{} build {} ({})",
            self.name, self.version, self.build_number, self.build_timestamp
        )
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    for line in BuildInfo::current().banner() {
        eprintln!("{}", line);
    }
}
