//! Release Channel
//!
//! Distinguishes snapshot builds from releases by their version string.

use std::fmt;

const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Release channel of a build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseChannel {
    Snapshots,
    Releases,
}

impl ReleaseChannel {
    /// Snapshot iff the version ends with `-SNAPSHOT`.
    pub fn for_version(version: &str) -> Self {
        if version.ends_with(SNAPSHOT_SUFFIX) {
            ReleaseChannel::Snapshots
        } else {
            ReleaseChannel::Releases
        }
    }

    /// Channel of the running crate
    pub fn current() -> Self {
        Self::for_version(env!("CARGO_PKG_VERSION"))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseChannel::Snapshots => "snapshots",
            ReleaseChannel::Releases => "releases",
        }
    }
}

impl fmt::Display for ReleaseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("1.0.0-SNAPSHOT", ReleaseChannel::Snapshots ; "snapshot suffix")]
    #[test_case("1.0.0", ReleaseChannel::Releases ; "plain release")]
    #[test_case("1.0.0-snapshot", ReleaseChannel::Releases ; "suffix is case sensitive")]
    #[test_case("1.0.0-SNAPSHOT.1", ReleaseChannel::Releases ; "suffix must be last")]
    fn test_for_version(version: &str, expected: ReleaseChannel) {
        assert_eq!(ReleaseChannel::for_version(version), expected);
    }
}
