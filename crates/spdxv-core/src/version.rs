//! # SPDX Version
//!
//! The validator ships exactly one schema, for SPDX 2.2. The version is
//! checked once when a validator is built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnsupportedSpdxVersion;

/// A supported SPDX specification version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SpdxVersion {
    /// SPDX 2.2.
    #[default]
    V2_2,
}

impl SpdxVersion {
    /// All versions the validator can check.
    pub const SUPPORTED: &'static [SpdxVersion] = &[SpdxVersion::V2_2];

    /// Returns the version string, e.g. `"2.2"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V2_2 => "2.2",
        }
    }
}

impl FromStr for SpdxVersion {
    type Err = UnsupportedSpdxVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the `SPDX-2.2` spelling used in the `spdxVersion` field.
        let bare = s.trim().strip_prefix("SPDX-").unwrap_or(s.trim());
        Self::SUPPORTED
            .iter()
            .copied()
            .find(|v| v.as_str() == bare)
            .ok_or_else(|| UnsupportedSpdxVersion(s.to_string()))
    }
}

impl TryFrom<String> for SpdxVersion {
    type Error = UnsupportedSpdxVersion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SpdxVersion> for String {
    fn from(v: SpdxVersion) -> Self {
        v.as_str().to_string()
    }
}

impl fmt::Display for SpdxVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
