//! Jurisdiction codes for the supported provider set.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A jurisdiction with a registered tender provider.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Jurisdiction {
    Usa,
    Uk,
    Canada,
    Australia,
}

/// Caller passed a jurisdiction code no provider is registered for.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported jurisdiction: {0}")]
pub struct UnknownJurisdiction(pub String);

/// Code + display name pair for the supported-jurisdictions listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionInfo {
    pub code: String,
    pub display_name: String,
}

impl Jurisdiction {
    /// Every supported jurisdiction, in registry order.
    pub const ALL: &'static [Jurisdiction] =
        &[Self::Usa, Self::Uk, Self::Canada, Self::Australia];

    /// Lowercase request code ("usa", "uk", ...).
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usa => "usa",
            Self::Uk => "uk",
            Self::Canada => "canada",
            Self::Australia => "australia",
        }
    }

    /// Uppercase canonical code stored on every tender's `country` field.
    pub fn country_code(&self) -> &'static str {
        match self {
            Self::Usa => "USA",
            Self::Uk => "UK",
            Self::Canada => "CANADA",
            Self::Australia => "AUSTRALIA",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Usa => "United States",
            Self::Uk => "United Kingdom",
            Self::Canada => "Canada",
            Self::Australia => "Australia",
        }
    }

    pub fn info(&self) -> JurisdictionInfo {
        JurisdictionInfo {
            code: self.code().to_string(),
            display_name: self.display_name().to_string(),
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Jurisdiction {
    type Err = UnknownJurisdiction;

    /// Case-insensitive; accepts the request code plus common aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "usa" | "us" | "united states" => Ok(Self::Usa),
            "uk" | "gb" | "united kingdom" => Ok(Self::Uk),
            "canada" | "ca" => Ok(Self::Canada),
            "australia" | "au" => Ok(Self::Australia),
            _ => Err(UnknownJurisdiction(s.trim().to_string())),
        }
    }
}
