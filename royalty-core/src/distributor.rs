//! The distributors whose statements we know how to read.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownDistributor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributorKind {
    Fuga,
    Altafonte,
    Onerpm,
    OnerpmShareIn,
}

impl DistributorKind {
    pub const ALL: [DistributorKind; 4] = [
        DistributorKind::Fuga,
        DistributorKind::Altafonte,
        DistributorKind::Onerpm,
        DistributorKind::OnerpmShareIn,
    ];

    /// Name as the distributor brands itself.
    pub fn display_name(&self) -> &'static str {
        match self {
            DistributorKind::Fuga => "FUGA",
            DistributorKind::Altafonte => "Altafonte",
            DistributorKind::Onerpm => "ONErpm",
            DistributorKind::OnerpmShareIn => "ONErpm Share-In",
        }
    }

    /// Lowercase identifier used in file names and config keys.
    pub fn id(&self) -> &'static str {
        match self {
            DistributorKind::Fuga => "fuga",
            DistributorKind::Altafonte => "altafonte",
            DistributorKind::Onerpm => "onerpm",
            DistributorKind::OnerpmShareIn => "onerpm_share_in",
        }
    }

    /// Default percentage withheld before royalties are paid out.
    pub fn default_tax_rate_percent(&self) -> f64 {
        match self {
            DistributorKind::Fuga => 18.5,
            DistributorKind::Altafonte => 28.5,
            DistributorKind::Onerpm => 18.5,
            DistributorKind::OnerpmShareIn => 18.5,
        }
    }

    pub fn processed_file_name(&self) -> String {
        format!("{}_processed.csv", self.id())
    }
}

impl fmt::Display for DistributorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DistributorKind {
    type Err = UnknownDistributor;

    /// Accepts ids, display names, and dash/space/underscore variants in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "fuga" => Ok(DistributorKind::Fuga),
            "altafonte" => Ok(DistributorKind::Altafonte),
            "onerpm" => Ok(DistributorKind::Onerpm),
            "onerpmsharein" => Ok(DistributorKind::OnerpmShareIn),
            _ => Err(UnknownDistributor(s.to_string())),
        }
    }
}
