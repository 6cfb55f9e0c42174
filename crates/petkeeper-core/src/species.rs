//! Pet species and their decay profiles.

use petkeeper_common::{PetError, PetResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base per-tick decay for a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecayProfile {
    /// Hunger lost per tick before modifiers
    pub hunger: i32,
    /// Happiness lost per tick before modifiers
    pub happiness: i32,
    /// Energy lost per tick before modifiers
    pub energy: i32,
    /// Added to the health modifier when compounding damage applies
    pub health_bias: i32,
}

/// Available pet archetypes.
///
/// Written lowercase; read back case-insensitively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Species {
    /// Balanced decay
    #[default]
    Mole,
    /// Gets hungry faster, never tires
    Cat,
    /// Burns through everything, but sturdier
    Bear,
}

impl Species {
    /// All species.
    pub const ALL: [Self; 3] = [Self::Mole, Self::Cat, Self::Bear];

    /// Decay profile for this species.
    #[must_use]
    pub const fn profile(self) -> DecayProfile {
        match self {
            Self::Mole => DecayProfile {
                hunger: 1,
                happiness: 1,
                energy: 1,
                health_bias: 0,
            },
            Self::Cat => DecayProfile {
                hunger: 2,
                happiness: 1,
                energy: 0,
                health_bias: 0,
            },
            Self::Bear => DecayProfile {
                hunger: 3,
                happiness: 3,
                energy: 3,
                health_bias: -1,
            },
        }
    }

    /// Lowercase name as written to save files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mole => "mole",
            Self::Cat => "cat",
            Self::Bear => "bear",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Species {
    type Err = PetError;

    fn from_str(s: &str) -> PetResult<Self> {
        Self::ALL
            .into_iter()
            .find(|species| species.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PetError::UnknownSpecies(s.to_string()))
    }
}

impl TryFrom<String> for Species {
    type Error = PetError;

    fn try_from(value: String) -> PetResult<Self> {
        value.parse()
    }
}
