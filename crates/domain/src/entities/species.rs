//! Species presets - base characteristics and starting XP

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Characteristics;

// Canonical order: Brawn, Agility, Intellect, Cunning, Willpower, Presence.
const HUMAN: Characteristics = Characteristics::preset(2, 2, 2, 2, 2, 2);
const BOTHAN: Characteristics = Characteristics::preset(1, 2, 2, 3, 2, 2);
const GAND: Characteristics = Characteristics::preset(2, 2, 2, 2, 3, 1);
const RODIAN: Characteristics = Characteristics::preset(2, 3, 2, 2, 1, 2);
const TRANDOSHAN: Characteristics = Characteristics::preset(3, 1, 2, 2, 2, 2);
const TWILEK: Characteristics = Characteristics::preset(1, 2, 2, 2, 2, 3);
const WOOKIEE: Characteristics = Characteristics::preset(3, 2, 2, 2, 1, 2);

/// Playable species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Human,
    Bothan,
    Droid,
    Gand,
    Rodian,
    Trandoshan,
    Twilek,
    Wookiee,
}

impl Species {
    pub const ALL: [Species; 8] = [
        Species::Human,
        Species::Bothan,
        Species::Droid,
        Species::Gand,
        Species::Rodian,
        Species::Trandoshan,
        Species::Twilek,
        Species::Wookiee,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Human => "Human",
            Self::Bothan => "Bothan",
            Self::Droid => "Droid",
            Self::Gand => "Gand",
            Self::Rodian => "Rodian",
            Self::Trandoshan => "Trandoshan",
            Self::Twilek => "Twi'lek",
            Self::Wookiee => "Wookiee",
        }
    }

    /// Starting characteristics before any XP is spent.
    pub fn base_characteristics(&self) -> Characteristics {
        match self {
            Self::Human => HUMAN,
            Self::Bothan => BOTHAN,
            Self::Droid => Characteristics::ONES,
            Self::Gand => GAND,
            Self::Rodian => RODIAN,
            Self::Trandoshan => TRANDOSHAN,
            Self::Twilek => TWILEK,
            Self::Wookiee => WOOKIEE,
        }
    }

    pub fn starting_xp(&self) -> u32 {
        match self {
            Self::Human => 110,
            Self::Droid => 175,
            Self::Trandoshan | Self::Wookiee => 90,
            Self::Bothan | Self::Gand | Self::Rodian | Self::Twilek => 100,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Species {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle: String = s
            .trim()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        Self::ALL
            .into_iter()
            .find(|species| {
                let name: String = species
                    .display_name()
                    .chars()
                    .filter(|c| c.is_alphanumeric())
                    .collect();
                name.eq_ignore_ascii_case(&needle)
            })
            .ok_or_else(|| DomainError::parse(format!("Unknown species: {}", s)))
    }
}
