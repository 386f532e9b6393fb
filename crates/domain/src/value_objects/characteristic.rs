//! Characteristics - the six core attributes of a character
//!
//! `Characteristic` is the closed set of attribute names. `Characteristics`
//! holds one value per attribute and is addressed exhaustively by variant,
//! so there is no string-keyed field access anywhere in the rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Lowest value a characteristic may hold.
pub const MIN_CHARACTERISTIC: u8 = 1;

/// Highest value a characteristic may hold.
pub const MAX_CHARACTERISTIC: u8 = 6;

/// One of the six core attributes.
///
/// Variant order is the canonical display order and drives `Ord`.
/// Serialized as its display name; deserialized through [`FromStr`], so
/// stored data and plan files accept any case and the abbreviations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Characteristic {
    Brawn,
    Agility,
    Intellect,
    Cunning,
    Willpower,
    Presence,
}

impl Characteristic {
    /// All characteristics in canonical order.
    pub const ALL: [Characteristic; 6] = [
        Characteristic::Brawn,
        Characteristic::Agility,
        Characteristic::Intellect,
        Characteristic::Cunning,
        Characteristic::Willpower,
        Characteristic::Presence,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Brawn => "Brawn",
            Self::Agility => "Agility",
            Self::Intellect => "Intellect",
            Self::Cunning => "Cunning",
            Self::Willpower => "Willpower",
            Self::Presence => "Presence",
        }
    }

    /// Three-letter abbreviation used on printed sheets.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Brawn => "Br",
            Self::Agility => "Ag",
            Self::Intellect => "Int",
            Self::Cunning => "Cun",
            Self::Willpower => "Will",
            Self::Presence => "Pr",
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Characteristic {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| {
                c.display_name().eq_ignore_ascii_case(needle)
                    || c.abbreviation().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| DomainError::parse(format!("Unknown characteristic: {}", s)))
    }
}

impl TryFrom<String> for Characteristic {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Characteristic> for String {
    fn from(c: Characteristic) -> Self {
        c.display_name().to_string()
    }
}

/// Characteristic values for a single character.
///
/// # Invariants
///
/// - Every value lies in `[MIN_CHARACTERISTIC, MAX_CHARACTERISTIC]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CharacteristicsRecord", into = "CharacteristicsRecord")]
pub struct Characteristics {
    brawn: u8,
    agility: u8,
    intellect: u8,
    cunning: u8,
    willpower: u8,
    presence: u8,
}

impl Characteristics {
    /// Every characteristic at the floor.
    pub const ONES: Characteristics = Characteristics::preset(1, 1, 1, 1, 1, 1);

    /// Fixed values for catalog constants.
    ///
    /// Only meant for `const` items: an out-of-range value fails const
    /// evaluation, so a bad preset never builds.
    pub(crate) const fn preset(
        brawn: u8,
        agility: u8,
        intellect: u8,
        cunning: u8,
        willpower: u8,
        presence: u8,
    ) -> Self {
        let values = [brawn, agility, intellect, cunning, willpower, presence];
        let mut i = 0;
        while i < values.len() {
            assert!(
                matches!(values[i], MIN_CHARACTERISTIC..=MAX_CHARACTERISTIC),
                "characteristic preset out of range"
            );
            i += 1;
        }
        Self {
            brawn,
            agility,
            intellect,
            cunning,
            willpower,
            presence,
        }
    }

    /// Build a validated set of characteristics.
    ///
    /// Arguments follow the canonical order: Brawn, Agility, Intellect,
    /// Cunning, Willpower, Presence.
    pub fn new(
        brawn: u8,
        agility: u8,
        intellect: u8,
        cunning: u8,
        willpower: u8,
        presence: u8,
    ) -> Result<Self, DomainError> {
        let values = Self {
            brawn,
            agility,
            intellect,
            cunning,
            willpower,
            presence,
        };
        for characteristic in Characteristic::ALL {
            let value = values.get(characteristic);
            if !(MIN_CHARACTERISTIC..=MAX_CHARACTERISTIC).contains(&value) {
                return Err(DomainError::validation(format!(
                    "{} must be between {} and {}, got {}",
                    characteristic, MIN_CHARACTERISTIC, MAX_CHARACTERISTIC, value
                )));
            }
        }
        Ok(values)
    }

    /// Every characteristic set to the same value.
    pub fn uniform(value: u8) -> Result<Self, DomainError> {
        Self::new(value, value, value, value, value, value)
    }

    pub fn get(&self, characteristic: Characteristic) -> u8 {
        match characteristic {
            Characteristic::Brawn => self.brawn,
            Characteristic::Agility => self.agility,
            Characteristic::Intellect => self.intellect,
            Characteristic::Cunning => self.cunning,
            Characteristic::Willpower => self.willpower,
            Characteristic::Presence => self.presence,
        }
    }

    fn slot_mut(&mut self, characteristic: Characteristic) -> &mut u8 {
        match characteristic {
            Characteristic::Brawn => &mut self.brawn,
            Characteristic::Agility => &mut self.agility,
            Characteristic::Intellect => &mut self.intellect,
            Characteristic::Cunning => &mut self.cunning,
            Characteristic::Willpower => &mut self.willpower,
            Characteristic::Presence => &mut self.presence,
        }
    }

    /// Raise a characteristic by one. Returns false at the ceiling.
    pub(crate) fn raise(&mut self, characteristic: Characteristic) -> bool {
        let slot = self.slot_mut(characteristic);
        if *slot >= MAX_CHARACTERISTIC {
            return false;
        }
        *slot += 1;
        true
    }

    /// Lower a characteristic by one. Returns false at the floor.
    pub(crate) fn lower(&mut self, characteristic: Characteristic) -> bool {
        let slot = self.slot_mut(characteristic);
        if *slot <= MIN_CHARACTERISTIC {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Iterate `(characteristic, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Characteristic, u8)> + '_ {
        Characteristic::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// Serialized shape of [`Characteristics`]; validated on the way in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct CharacteristicsRecord {
    brawn: u8,
    agility: u8,
    intellect: u8,
    cunning: u8,
    willpower: u8,
    presence: u8,
}

impl TryFrom<CharacteristicsRecord> for Characteristics {
    type Error = DomainError;

    fn try_from(r: CharacteristicsRecord) -> Result<Self, Self::Error> {
        Self::new(
            r.brawn,
            r.agility,
            r.intellect,
            r.cunning,
            r.willpower,
            r.presence,
        )
    }
}

impl From<Characteristics> for CharacteristicsRecord {
    fn from(c: Characteristics) -> Self {
        Self {
            brawn: c.brawn,
            agility: c.agility,
            intellect: c.intellect,
            cunning: c.cunning,
            willpower: c.willpower,
            presence: c.presence,
        }
    }
}
