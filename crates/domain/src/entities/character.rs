//! Character aggregate - characteristics, skills and the XP ledger
//!
//! # Design
//!
//! - **Private fields**: all state is reached through accessors
//! - **Valid by construction**: characteristics, skill ranks and the ledger
//!   are validated value objects
//! - **Rule-owned mutation**: only the advancement engine (same crate) may
//!   move ranks or XP; callers outside the crate get read access plus the
//!   one-way creation transition

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::career::Career;
use crate::entities::skill::{standard_skills, CharacterSkill};
use crate::entities::species::Species;
use crate::error::DomainError;
use crate::ids::CharacterId;
use crate::value_objects::{CharacterName, Characteristic, Characteristics, XpLedger};

/// A player character.
///
/// # Invariants
///
/// - characteristics lie in `[1, 6]`, skill ranks in `[0, 5]`
/// - `ledger.total == ledger.available + ledger.spent`
/// - `is_created` only ever goes from false to true
/// - refunds never lower a characteristic below `base_characteristics` or
///   a skill below its `base_rank`
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use holocron_domain::{Career, Character, CharacterName, Species};
///
/// let name = CharacterName::new("Kira Vess").unwrap();
/// let pc = Character::create(name, Species::Human, Some(Career::Smuggler), Utc::now());
///
/// assert_eq!(pc.ledger().available(), 110);
/// assert!(pc.skill("Skulduggery").unwrap().is_career());
/// assert!(!pc.is_created());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    id: CharacterId,
    name: CharacterName,
    species: Species,
    career: Option<Career>,
    characteristics: Characteristics,
    base_characteristics: Characteristics,
    skills: BTreeMap<String, CharacterSkill>,
    ledger: XpLedger,
    is_created: bool,
    created_at: DateTime<Utc>,
    #[serde(default)]
    finalized_at: Option<DateTime<Utc>>,
}

impl Character {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a character from a species preset.
    ///
    /// Every standard skill is seeded at rank 0; the career's skills are
    /// flagged as career skills. The ledger opens with the species'
    /// starting XP.
    pub fn create(
        name: CharacterName,
        species: Species,
        career: Option<Career>,
        now: DateTime<Utc>,
    ) -> Self {
        let skills = standard_skills()
            .iter()
            .map(|def| {
                let is_career = career.is_some_and(|c| c.is_career_skill(def.name));
                (
                    def.name.to_string(),
                    CharacterSkill::untrained(def.characteristic, is_career),
                )
            })
            .collect();

        Self {
            id: CharacterId::new(),
            name,
            species,
            career,
            characteristics: species.base_characteristics(),
            base_characteristics: species.base_characteristics(),
            skills,
            ledger: XpLedger::new(species.starting_xp()),
            is_created: false,
            created_at: now,
            finalized_at: None,
        }
    }

    /// Create a character with explicit characteristics and ledger and no skills.
    pub fn new(
        name: CharacterName,
        species: Species,
        characteristics: Characteristics,
        ledger: XpLedger,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            name,
            species,
            career: None,
            characteristics,
            base_characteristics: characteristics,
            skills: BTreeMap::new(),
            ledger,
            is_created: false,
            created_at: now,
            finalized_at: None,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    pub fn with_id(mut self, id: CharacterId) -> Self {
        self.id = id;
        self
    }

    pub fn with_career(mut self, career: Career) -> Self {
        self.career = Some(career);
        self
    }

    /// Add or replace a skill.
    pub fn with_skill(mut self, name: impl Into<String>, skill: CharacterSkill) -> Self {
        self.skills.insert(name.into(), skill);
        self
    }

    /// Mark creation as already finalized (hydrating stored characters).
    pub fn with_created(mut self, finalized_at: DateTime<Utc>) -> Self {
        self.is_created = true;
        self.finalized_at = Some(finalized_at);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &CharacterName {
        &self.name
    }

    #[inline]
    pub fn species(&self) -> Species {
        self.species
    }

    #[inline]
    pub fn career(&self) -> Option<Career> {
        self.career
    }

    #[inline]
    pub fn characteristics(&self) -> &Characteristics {
        &self.characteristics
    }

    /// Characteristics the character was created with. XP refunds never go below these.
    #[inline]
    pub fn base_characteristics(&self) -> &Characteristics {
        &self.base_characteristics
    }

    #[inline]
    pub fn characteristic(&self, characteristic: Characteristic) -> u8 {
        self.characteristics.get(characteristic)
    }

    pub fn skills(&self) -> &BTreeMap<String, CharacterSkill> {
        &self.skills
    }

    /// Look up a skill by name. Exact match first, then case-insensitive.
    pub fn skill(&self, name: &str) -> Option<&CharacterSkill> {
        self.skill_entry(name).map(|(_, skill)| skill)
    }

    /// Like [`Character::skill`], also returning the stored spelling of the name.
    pub fn skill_entry(&self, name: &str) -> Option<(&str, &CharacterSkill)> {
        let key = self.skill_key(name)?;
        self.skills.get_key_value(key).map(|(k, v)| (k.as_str(), v))
    }

    /// The stored spelling of a skill name, if the character has it.
    pub fn skill_key(&self, name: &str) -> Option<&str> {
        if let Some((key, _)) = self.skills.get_key_value(name) {
            return Some(key.as_str());
        }
        let needle = name.trim();
        self.skills
            .keys()
            .find(|k| k.eq_ignore_ascii_case(needle))
            .map(String::as_str)
    }

    #[inline]
    pub fn ledger(&self) -> &XpLedger {
        &self.ledger
    }

    /// True once character creation has been finalized.
    #[inline]
    pub fn is_created(&self) -> bool {
        self.is_created
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn finalized_at(&self) -> Option<DateTime<Utc>> {
        self.finalized_at
    }

    // =========================================================================
    // State Transitions
    // =========================================================================

    /// Finalize character creation. After this, characteristics can no
    /// longer be bought or refunded with XP.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` if already finalized.
    pub fn finalize_creation(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.is_created {
            return Err(DomainError::invalid_state_transition(format!(
                "Character creation for '{}' is already finalized",
                self.name
            )));
        }
        self.is_created = true;
        self.finalized_at = Some(now);
        Ok(())
    }

    // =========================================================================
    // Engine access
    // =========================================================================

    pub(crate) fn characteristics_mut(&mut self) -> &mut Characteristics {
        &mut self.characteristics
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut XpLedger {
        &mut self.ledger
    }

    pub(crate) fn skill_mut(&mut self, name: &str) -> Option<&mut CharacterSkill> {
        let key = self.skill_key(name)?.to_string();
        self.skills.get_mut(&key)
    }
}
