//! Skills - trained capabilities keyed to a characteristic
//!
//! A character holds one [`CharacterSkill`] per skill name. The standard
//! skill list lives here as [`standard_skills`].

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Characteristic;

/// Highest rank a skill may reach.
pub const MAX_SKILL_RANK: u8 = 5;

/// A skill as held by a character.
///
/// `career` is fixed when the character is created. `base_rank` counts the
/// ranks the skill started with; only ranks above it were bought with XP
/// and can be refunded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CharacterSkillRecord", into = "CharacterSkillRecord")]
pub struct CharacterSkill {
    characteristic: Characteristic,
    rank: u8,
    base_rank: u8,
    career: bool,
}

impl CharacterSkill {
    /// A skill starting at `rank`. Starting ranks are not refundable.
    pub fn new(characteristic: Characteristic, rank: u8, career: bool) -> Result<Self, DomainError> {
        Self::with_base(characteristic, rank, rank, career)
    }

    fn with_base(
        characteristic: Characteristic,
        rank: u8,
        base_rank: u8,
        career: bool,
    ) -> Result<Self, DomainError> {
        if rank > MAX_SKILL_RANK {
            return Err(DomainError::validation(format!(
                "Skill rank must be between 0 and {}, got {}",
                MAX_SKILL_RANK, rank
            )));
        }
        if base_rank > rank {
            return Err(DomainError::validation(format!(
                "Skill base rank {} exceeds rank {}",
                base_rank, rank
            )));
        }
        Ok(Self {
            characteristic,
            rank,
            base_rank,
            career,
        })
    }

    /// An untrained skill.
    pub fn untrained(characteristic: Characteristic, career: bool) -> Self {
        Self {
            characteristic,
            rank: 0,
            base_rank: 0,
            career,
        }
    }

    #[inline]
    pub fn characteristic(&self) -> Characteristic {
        self.characteristic
    }

    #[inline]
    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Rank the skill started with, before any XP was spent on it.
    #[inline]
    pub fn base_rank(&self) -> u8 {
        self.base_rank
    }

    #[inline]
    pub fn is_career(&self) -> bool {
        self.career
    }

    pub(crate) fn raise(&mut self) -> bool {
        if self.rank >= MAX_SKILL_RANK {
            return false;
        }
        self.rank += 1;
        true
    }

    /// Lower one purchased rank. Returns false at the starting rank.
    pub(crate) fn lower(&mut self) -> bool {
        if self.rank <= self.base_rank {
            return false;
        }
        self.rank -= 1;
        true
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct CharacterSkillRecord {
    characteristic: Characteristic,
    rank: u8,
    #[serde(default)]
    base_rank: u8,
    career_skill: bool,
}

impl TryFrom<CharacterSkillRecord> for CharacterSkill {
    type Error = DomainError;

    fn try_from(r: CharacterSkillRecord) -> Result<Self, Self::Error> {
        Self::with_base(r.characteristic, r.rank, r.base_rank, r.career_skill)
    }
}

impl From<CharacterSkill> for CharacterSkillRecord {
    fn from(s: CharacterSkill) -> Self {
        Self {
            characteristic: s.characteristic,
            rank: s.rank,
            base_rank: s.base_rank,
            career_skill: s.career,
        }
    }
}

/// Skill categories for sheet grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    General,
    Combat,
    Knowledge,
}

impl SkillCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Combat => "Combat",
            Self::Knowledge => "Knowledge",
        }
    }
}

/// Catalog entry for a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillDefinition {
    pub name: &'static str,
    pub characteristic: Characteristic,
    pub category: SkillCategory,
}

const fn skill(
    name: &'static str,
    characteristic: Characteristic,
    category: SkillCategory,
) -> SkillDefinition {
    SkillDefinition {
        name,
        characteristic,
        category,
    }
}

use Characteristic::{Agility, Brawn, Cunning, Intellect, Presence, Willpower};
use SkillCategory::{Combat, General, Knowledge};

static STANDARD_SKILLS: [SkillDefinition; 33] = [
    // General skills
    skill("Astrogation", Intellect, General),
    skill("Athletics", Brawn, General),
    skill("Charm", Presence, General),
    skill("Coercion", Willpower, General),
    skill("Computers", Intellect, General),
    skill("Cool", Presence, General),
    skill("Coordination", Agility, General),
    skill("Deception", Cunning, General),
    skill("Discipline", Willpower, General),
    skill("Leadership", Presence, General),
    skill("Mechanics", Intellect, General),
    skill("Medicine", Intellect, General),
    skill("Negotiation", Presence, General),
    skill("Perception", Cunning, General),
    skill("Piloting (Planetary)", Agility, General),
    skill("Piloting (Space)", Agility, General),
    skill("Resilience", Brawn, General),
    skill("Skulduggery", Cunning, General),
    skill("Stealth", Agility, General),
    skill("Streetwise", Cunning, General),
    skill("Survival", Cunning, General),
    skill("Vigilance", Willpower, General),
    // Combat skills
    skill("Brawl", Brawn, Combat),
    skill("Gunnery", Agility, Combat),
    skill("Melee", Brawn, Combat),
    skill("Ranged (Light)", Agility, Combat),
    skill("Ranged (Heavy)", Agility, Combat),
    // Knowledge skills
    skill("Knowledge (Core Worlds)", Intellect, Knowledge),
    skill("Knowledge (Education)", Intellect, Knowledge),
    skill("Knowledge (Lore)", Intellect, Knowledge),
    skill("Knowledge (Outer Rim)", Intellect, Knowledge),
    skill("Knowledge (Underworld)", Intellect, Knowledge),
    skill("Knowledge (Xenology)", Intellect, Knowledge),
];

/// The standard skill list.
pub fn standard_skills() -> &'static [SkillDefinition] {
    &STANDARD_SKILLS
}

/// Look up a standard skill by name (case-insensitive).
pub fn find_standard_skill(name: &str) -> Option<&'static SkillDefinition> {
    let needle = name.trim();
    STANDARD_SKILLS
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(needle))
}
