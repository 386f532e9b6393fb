//! Careers - each grants a fixed set of career skills

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Career {
    BountyHunter,
    Colonist,
    Explorer,
    HiredGun,
    Smuggler,
    Technician,
}

impl Career {
    pub const ALL: [Career; 6] = [
        Career::BountyHunter,
        Career::Colonist,
        Career::Explorer,
        Career::HiredGun,
        Career::Smuggler,
        Career::Technician,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BountyHunter => "Bounty Hunter",
            Self::Colonist => "Colonist",
            Self::Explorer => "Explorer",
            Self::HiredGun => "Hired Gun",
            Self::Smuggler => "Smuggler",
            Self::Technician => "Technician",
        }
    }

    /// Names of the skills this career treats as career skills.
    pub fn career_skills(&self) -> &'static [&'static str] {
        match self {
            Self::BountyHunter => &[
                "Athletics",
                "Brawl",
                "Perception",
                "Piloting (Planetary)",
                "Piloting (Space)",
                "Ranged (Heavy)",
                "Streetwise",
                "Vigilance",
            ],
            Self::Colonist => &[
                "Charm",
                "Deception",
                "Knowledge (Core Worlds)",
                "Knowledge (Education)",
                "Knowledge (Lore)",
                "Leadership",
                "Negotiation",
                "Streetwise",
            ],
            Self::Explorer => &[
                "Astrogation",
                "Cool",
                "Knowledge (Lore)",
                "Knowledge (Outer Rim)",
                "Knowledge (Xenology)",
                "Perception",
                "Piloting (Space)",
                "Survival",
            ],
            Self::HiredGun => &[
                "Athletics",
                "Brawl",
                "Discipline",
                "Melee",
                "Piloting (Planetary)",
                "Ranged (Light)",
                "Resilience",
                "Vigilance",
            ],
            Self::Smuggler => &[
                "Coordination",
                "Deception",
                "Knowledge (Underworld)",
                "Perception",
                "Piloting (Space)",
                "Skulduggery",
                "Streetwise",
                "Vigilance",
            ],
            Self::Technician => &[
                "Astrogation",
                "Computers",
                "Coordination",
                "Discipline",
                "Knowledge (Outer Rim)",
                "Mechanics",
                "Perception",
                "Piloting (Planetary)",
            ],
        }
    }

    pub fn is_career_skill(&self, skill_name: &str) -> bool {
        self.career_skills()
            .iter()
            .any(|s| s.eq_ignore_ascii_case(skill_name.trim()))
    }
}

impl fmt::Display for Career {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Career {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        Self::ALL
            .into_iter()
            .find(|career| {
                let name: String = career
                    .display_name()
                    .chars()
                    .filter(|c| c.is_alphanumeric())
                    .collect();
                name.eq_ignore_ascii_case(&needle)
            })
            .ok_or_else(|| DomainError::parse(format!("Unknown career: {}", s)))
    }
}
