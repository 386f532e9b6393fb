//! Domain entities - Core business objects with identity

mod career;
mod character;
mod skill;
mod species;

pub use career::Career;
pub use character::Character;
pub use skill::{
    find_standard_skill, standard_skills, CharacterSkill, SkillCategory, SkillDefinition,
    MAX_SKILL_RANK,
};
pub use species::Species;
