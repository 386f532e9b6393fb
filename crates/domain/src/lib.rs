pub mod advancement;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use advancement::{
    AdvancementBlock, AdvancementEngine, AdvancementOptions, AdvancementPlan,
    CharacteristicOption, PlanTarget, SimulationResult, SimulationStep, SkillOption, StepOutcome,
};

pub use entities::{
    find_standard_skill, standard_skills, Career, Character, CharacterSkill, SkillCategory,
    SkillDefinition, Species, MAX_SKILL_RANK,
};

pub use error::DomainError;

pub use ids::CharacterId;

pub use value_objects::{
    CharacterName, Characteristic, Characteristics, LedgerError, XpLedger, XpTransaction,
    XpTransactionKind, MAX_CHARACTERISTIC, MIN_CHARACTERISTIC,
};
