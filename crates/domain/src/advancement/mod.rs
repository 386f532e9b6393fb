//! XP advancement rules.
//!
//! Characteristics may be bought with XP only while a character is being
//! created; skills may be bought at any time. Costs come from fixed tables
//! keyed by the target rank (see [`costs`]).
//!
//! Every operation is a total function over a borrowed [`Character`]:
//! rule violations come back as `None` or `false` and leave the character
//! exactly as it was. [`AdvancementBlock`] explains a refusal when the
//! caller needs a message.
//!
//! [`Character`]: crate::Character

pub mod costs;
mod engine;
mod simulation;

pub use engine::{
    AdvancementBlock, AdvancementEngine, AdvancementOptions, CharacteristicOption, SkillOption,
};
pub use simulation::{AdvancementPlan, PlanTarget, SimulationResult, SimulationStep, StepOutcome};
