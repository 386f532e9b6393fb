//! Advancement operation errors.

use holocron_domain::{AdvancementBlock, CharacterId, LedgerError};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur while spending, refunding or awarding XP.
///
/// Refusals carry the engine's [`AdvancementBlock`] when one applies so
/// callers can show more than the headline message.
#[derive(Debug, thiserror::Error)]
pub enum AdvancementError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Skill not found: {0}")]
    SkillNotFound(String),

    #[error("XP amount must be positive")]
    InvalidAmount,

    #[error("Cannot advance characteristic (insufficient XP, max value, or creation finalized)")]
    CharacteristicBlocked {
        characteristic: String,
        reason: Option<AdvancementBlock>,
    },

    #[error("Cannot advance skill (insufficient XP or max rank)")]
    SkillBlocked {
        skill: String,
        reason: Option<AdvancementBlock>,
    },

    #[error("Cannot reduce characteristic (starting value or creation finalized)")]
    CharacteristicReductionBlocked {
        characteristic: String,
        reason: Option<AdvancementBlock>,
    },

    #[error("Cannot reduce skill (starting rank or no XP to refund)")]
    SkillReductionBlocked {
        skill: String,
        reason: Option<AdvancementBlock>,
    },

    #[error("XP ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl AdvancementError {
    /// The rule that refused the operation, if this is a refusal.
    pub fn block(&self) -> Option<&AdvancementBlock> {
        match self {
            Self::CharacteristicBlocked { reason, .. }
            | Self::SkillBlocked { reason, .. }
            | Self::CharacteristicReductionBlocked { reason, .. }
            | Self::SkillReductionBlocked { reason, .. } => reason.as_ref(),
            _ => None,
        }
    }
}
