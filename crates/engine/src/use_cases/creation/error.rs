//! Character creation errors.

use holocron_domain::{CharacterId, DomainError};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur while creating or finalizing a character.
#[derive(Debug, thiserror::Error)]
pub enum CreationError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("A character named '{0}' already exists")]
    NameTaken(String),

    #[error("Character creation already finalized: {0}")]
    AlreadyFinalized(CharacterId),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
