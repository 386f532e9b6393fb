//! Character lookup and housekeeping.

use std::sync::Arc;

use holocron_domain::{Character, CharacterId};

use crate::infrastructure::locks::CharacterLocks;
use crate::infrastructure::ports::{CharacterRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("Character not found: {0}")]
    CharacterNotFound(String),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Container for character lookup use cases.
pub struct RosterUseCases {
    character_repo: Arc<dyn CharacterRepo>,
    locks: Arc<CharacterLocks>,
}

impl RosterUseCases {
    pub fn new(character_repo: Arc<dyn CharacterRepo>, locks: Arc<CharacterLocks>) -> Self {
        Self {
            character_repo,
            locks,
        }
    }

    /// Find a character by id, or by name when the reference is not an id.
    pub async fn resolve(&self, reference: &str) -> Result<Character, RosterError> {
        let found = match reference.parse::<CharacterId>() {
            Ok(id) => self.character_repo.get(id).await?,
            Err(_) => self.character_repo.find_by_name(reference).await?,
        };
        found.ok_or_else(|| RosterError::CharacterNotFound(reference.to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Character>, RosterError> {
        Ok(self.character_repo.list().await?)
    }

    pub async fn delete(&self, character_id: CharacterId) -> Result<(), RosterError> {
        {
            let _guard = self.locks.acquire(character_id).await;
            self.character_repo
                .delete(character_id)
                .await
                .map_err(|e| {
                    if e.is_not_found() {
                        RosterError::CharacterNotFound(character_id.to_string())
                    } else {
                        RosterError::Repo(e)
                    }
                })?;
        }
        self.locks.forget(character_id);
        tracing::info!(character_id = %character_id, "Deleted character");
        Ok(())
    }
}
