//! Character creation use cases.
//!
//! A character starts in the creation phase with species characteristics
//! and starting XP. Finalizing it locks characteristics for good.

mod error;

pub use error::CreationError;

use std::sync::Arc;

use holocron_domain::{Career, Character, CharacterId, CharacterName, Species};

use crate::infrastructure::locks::CharacterLocks;
use crate::infrastructure::ports::{CharacterRepo, ClockPort};

/// Container for character creation use cases.
pub struct CreationUseCases {
    character_repo: Arc<dyn CharacterRepo>,
    locks: Arc<CharacterLocks>,
    clock: Arc<dyn ClockPort>,
}

impl CreationUseCases {
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        locks: Arc<CharacterLocks>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            character_repo,
            locks,
            clock,
        }
    }

    /// Create a new character in the creation phase.
    ///
    /// Names are unique (case-insensitively) because the command line
    /// addresses characters by name. The name lock is held from the
    /// duplicate check until the save.
    pub async fn create(
        &self,
        name: &str,
        species: Species,
        career: Option<Career>,
    ) -> Result<Character, CreationError> {
        let name = CharacterName::new(name)?;
        let _guard = self.locks.acquire_name(name.as_str()).await;
        if self
            .character_repo
            .find_by_name(name.as_str())
            .await?
            .is_some()
        {
            return Err(CreationError::NameTaken(name.to_string()));
        }

        let character = Character::create(name, species, career, self.clock.now());
        self.character_repo.save(&character).await?;

        tracing::info!(
            character_id = %character.id(),
            name = %character.name(),
            species = %species,
            career = ?career.map(|c| c.display_name()),
            starting_xp = character.ledger().total(),
            "Created character"
        );
        Ok(character)
    }

    /// Leave the creation phase. Characteristics can no longer change.
    pub async fn finalize(&self, character_id: CharacterId) -> Result<Character, CreationError> {
        let _guard = self.locks.acquire(character_id).await;
        let mut character = self
            .character_repo
            .get(character_id)
            .await?
            .ok_or(CreationError::CharacterNotFound(character_id))?;

        if character.is_created() {
            return Err(CreationError::AlreadyFinalized(character_id));
        }
        character.finalize_creation(self.clock.now())?;
        self.character_repo.save(&character).await?;

        tracing::info!(
            character_id = %character_id,
            available_xp = character.ledger().available(),
            "Finalized character creation"
        );
        Ok(character)
    }
}
