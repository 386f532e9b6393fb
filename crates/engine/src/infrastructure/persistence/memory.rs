//! In-memory character storage for tests and throwaway sessions.

use async_trait::async_trait;
use dashmap::DashMap;
use holocron_domain::{Character, CharacterId};

use crate::infrastructure::ports::{CharacterRepo, RepoError};

#[derive(Default)]
pub struct InMemoryCharacterRepo {
    characters: DashMap<CharacterId, Character>,
}

impl InMemoryCharacterRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharacterRepo for InMemoryCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        Ok(self.characters.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        self.characters.insert(character.id(), character.clone());
        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        self.characters
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("Character", id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Character>, RepoError> {
        Ok(self
            .characters
            .iter()
            .find(|entry| entry.value().name().matches(name))
            .map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Character>, RepoError> {
        let mut characters: Vec<Character> = self
            .characters
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        characters.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));
        Ok(characters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use holocron_domain::{CharacterName, Species};

    #[tokio::test]
    async fn stores_and_deletes() {
        let repo = InMemoryCharacterRepo::new();
        let pc = Character::create(
            CharacterName::new("Hera").unwrap(),
            Species::Twilek,
            None,
            Utc::now(),
        );
        repo.save(&pc).await.unwrap();
        assert_eq!(repo.get(pc.id()).await.unwrap(), Some(pc.clone()));
        assert!(repo.find_by_name("HERA").await.unwrap().is_some());
        assert_eq!(repo.list().await.unwrap().len(), 1);

        repo.delete(pc.id()).await.unwrap();
        assert!(repo.get(pc.id()).await.unwrap().is_none());
        assert!(repo.delete(pc.id()).await.is_err());
    }
}
