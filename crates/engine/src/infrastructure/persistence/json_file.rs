//! JSON file character storage.
//!
//! One pretty-printed document per character at `<data_dir>/<id>.json`.
//! Writes go to a temp file first and are renamed into place, so a crash
//! mid-write never leaves a truncated character behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use holocron_domain::{Character, CharacterId};

use crate::infrastructure::ports::{CharacterRepo, RepoError};

const EXTENSION: &str = "json";

pub struct JsonFileCharacterRepo {
    data_dir: PathBuf,
}

impl JsonFileCharacterRepo {
    /// Open (and create if needed) a storage directory.
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self, RepoError> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .map_err(|e| RepoError::database("open", format!("{}: {}", data_dir.display(), e)))?;
        tracing::debug!(data_dir = %data_dir.display(), "Opened character storage");
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, id: CharacterId) -> PathBuf {
        self.data_dir.join(format!("{}.{}", id, EXTENSION))
    }

    async fn read_character(path: &Path) -> Result<Option<Character>, RepoError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RepoError::database("read", e)),
        };
        let character = serde_json::from_slice(&bytes)
            .map_err(|e| RepoError::serialization(format!("{}: {}", path.display(), e)))?;
        Ok(Some(character))
    }
}

#[async_trait]
impl CharacterRepo for JsonFileCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        Self::read_character(&self.path_for(id)).await
    }

    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        let path = self.path_for(character.id());
        let tmp = path.with_extension(format!("{}.tmp", EXTENSION));
        let json = serde_json::to_vec_pretty(character).map_err(RepoError::serialization)?;

        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| RepoError::database("save", e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| RepoError::database("save", e))?;

        tracing::debug!(character_id = %character.id(), path = %path.display(), "Saved character");
        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(RepoError::not_found("Character", id)),
            Err(e) => Err(RepoError::database("delete", e)),
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Character>, RepoError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|c| c.name().matches(name)))
    }

    async fn list(&self) -> Result<Vec<Character>, RepoError> {
        let mut entries = tokio::fs::read_dir(&self.data_dir)
            .await
            .map_err(|e| RepoError::database("list", e))?;

        let mut characters = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RepoError::database("list", e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(character) = Self::read_character(&path).await? {
                characters.push(character);
            }
        }
        characters.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));
        Ok(characters)
    }
}
