//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    config::{EngineConfig, StorageBackend},
    locks::CharacterLocks,
    persistence::{InMemoryCharacterRepo, JsonFileCharacterRepo},
    ports::{CharacterRepo, ClockPort, RepoError},
};
use crate::use_cases;

/// Main application state.
///
/// Holds the character store and the use cases built on it. All use cases
/// share one lock table so their mutations serialize per character.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for repository ports.
pub struct Repositories {
    pub character: Arc<dyn CharacterRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub advancement: use_cases::AdvancementUseCases,
    pub creation: use_cases::CreationUseCases,
    pub roster: use_cases::RosterUseCases,
}

impl App {
    pub fn new(character_repo: Arc<dyn CharacterRepo>, clock: Arc<dyn ClockPort>) -> Self {
        let locks = Arc::new(CharacterLocks::new());

        let use_cases = UseCases {
            advancement: use_cases::AdvancementUseCases::new(
                character_repo.clone(),
                locks.clone(),
            ),
            creation: use_cases::CreationUseCases::new(
                character_repo.clone(),
                locks.clone(),
                clock,
            ),
            roster: use_cases::RosterUseCases::new(character_repo.clone(), locks),
        };

        Self {
            repositories: Repositories {
                character: character_repo,
            },
            use_cases,
        }
    }

    /// Build the application with the storage backend named in `config`.
    pub async fn from_config(config: &EngineConfig) -> Result<Self, RepoError> {
        let character_repo: Arc<dyn CharacterRepo> = match config.storage {
            StorageBackend::File => {
                tracing::info!(data_dir = %config.data_dir.display(), "Using JSON file storage");
                Arc::new(JsonFileCharacterRepo::open(&config.data_dir).await?)
            }
            StorageBackend::Memory => {
                tracing::info!("Using in-memory storage");
                Arc::new(InMemoryCharacterRepo::new())
            }
        };
        Ok(Self::new(character_repo, Arc::new(SystemClock::new())))
    }

    /// Application over an empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryCharacterRepo::new()),
            Arc::new(SystemClock::new()),
        )
    }
}
