//! Per-character serialization of read-modify-write sequences, plus a
//! per-name lock so two creations cannot claim the same name.

use std::sync::Arc;

use dashmap::DashMap;
use holocron_domain::CharacterId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per character id.
///
/// Mutations on different characters proceed in parallel; mutations on the
/// same character queue behind each other for the whole load, change and
/// save sequence.
#[derive(Default)]
pub struct CharacterLocks {
    locks: DashMap<CharacterId, Arc<Mutex<()>>>,
    names: DashMap<String, Arc<Mutex<()>>>,
}

impl CharacterLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a character.
    pub async fn acquire(&self, id: CharacterId) -> OwnedMutexGuard<()> {
        // Clone the Arc out so the shard guard is dropped before awaiting.
        let lock = self.locks.entry(id).or_default().value().clone();
        lock.lock_owned().await
    }

    /// Wait for exclusive access to a character name.
    ///
    /// Names are compared case-insensitively, so "Han" and "han" share a lock.
    pub async fn acquire_name(&self, name: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .names
            .entry(name.to_lowercase())
            .or_default()
            .value()
            .clone();
        lock.lock_owned().await
    }

    /// Drop the lock entry for a deleted character.
    pub fn forget(&self, id: CharacterId) {
        self.locks.remove(&id);
    }
}
