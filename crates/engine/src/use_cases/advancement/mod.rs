//! XP advancement use cases.
//!
//! Each mutation is a load, engine call and save performed while holding
//! the character's lock, so concurrent requests against one character are
//! applied one after another and never overwrite each other.

mod error;

pub use error::AdvancementError;

use std::sync::Arc;

use holocron_domain::{
    AdvancementEngine, AdvancementOptions, AdvancementPlan, Character, CharacterId,
    Characteristic, SimulationResult, XpLedger,
};
use serde::Serialize;

use crate::infrastructure::locks::CharacterLocks;
use crate::infrastructure::ports::CharacterRepo;

// =============================================================================
// Result Types
// =============================================================================

/// Outcome of a single purchase or refund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvancementResult {
    pub character_id: CharacterId,
    /// Characteristic or skill name as stored on the character.
    pub target: String,
    pub from: u8,
    pub to: u8,
    /// XP spent by a purchase, or returned by a refund.
    pub xp: u32,
    pub ledger: XpLedger,
}

// =============================================================================
// Use Cases
// =============================================================================

/// Container for XP advancement use cases.
pub struct AdvancementUseCases {
    character_repo: Arc<dyn CharacterRepo>,
    locks: Arc<CharacterLocks>,
    engine: AdvancementEngine,
}

impl AdvancementUseCases {
    pub fn new(character_repo: Arc<dyn CharacterRepo>, locks: Arc<CharacterLocks>) -> Self {
        Self {
            character_repo,
            locks,
            engine: AdvancementEngine::new(),
        }
    }

    /// Grant XP to a character. Zero is rejected.
    pub async fn award_xp(
        &self,
        character_id: CharacterId,
        amount: u32,
        reason: &str,
    ) -> Result<XpLedger, AdvancementError> {
        if amount == 0 {
            return Err(AdvancementError::InvalidAmount);
        }

        let _guard = self.locks.acquire(character_id).await;
        let mut character = self.load(character_id).await?;

        self.engine.award_xp(&mut character, amount, reason)?;
        self.character_repo.save(&character).await?;

        tracing::info!(
            character_id = %character_id,
            amount,
            reason = %reason,
            available_xp = character.ledger().available(),
            "Awarded XP"
        );
        Ok(character.ledger().clone())
    }

    /// Buy one point of a characteristic (creation phase only).
    pub async fn advance_characteristic(
        &self,
        character_id: CharacterId,
        characteristic: Characteristic,
    ) -> Result<AdvancementResult, AdvancementError> {
        let _guard = self.locks.acquire(character_id).await;
        let mut character = self.load(character_id).await?;

        let from = character.characteristic(characteristic);
        let cost = self
            .engine
            .calculate_characteristic_cost(&character, characteristic);

        if !self
            .engine
            .advance_characteristic(&mut character, characteristic)
        {
            let reason = self.engine.characteristic_block(&character, characteristic);
            tracing::warn!(
                character_id = %character_id,
                characteristic = %characteristic,
                reason = ?reason,
                "Characteristic advancement refused"
            );
            return Err(AdvancementError::CharacteristicBlocked {
                characteristic: characteristic.to_string(),
                reason,
            });
        }

        self.character_repo.save(&character).await?;
        let xp = cost.unwrap_or_default();
        tracing::info!(
            character_id = %character_id,
            characteristic = %characteristic,
            from,
            to = from + 1,
            cost = xp,
            "Advanced characteristic"
        );

        Ok(AdvancementResult {
            character_id,
            target: characteristic.to_string(),
            from,
            to: from + 1,
            xp,
            ledger: character.ledger().clone(),
        })
    }

    /// Buy one rank of a skill.
    pub async fn advance_skill(
        &self,
        character_id: CharacterId,
        skill_name: &str,
    ) -> Result<AdvancementResult, AdvancementError> {
        let _guard = self.locks.acquire(character_id).await;
        let mut character = self.load(character_id).await?;

        let (key, from) = skill_rank(&character, skill_name)?;
        let cost = self.engine.calculate_skill_cost(&character, &key);

        if !self.engine.advance_skill(&mut character, &key) {
            let reason = self.engine.skill_block(&character, &key);
            tracing::warn!(
                character_id = %character_id,
                skill = %key,
                reason = ?reason,
                "Skill advancement refused"
            );
            return Err(AdvancementError::SkillBlocked { skill: key, reason });
        }

        self.character_repo.save(&character).await?;
        let xp = cost.unwrap_or_default();
        tracing::info!(
            character_id = %character_id,
            skill = %key,
            from,
            to = from + 1,
            cost = xp,
            "Advanced skill"
        );

        Ok(AdvancementResult {
            character_id,
            target: key,
            from,
            to: from + 1,
            xp,
            ledger: character.ledger().clone(),
        })
    }

    /// Lower a characteristic by one and refund its cost (creation phase only).
    pub async fn reduce_characteristic(
        &self,
        character_id: CharacterId,
        characteristic: Characteristic,
    ) -> Result<AdvancementResult, AdvancementError> {
        let _guard = self.locks.acquire(character_id).await;
        let mut character = self.load(character_id).await?;

        let from = character.characteristic(characteristic);
        let Some(refund) = self
            .engine
            .reduce_characteristic(&mut character, characteristic)
        else {
            let reason = self
                .engine
                .characteristic_reduction_block(&character, characteristic);
            tracing::warn!(
                character_id = %character_id,
                characteristic = %characteristic,
                reason = ?reason,
                "Characteristic reduction refused"
            );
            return Err(AdvancementError::CharacteristicReductionBlocked {
                characteristic: characteristic.to_string(),
                reason,
            });
        };

        self.character_repo.save(&character).await?;
        tracing::info!(
            character_id = %character_id,
            characteristic = %characteristic,
            from,
            to = from - 1,
            refund,
            "Reduced characteristic"
        );

        Ok(AdvancementResult {
            character_id,
            target: characteristic.to_string(),
            from,
            to: from - 1,
            xp: refund,
            ledger: character.ledger().clone(),
        })
    }

    /// Lower a skill by one rank and refund its cost.
    pub async fn reduce_skill(
        &self,
        character_id: CharacterId,
        skill_name: &str,
    ) -> Result<AdvancementResult, AdvancementError> {
        let _guard = self.locks.acquire(character_id).await;
        let mut character = self.load(character_id).await?;

        let (key, from) = skill_rank(&character, skill_name)?;
        let Some(refund) = self.engine.reduce_skill(&mut character, &key) else {
            let reason = self.engine.skill_reduction_block(&character, &key);
            tracing::warn!(
                character_id = %character_id,
                skill = %key,
                reason = ?reason,
                "Skill reduction refused"
            );
            return Err(AdvancementError::SkillReductionBlocked { skill: key, reason });
        };

        self.character_repo.save(&character).await?;
        tracing::info!(
            character_id = %character_id,
            skill = %key,
            from,
            to = from - 1,
            refund,
            "Reduced skill"
        );

        Ok(AdvancementResult {
            character_id,
            target: key,
            from,
            to: from - 1,
            xp: refund,
            ledger: character.ledger().clone(),
        })
    }

    /// Everything the character can afford right now.
    pub async fn options(
        &self,
        character_id: CharacterId,
    ) -> Result<AdvancementOptions, AdvancementError> {
        let character = self.load(character_id).await?;
        Ok(self.engine.get_advancement_options(&character))
    }

    /// Price a batch plan without changing the character.
    pub async fn simulate(
        &self,
        character_id: CharacterId,
        plan: &AdvancementPlan,
    ) -> Result<SimulationResult, AdvancementError> {
        let character = self.load(character_id).await?;
        let result = self.engine.simulate_advancement(&character, plan);
        tracing::debug!(
            character_id = %character_id,
            valid = result.valid,
            total_cost = result.total_cost,
            remaining_xp = result.remaining_xp,
            "Simulated advancement plan"
        );
        Ok(result)
    }

    async fn load(&self, character_id: CharacterId) -> Result<Character, AdvancementError> {
        self.character_repo
            .get(character_id)
            .await?
            .ok_or(AdvancementError::CharacterNotFound(character_id))
    }
}

/// Resolve a skill name to its stored key and current rank.
fn skill_rank(character: &Character, skill_name: &str) -> Result<(String, u8), AdvancementError> {
    let skill = character
        .skill(skill_name)
        .ok_or_else(|| AdvancementError::SkillNotFound(skill_name.to_string()))?;
    let key = character.skill_key(skill_name).unwrap_or(skill_name);
    Ok((key.to_string(), skill.rank()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use holocron_domain::{AdvancementBlock, CharacterName, Characteristics, CharacterSkill, Species};

    use crate::infrastructure::persistence::InMemoryCharacterRepo;
    use crate::infrastructure::ports::{MockCharacterRepo, RepoError};

    fn human(available: u32) -> Character {
        Character::new(
            CharacterName::new("Han").unwrap(),
            Species::Human,
            Characteristics::uniform(2).unwrap(),
            XpLedger::new(available),
            Utc::now(),
        )
        .with_skill("Athletics", CharacterSkill::untrained(Characteristic::Brawn, true))
        .with_skill("Stealth", CharacterSkill::untrained(Characteristic::Agility, false))
    }

    fn repo_returning(character: Character) -> MockCharacterRepo {
        let mut repo = MockCharacterRepo::new();
        let id = character.id();
        repo.expect_get()
            .withf(move |got| *got == id)
            .returning(move |_| Ok(Some(character.clone())));
        repo
    }

    fn use_cases(repo: MockCharacterRepo) -> AdvancementUseCases {
        AdvancementUseCases::new(Arc::new(repo), Arc::new(CharacterLocks::new()))
    }

    #[tokio::test]
    async fn advance_characteristic_spends_and_saves() {
        let pc = human(110);
        let id = pc.id();
        let mut repo = repo_returning(pc);
        repo.expect_save()
            .withf(|c| {
                c.characteristic(Characteristic::Brawn) == 3
                    && c.ledger().available() == 80
                    && c.ledger().spent() == 30
            })
            .times(1)
            .returning(|_| Ok(()));

        let result = use_cases(repo)
            .advance_characteristic(id, Characteristic::Brawn)
            .await
            .unwrap();
        assert_eq!(result.target, "Brawn");
        assert_eq!((result.from, result.to, result.xp), (2, 3, 30));
        assert_eq!(result.ledger.available(), 80);
    }

    #[tokio::test]
    async fn finalized_character_cannot_advance_characteristic() {
        let pc = human(110).with_created(Utc::now());
        let id = pc.id();
        let mut repo = repo_returning(pc);
        repo.expect_save().never();

        let err = use_cases(repo)
            .advance_characteristic(id, Characteristic::Brawn)
            .await
            .unwrap_err();
        assert!(matches!(err, AdvancementError::CharacteristicBlocked { .. }));
        assert_eq!(err.block(), Some(&AdvancementBlock::CreationFinalized));
    }

    #[tokio::test]
    async fn non_career_skill_costs_surcharge() {
        let pc = human(110);
        let id = pc.id();
        let mut repo = repo_returning(pc);
        repo.expect_save()
            .withf(|c| c.ledger().spent() == 10)
            .returning(|_| Ok(()));

        let result = use_cases(repo).advance_skill(id, "stealth").await.unwrap();
        assert_eq!(result.target, "Stealth");
        assert_eq!(result.xp, 10);
    }

    #[tokio::test]
    async fn unaffordable_skill_reports_message_and_reason() {
        let pc = human(4);
        let id = pc.id();
        let mut repo = repo_returning(pc);
        repo.expect_save().never();

        let err = use_cases(repo)
            .advance_skill(id, "Athletics")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot advance skill (insufficient XP or max rank)"
        );
        assert_eq!(
            err.block(),
            Some(&AdvancementBlock::InsufficientXp {
                required: 5,
                available: 4
            })
        );
    }

    #[tokio::test]
    async fn unknown_skill_is_not_found() {
        let pc = human(100);
        let id = pc.id();
        let mut repo = repo_returning(pc);
        repo.expect_save().never();

        let err = use_cases(repo).advance_skill(id, "Lightsaber").await.unwrap_err();
        assert!(matches!(err, AdvancementError::SkillNotFound(name) if name == "Lightsaber"));
    }

    #[tokio::test]
    async fn award_rejects_zero_without_loading() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().never();
        repo.expect_save().never();

        let err = use_cases(repo)
            .award_xp(CharacterId::new(), 0, "nothing")
            .await
            .unwrap_err();
        assert!(matches!(err, AdvancementError::InvalidAmount));
    }

    #[tokio::test]
    async fn award_adds_to_total_and_available() {
        let pc = human(100);
        let id = pc.id();
        let mut repo = repo_returning(pc);
        repo.expect_save()
            .withf(|c| c.ledger().total() == 115 && c.ledger().available() == 115)
            .returning(|_| Ok(()));

        let ledger = use_cases(repo).award_xp(id, 15, "Session 3").await.unwrap();
        assert_eq!(ledger.total(), 115);
        assert_eq!(ledger.history().last().unwrap().reason, "Session 3");
    }

    #[tokio::test]
    async fn missing_character_is_not_found() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|_| Ok(None));

        let id = CharacterId::new();
        let err = use_cases(repo).options(id).await.unwrap_err();
        assert!(matches!(err, AdvancementError::CharacterNotFound(got) if got == id));
    }

    #[tokio::test]
    async fn save_failure_propagates() {
        let pc = human(100);
        let id = pc.id();
        let mut repo = repo_returning(pc);
        repo.expect_save()
            .returning(|_| Err(RepoError::database("save", "disk full")));

        let err = use_cases(repo).advance_skill(id, "Athletics").await.unwrap_err();
        assert!(matches!(err, AdvancementError::Repo(_)));
    }

    #[tokio::test]
    async fn refund_restores_ledger() {
        let repo = Arc::new(InMemoryCharacterRepo::new());
        let pc = human(110);
        let id = pc.id();
        repo.save(&pc).await.unwrap();
        let use_cases = AdvancementUseCases::new(repo.clone(), Arc::new(CharacterLocks::new()));

        use_cases.advance_skill(id, "Stealth").await.unwrap();
        let refund = use_cases.reduce_skill(id, "Stealth").await.unwrap();
        assert_eq!(refund.xp, 10);
        assert_eq!((refund.from, refund.to), (1, 0));

        let stored = repo.get(id).await.unwrap().unwrap();
        assert_eq!(stored.ledger().available(), 110);
        assert_eq!(stored.ledger().spent(), 0);
        assert_eq!(stored.skill("Stealth").unwrap().rank(), 0);
    }

    #[tokio::test]
    async fn species_ranks_are_not_refundable() {
        let repo = Arc::new(InMemoryCharacterRepo::new());
        let pc = human(110);
        let id = pc.id();
        repo.save(&pc).await.unwrap();
        let use_cases = AdvancementUseCases::new(repo, Arc::new(CharacterLocks::new()));

        let err = use_cases
            .reduce_characteristic(id, Characteristic::Presence)
            .await
            .unwrap_err();
        assert_eq!(err.block(), Some(&AdvancementBlock::FloorReached { min: 2 }));

        use_cases.advance_skill(id, "Stealth").await.unwrap();
        let err = use_cases
            .reduce_characteristic(id, Characteristic::Presence)
            .await
            .unwrap_err();
        assert_eq!(err.block(), Some(&AdvancementBlock::FloorReached { min: 2 }));
    }

    #[tokio::test]
    async fn options_and_simulation_leave_storage_untouched() {
        let pc = human(20);
        let id = pc.id();
        let mut repo = repo_returning(pc);
        repo.expect_save().never();
        let use_cases = use_cases(repo);

        let options = use_cases.options(id).await.unwrap();
        assert!(options.characteristics.is_empty());
        assert_eq!(options.skills.len(), 2);

        let plan = AdvancementPlan::new().with_skill("Athletics", 2);
        let result = use_cases.simulate(id, &plan).await.unwrap();
        assert_eq!(result.total_cost, 15);
        assert_eq!(result.remaining_xp, 5);
        assert!(result.valid);
    }

    #[tokio::test]
    async fn concurrent_purchases_are_serialized() {
        let repo = Arc::new(InMemoryCharacterRepo::new());
        let pc = human(500);
        let id = pc.id();
        repo.save(&pc).await.unwrap();
        let use_cases = Arc::new(AdvancementUseCases::new(
            repo.clone(),
            Arc::new(CharacterLocks::new()),
        ));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let use_cases = use_cases.clone();
            handles.push(tokio::spawn(async move {
                use_cases.advance_skill(id, "Athletics").await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = repo.get(id).await.unwrap().unwrap();
        assert_eq!(stored.skill("Athletics").unwrap().rank(), 4);
        assert_eq!(stored.ledger().spent(), 5 + 10 + 15 + 20);
        assert_eq!(stored.ledger().available(), 500 - 50);
    }
}
