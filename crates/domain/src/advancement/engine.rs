//! The advancement engine: XP purchases, refunds and the purchase menu.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::costs;
use crate::entities::{Character, MAX_SKILL_RANK};
use crate::value_objects::{Characteristic, LedgerError, MAX_CHARACTERISTIC, MIN_CHARACTERISTIC};

/// Why an advancement or reduction is not allowed right now.
///
/// These are ordinary rule outcomes, not failures of the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdvancementBlock {
    #[error("already at maximum rank {max}")]
    CapReached { max: u8 },

    #[error("already at minimum rank {min}")]
    FloorReached { min: u8 },

    #[error("characteristics are locked once character creation is finalized")]
    CreationFinalized,

    #[error("insufficient XP: requires {required}, {available} available")]
    InsufficientXp { required: u32, available: u32 },

    #[error("unknown skill: {name}")]
    UnknownSkill { name: String },

    #[error("refund of {amount} XP exceeds {spent} XP spent")]
    RefundExceedsSpent { amount: u32, spent: u32 },
}

/// An affordable characteristic purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacteristicOption {
    pub current: u8,
    pub target: u8,
    pub cost: u32,
}

/// An affordable skill purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillOption {
    pub current: u8,
    pub target: u8,
    pub cost: u32,
    pub career_skill: bool,
}

/// Everything a character can afford to buy right now.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancementOptions {
    pub characteristics: BTreeMap<Characteristic, CharacteristicOption>,
    pub skills: BTreeMap<String, SkillOption>,
    /// Always empty: talent trees are not modelled.
    pub talents: Vec<String>,
}

impl AdvancementOptions {
    pub fn is_empty(&self) -> bool {
        self.characteristics.is_empty() && self.skills.is_empty() && self.talents.is_empty()
    }
}

/// Stateless XP rules engine.
///
/// Every operation takes the character it works on; the engine itself holds
/// nothing. Rule violations come back as `None`/`false` and leave the
/// character untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvancementEngine;

impl AdvancementEngine {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    // Costs
    // =========================================================================

    /// XP needed to raise `characteristic` by one.
    ///
    /// `None` once creation is finalized or at the ceiling.
    pub fn calculate_characteristic_cost(
        &self,
        character: &Character,
        characteristic: Characteristic,
    ) -> Option<u32> {
        if character.is_created() {
            return None;
        }
        costs::characteristic_upgrade_cost(character.characteristic(characteristic))
    }

    /// XP needed to raise `skill_name` by one rank.
    ///
    /// `None` for unknown skills or at the ceiling. Creation state is irrelevant.
    pub fn calculate_skill_cost(&self, character: &Character, skill_name: &str) -> Option<u32> {
        let skill = character.skill(skill_name)?;
        costs::skill_upgrade_cost(skill.rank(), skill.is_career())
    }

    /// Why `advance_characteristic` would refuse, or `None` if it would succeed.
    pub fn characteristic_block(
        &self,
        character: &Character,
        characteristic: Characteristic,
    ) -> Option<AdvancementBlock> {
        if character.is_created() {
            return Some(AdvancementBlock::CreationFinalized);
        }
        let Some(cost) = self.calculate_characteristic_cost(character, characteristic) else {
            return Some(AdvancementBlock::CapReached {
                max: MAX_CHARACTERISTIC,
            });
        };
        insufficient(character, cost)
    }

    /// Why `advance_skill` would refuse, or `None` if it would succeed.
    pub fn skill_block(&self, character: &Character, skill_name: &str) -> Option<AdvancementBlock> {
        if character.skill(skill_name).is_none() {
            return Some(AdvancementBlock::UnknownSkill {
                name: skill_name.to_string(),
            });
        }
        let Some(cost) = self.calculate_skill_cost(character, skill_name) else {
            return Some(AdvancementBlock::CapReached {
                max: MAX_SKILL_RANK,
            });
        };
        insufficient(character, cost)
    }

    // =========================================================================
    // Purchases
    // =========================================================================

    /// Buy one point of `characteristic`.
    pub fn advance_characteristic(
        &self,
        character: &mut Character,
        characteristic: Characteristic,
    ) -> bool {
        let Some(cost) = self.calculate_characteristic_cost(character, characteristic) else {
            return false;
        };
        if character.is_created() || !character.ledger().can_afford(cost) {
            return false;
        }

        let current = character.characteristic(characteristic);
        if !character.characteristics_mut().raise(characteristic) {
            return false;
        }
        let reason = format!("{} {} -> {}", characteristic, current, current + 1);
        if character.ledger_mut().spend(cost, reason).is_err() {
            character.characteristics_mut().lower(characteristic);
            return false;
        }
        true
    }

    /// Buy one rank of `skill_name`.
    pub fn advance_skill(&self, character: &mut Character, skill_name: &str) -> bool {
        let Some(cost) = self.calculate_skill_cost(character, skill_name) else {
            return false;
        };
        if !character.ledger().can_afford(cost) {
            return false;
        }
        let Some(key) = character.skill_key(skill_name).map(str::to_string) else {
            return false;
        };

        let Some(skill) = character.skill_mut(&key) else {
            return false;
        };
        let current = skill.rank();
        if !skill.raise() {
            return false;
        }
        let reason = format!("{} {} -> {}", key, current, current + 1);
        if character.ledger_mut().spend(cost, reason).is_err() {
            if let Some(skill) = character.skill_mut(&key) {
                skill.lower();
            }
            return false;
        }
        true
    }

    /// Grant XP. `reason` is kept in the ledger history only.
    ///
    /// The only refusal is arithmetic overflow of the totals.
    pub fn award_xp(
        &self,
        character: &mut Character,
        amount: u32,
        reason: &str,
    ) -> Result<(), LedgerError> {
        character.ledger_mut().award(amount, reason)
    }

    // =========================================================================
    // Menu
    // =========================================================================

    /// Every purchase the character can afford right now.
    ///
    /// Characteristics are listed only before creation is finalized.
    pub fn get_advancement_options(&self, character: &Character) -> AdvancementOptions {
        let available = character.ledger().available();

        let characteristics = if character.is_created() {
            BTreeMap::new()
        } else {
            Characteristic::ALL
                .into_iter()
                .filter_map(|c| {
                    let cost = self.calculate_characteristic_cost(character, c)?;
                    let current = character.characteristic(c);
                    (cost <= available).then_some((
                        c,
                        CharacteristicOption {
                            current,
                            target: current + 1,
                            cost,
                        },
                    ))
                })
                .collect()
        };

        let skills = character
            .skills()
            .iter()
            .filter_map(|(name, skill)| {
                let cost = costs::skill_upgrade_cost(skill.rank(), skill.is_career())?;
                (cost <= available).then(|| {
                    (
                        name.clone(),
                        SkillOption {
                            current: skill.rank(),
                            target: skill.rank() + 1,
                            cost,
                            career_skill: skill.is_career(),
                        },
                    )
                })
            })
            .collect();

        AdvancementOptions {
            characteristics,
            skills,
            talents: Vec::new(),
        }
    }

    // =========================================================================
    // Refunds
    // =========================================================================

    /// XP returned by lowering `characteristic` one point, if allowed.
    ///
    /// Only points bought with XP come back: `None` at or below the value
    /// the character was created with.
    pub fn characteristic_refund(
        &self,
        character: &Character,
        characteristic: Characteristic,
    ) -> Option<u32> {
        if character.is_created() {
            return None;
        }
        let current = character.characteristic(characteristic);
        if current <= character.base_characteristics().get(characteristic) {
            return None;
        }
        costs::characteristic_refund(current)
    }

    /// XP returned by lowering `skill_name` one rank, if allowed.
    ///
    /// `None` at or below the skill's starting rank.
    pub fn skill_refund(&self, character: &Character, skill_name: &str) -> Option<u32> {
        let skill = character.skill(skill_name)?;
        if skill.rank() <= skill.base_rank() {
            return None;
        }
        costs::skill_refund(skill.rank(), skill.is_career())
    }

    /// Why `reduce_characteristic` would refuse, or `None` if it would succeed.
    pub fn characteristic_reduction_block(
        &self,
        character: &Character,
        characteristic: Characteristic,
    ) -> Option<AdvancementBlock> {
        if character.is_created() {
            return Some(AdvancementBlock::CreationFinalized);
        }
        let Some(refund) = self.characteristic_refund(character, characteristic) else {
            return Some(AdvancementBlock::FloorReached {
                min: character
                    .base_characteristics()
                    .get(characteristic)
                    .max(MIN_CHARACTERISTIC),
            });
        };
        overdrawn(character, refund)
    }

    /// Why `reduce_skill` would refuse, or `None` if it would succeed.
    pub fn skill_reduction_block(
        &self,
        character: &Character,
        skill_name: &str,
    ) -> Option<AdvancementBlock> {
        if character.skill(skill_name).is_none() {
            return Some(AdvancementBlock::UnknownSkill {
                name: skill_name.to_string(),
            });
        }
        let Some(refund) = self.skill_refund(character, skill_name) else {
            let min = character.skill(skill_name).map_or(0, |s| s.base_rank());
            return Some(AdvancementBlock::FloorReached { min });
        };
        overdrawn(character, refund)
    }

    /// Lower `characteristic` by one and return the refunded XP.
    ///
    /// The refund moves from spent back to available, so the ledger stays
    /// balanced. Refused at the creation value, and when a ledger loaded
    /// from storage has less spent than the refund.
    pub fn reduce_characteristic(
        &self,
        character: &mut Character,
        characteristic: Characteristic,
    ) -> Option<u32> {
        let refund = self.characteristic_refund(character, characteristic)?;
        if refund > character.ledger().spent() {
            return None;
        }

        let current = character.characteristic(characteristic);
        if !character.characteristics_mut().lower(characteristic) {
            return None;
        }
        let reason = format!("{} {} -> {}", characteristic, current, current - 1);
        if character.ledger_mut().refund(refund, reason).is_err() {
            character.characteristics_mut().raise(characteristic);
            return None;
        }
        Some(refund)
    }

    /// Lower `skill_name` by one rank and return the refunded XP.
    pub fn reduce_skill(&self, character: &mut Character, skill_name: &str) -> Option<u32> {
        let refund = self.skill_refund(character, skill_name)?;
        if refund > character.ledger().spent() {
            return None;
        }
        let key = character.skill_key(skill_name)?.to_string();

        let skill = character.skill_mut(&key)?;
        let current = skill.rank();
        if !skill.lower() {
            return None;
        }
        let reason = format!("{} {} -> {}", key, current, current - 1);
        if character.ledger_mut().refund(refund, reason).is_err() {
            if let Some(skill) = character.skill_mut(&key) {
                skill.raise();
            }
            return None;
        }
        Some(refund)
    }
}

fn insufficient(character: &Character, cost: u32) -> Option<AdvancementBlock> {
    let available = character.ledger().available();
    (available < cost).then_some(AdvancementBlock::InsufficientXp {
        required: cost,
        available,
    })
}

fn overdrawn(character: &Character, refund: u32) -> Option<AdvancementBlock> {
    let spent = character.ledger().spent();
    (refund > spent).then_some(AdvancementBlock::RefundExceedsSpent {
        amount: refund,
        spent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Career, CharacterSkill, Species};
    use crate::value_objects::{CharacterName, Characteristics, XpLedger};
    use chrono::Utc;

    fn human() -> Character {
        Character::create(
            CharacterName::new("Kira Vess").unwrap(),
            Species::Human,
            None,
            Utc::now(),
        )
    }

    fn with_xp(available: u32) -> Character {
        Character::new(
            CharacterName::new("Test").unwrap(),
            Species::Human,
            Characteristics::uniform(2).unwrap(),
            XpLedger::new(available),
            Utc::now(),
        )
        .with_skill("Athletics", CharacterSkill::untrained(Characteristic::Brawn, true))
        .with_skill("Stealth", CharacterSkill::untrained(Characteristic::Agility, false))
    }

    fn assert_balanced(character: &Character) {
        let l = character.ledger();
        assert_eq!(l.total(), l.available() + l.spent());
    }

    #[test]
    fn human_buys_brawn_for_thirty() {
        let engine = AdvancementEngine::new();
        let mut pc = human();

        assert_eq!(
            engine.calculate_characteristic_cost(&pc, Characteristic::Brawn),
            Some(30)
        );
        assert!(engine.advance_characteristic(&mut pc, Characteristic::Brawn));
        assert_eq!(pc.ledger().available(), 80);
        assert_eq!(pc.ledger().spent(), 30);
        assert_eq!(pc.characteristic(Characteristic::Brawn), 3);
        assert_balanced(&pc);
    }

    #[test]
    fn finalized_human_cannot_buy_characteristics() {
        let engine = AdvancementEngine::new();
        let mut pc = human();
        pc.finalize_creation(Utc::now()).unwrap();
        let before = pc.clone();

        for c in Characteristic::ALL {
            assert_eq!(engine.calculate_characteristic_cost(&pc, c), None);
            assert!(!engine.advance_characteristic(&mut pc, c));
            assert_eq!(
                engine.characteristic_block(&pc, c),
                Some(AdvancementBlock::CreationFinalized)
            );
        }
        assert_eq!(pc, before);
    }

    #[test]
    fn skills_still_advance_after_finalization() {
        let engine = AdvancementEngine::new();
        let mut pc = human();
        pc.finalize_creation(Utc::now()).unwrap();
        assert!(engine.advance_skill(&mut pc, "Athletics"));
        assert_eq!(pc.skill("Athletics").unwrap().rank(), 1);
    }

    #[test]
    fn non_career_rank_one_costs_ten() {
        let engine = AdvancementEngine::new();
        let mut pc = with_xp(100);
        assert_eq!(engine.calculate_skill_cost(&pc, "Stealth"), Some(10));
        assert!(engine.advance_skill(&mut pc, "Stealth"));
        assert_eq!(pc.ledger().spent(), 10);
        assert_balanced(&pc);
    }

    #[test]
    fn non_career_surcharge_holds_at_every_rank() {
        let engine = AdvancementEngine::new();
        for rank in 0..MAX_SKILL_RANK {
            let pc = with_xp(0)
                .with_skill("Career", CharacterSkill::new(Characteristic::Brawn, rank, true).unwrap())
                .with_skill("Other", CharacterSkill::new(Characteristic::Brawn, rank, false).unwrap());
            assert_eq!(
                engine.calculate_skill_cost(&pc, "Other").unwrap(),
                engine.calculate_skill_cost(&pc, "Career").unwrap() + 5
            );
        }
    }

    #[test]
    fn caps_are_enforced_regardless_of_xp() {
        let engine = AdvancementEngine::new();
        let mut pc = Character::new(
            CharacterName::new("Capped").unwrap(),
            Species::Human,
            Characteristics::new(6, 2, 2, 2, 2, 2).unwrap(),
            XpLedger::new(10_000),
            Utc::now(),
        )
        .with_skill("Cool", CharacterSkill::new(Characteristic::Presence, 5, true).unwrap());

        assert!(!engine.advance_characteristic(&mut pc, Characteristic::Brawn));
        assert!(!engine.advance_skill(&mut pc, "Cool"));
        assert_eq!(
            engine.characteristic_block(&pc, Characteristic::Brawn),
            Some(AdvancementBlock::CapReached { max: 6 })
        );
        assert_eq!(
            engine.skill_block(&pc, "Cool"),
            Some(AdvancementBlock::CapReached { max: 5 })
        );
        assert_eq!(pc.ledger().spent(), 0);
    }

    #[test]
    fn insufficient_funds_change_nothing() {
        let engine = AdvancementEngine::new();
        let mut pc = with_xp(9);
        let before = pc.clone();

        assert!(!engine.advance_skill(&mut pc, "Stealth"));
        assert!(!engine.advance_characteristic(&mut pc, Characteristic::Agility));
        assert_eq!(pc, before);
        assert_eq!(
            engine.skill_block(&pc, "Stealth"),
            Some(AdvancementBlock::InsufficientXp {
                required: 10,
                available: 9
            })
        );
    }

    #[test]
    fn unknown_skill_is_not_purchasable() {
        let engine = AdvancementEngine::new();
        let mut pc = with_xp(100);
        assert_eq!(engine.calculate_skill_cost(&pc, "Lightsaber"), None);
        assert!(!engine.advance_skill(&mut pc, "Lightsaber"));
        assert!(matches!(
            engine.skill_block(&pc, "Lightsaber"),
            Some(AdvancementBlock::UnknownSkill { .. })
        ));
    }

    #[test]
    fn ledger_balances_across_mixed_sequences() {
        let engine = AdvancementEngine::new();
        let mut pc = Character::create(
            CharacterName::new("Seq").unwrap(),
            Species::Droid,
            Some(Career::Technician),
            Utc::now(),
        );

        engine.award_xp(&mut pc, 25, "first session").unwrap();
        assert_balanced(&pc);
        for _ in 0..3 {
            engine.advance_skill(&mut pc, "Mechanics");
            assert_balanced(&pc);
            engine.advance_characteristic(&mut pc, Characteristic::Intellect);
            assert_balanced(&pc);
            engine.advance_skill(&mut pc, "Gunnery");
            assert_balanced(&pc);
        }
        engine.award_xp(&mut pc, 40, "second session").unwrap();
        engine.reduce_skill(&mut pc, "Mechanics");
        assert_balanced(&pc);
        engine.reduce_characteristic(&mut pc, Characteristic::Intellect);
        assert_balanced(&pc);
        assert_eq!(pc.ledger().total(), 175 + 25 + 40);
    }

    #[test]
    fn award_xp_records_reason_in_history() {
        let engine = AdvancementEngine::new();
        let mut pc = with_xp(0);
        engine.award_xp(&mut pc, 15, "defeated the rancor").unwrap();
        assert_eq!(pc.ledger().total(), 15);
        assert_eq!(pc.ledger().available(), 15);
        let last = pc.ledger().history().last().unwrap();
        assert_eq!(last.reason, "defeated the rancor");
    }

    #[test]
    fn options_list_only_affordable_purchases() {
        let engine = AdvancementEngine::new();
        let pc = with_xp(20);
        let options = engine.get_advancement_options(&pc);

        // Every characteristic at 2 costs 30.
        assert!(options.characteristics.is_empty());
        assert_eq!(
            options.skills.get("Athletics"),
            Some(&SkillOption {
                current: 0,
                target: 1,
                cost: 5,
                career_skill: true
            })
        );
        assert_eq!(options.skills.get("Stealth").map(|s| s.cost), Some(10));
        assert!(options.talents.is_empty());
    }

    #[test]
    fn options_hide_characteristics_after_finalization() {
        let engine = AdvancementEngine::new();
        let mut pc = human();
        let before = engine.get_advancement_options(&pc);
        assert_eq!(before.characteristics.len(), 6);
        assert_eq!(
            before.characteristics[&Characteristic::Presence],
            CharacteristicOption {
                current: 2,
                target: 3,
                cost: 30
            }
        );

        pc.finalize_creation(Utc::now()).unwrap();
        let after = engine.get_advancement_options(&pc);
        assert!(after.characteristics.is_empty());
        assert!(!after.skills.is_empty());
    }

    #[test]
    fn options_are_idempotent_and_read_only() {
        let engine = AdvancementEngine::new();
        let pc = human();
        let snapshot = pc.clone();
        let first = engine.get_advancement_options(&pc);
        let second = engine.get_advancement_options(&pc);
        assert_eq!(first, second);
        assert_eq!(pc, snapshot);
    }

    #[test]
    fn advance_then_reduce_restores_ledger() {
        let engine = AdvancementEngine::new();
        let mut pc = human();
        let before = (pc.ledger().total(), pc.ledger().available(), pc.ledger().spent());

        assert!(engine.advance_characteristic(&mut pc, Characteristic::Cunning));
        assert_eq!(
            engine.reduce_characteristic(&mut pc, Characteristic::Cunning),
            Some(30)
        );
        assert!(engine.advance_skill(&mut pc, "Stealth"));
        assert!(engine.advance_skill(&mut pc, "Stealth"));
        assert_eq!(engine.reduce_skill(&mut pc, "Stealth"), Some(15));
        assert_eq!(engine.reduce_skill(&mut pc, "Stealth"), Some(10));

        let after = (pc.ledger().total(), pc.ledger().available(), pc.ledger().spent());
        assert_eq!(before, after);
        assert_eq!(pc.characteristic(Characteristic::Cunning), 2);
        assert_eq!(pc.skill("Stealth").unwrap().rank(), 0);
    }

    #[test]
    fn career_skill_refund_has_no_surcharge() {
        let engine = AdvancementEngine::new();
        let mut pc = with_xp(100);
        assert!(engine.advance_skill(&mut pc, "Athletics"));
        assert!(engine.advance_skill(&mut pc, "Athletics"));
        assert_eq!(engine.skill_refund(&pc, "Athletics"), Some(10));
        assert_eq!(engine.reduce_skill(&mut pc, "Athletics"), Some(10));
        assert_eq!(pc.ledger().spent(), 5);
    }

    #[test]
    fn reductions_stop_at_floors() {
        let engine = AdvancementEngine::new();
        let mut pc = Character::new(
            CharacterName::new("Floor").unwrap(),
            Species::Droid,
            Characteristics::uniform(1).unwrap(),
            XpLedger::new(50),
            Utc::now(),
        )
        .with_skill("Cool", CharacterSkill::untrained(Characteristic::Presence, true));

        assert_eq!(engine.reduce_characteristic(&mut pc, Characteristic::Brawn), None);
        assert_eq!(
            engine.characteristic_reduction_block(&pc, Characteristic::Brawn),
            Some(AdvancementBlock::FloorReached { min: 1 })
        );
        assert_eq!(engine.reduce_skill(&mut pc, "Cool"), None);
        assert_eq!(
            engine.skill_reduction_block(&pc, "Cool"),
            Some(AdvancementBlock::FloorReached { min: 0 })
        );
    }

    #[test]
    fn species_ranks_are_not_refundable() {
        let engine = AdvancementEngine::new();
        let mut pc = human();
        let before = pc.clone();

        assert_eq!(engine.reduce_characteristic(&mut pc, Characteristic::Brawn), None);
        assert_eq!(
            engine.characteristic_reduction_block(&pc, Characteristic::Brawn),
            Some(AdvancementBlock::FloorReached { min: 2 })
        );
        assert_eq!(pc, before);
    }

    #[test]
    fn unrelated_purchases_do_not_unlock_species_ranks() {
        let engine = AdvancementEngine::new();
        let mut pc = human();
        assert!(engine.advance_characteristic(&mut pc, Characteristic::Brawn));
        assert!(engine.advance_skill(&mut pc, "Stealth"));
        assert_eq!(pc.ledger().spent(), 40);
        let before = pc.clone();

        assert_eq!(engine.characteristic_refund(&pc, Characteristic::Agility), None);
        assert_eq!(engine.reduce_characteristic(&mut pc, Characteristic::Agility), None);
        assert_eq!(
            engine.characteristic_reduction_block(&pc, Characteristic::Agility),
            Some(AdvancementBlock::FloorReached { min: 2 })
        );
        assert_eq!(engine.reduce_skill(&mut pc, "Athletics"), None);
        assert_eq!(pc, before);

        // The bought point still comes back, once.
        assert_eq!(
            engine.reduce_characteristic(&mut pc, Characteristic::Brawn),
            Some(30)
        );
        assert_eq!(engine.reduce_characteristic(&mut pc, Characteristic::Brawn), None);
        assert_eq!(pc.characteristic(Characteristic::Brawn), 2);
        assert_eq!(pc.ledger().spent(), 10);
    }

    #[test]
    fn starting_skill_ranks_are_not_refundable() {
        let engine = AdvancementEngine::new();
        let mut pc = with_xp(100)
            .with_skill("Cool", CharacterSkill::new(Characteristic::Presence, 2, true).unwrap());
        assert!(engine.advance_skill(&mut pc, "Stealth"));

        assert_eq!(engine.skill_refund(&pc, "Cool"), None);
        assert_eq!(engine.reduce_skill(&mut pc, "Cool"), None);
        assert_eq!(
            engine.skill_reduction_block(&pc, "Cool"),
            Some(AdvancementBlock::FloorReached { min: 2 })
        );

        assert!(engine.advance_skill(&mut pc, "Cool"));
        assert_eq!(engine.reduce_skill(&mut pc, "Cool"), Some(15));
        assert_eq!(pc.skill("Cool").unwrap().rank(), 2);
    }

    #[test]
    fn characteristic_reduction_is_locked_after_finalization() {
        let engine = AdvancementEngine::new();
        let mut pc = human();
        assert!(engine.advance_characteristic(&mut pc, Characteristic::Willpower));
        pc.finalize_creation(Utc::now()).unwrap();

        assert_eq!(
            engine.reduce_characteristic(&mut pc, Characteristic::Willpower),
            None
        );
        assert_eq!(pc.characteristic(Characteristic::Willpower), 3);
        assert_eq!(
            engine.characteristic_reduction_block(&pc, Characteristic::Willpower),
            Some(AdvancementBlock::CreationFinalized)
        );
    }
}
