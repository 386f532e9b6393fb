//! Batch plan simulation.
//!
//! A plan asks for several increases at once, possibly more than one of the
//! same characteristic or skill. Each successive increase is priced against
//! the rank left by the previous simulated increase, so the cost curve is
//! walked exactly as a sequence of real purchases would walk it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::costs;
use super::engine::{AdvancementBlock, AdvancementEngine};
use crate::entities::{Character, CharacterSkill, MAX_SKILL_RANK};
use crate::value_objects::{Characteristic, MAX_CHARACTERISTIC};

/// Requested increases: target -> number of ranks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancementPlan {
    #[serde(default)]
    pub characteristics: BTreeMap<Characteristic, u32>,
    #[serde(default)]
    pub skills: BTreeMap<String, u32>,
}

impl AdvancementPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_characteristic(mut self, characteristic: Characteristic, count: u32) -> Self {
        *self.characteristics.entry(characteristic).or_insert(0) += count;
        self
    }

    pub fn with_skill(mut self, skill_name: impl Into<String>, count: u32) -> Self {
        *self.skills.entry(skill_name.into()).or_insert(0) += count;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.characteristics.values().all(|&n| n == 0) && self.skills.values().all(|&n| n == 0)
    }
}

/// What a plan step targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum PlanTarget {
    Characteristic(Characteristic),
    Skill(String),
}

/// Result of one simulated increase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Purchase { from: u8, to: u8, cost: u32 },
    Blocked { rank: Option<u8>, reason: AdvancementBlock },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStep {
    pub target: PlanTarget,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

impl SimulationStep {
    pub fn cost(&self) -> Option<u32> {
        match self.outcome {
            StepOutcome::Purchase { cost, .. } => Some(cost),
            StepOutcome::Blocked { .. } => None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self.outcome, StepOutcome::Blocked { .. })
    }
}

/// Outcome of [`AdvancementEngine::simulate_advancement`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub valid: bool,
    pub total_cost: u32,
    /// Available XP minus `total_cost`; negative when the plan is unaffordable.
    pub remaining_xp: i64,
    pub breakdown: Vec<SimulationStep>,
}

impl AdvancementEngine {
    /// Price a batch plan without touching the character.
    ///
    /// Characteristics are walked in canonical order, then skills by name.
    /// A blocked step marks the plan invalid and stops further increases of
    /// that target; other targets are still priced.
    pub fn simulate_advancement(
        &self,
        character: &Character,
        plan: &AdvancementPlan,
    ) -> SimulationResult {
        let mut breakdown = Vec::new();
        let mut total_cost: u32 = 0;
        let mut valid = true;

        for (&characteristic, &count) in &plan.characteristics {
            let mut rank = character.characteristic(characteristic);
            for _ in 0..count {
                let target = PlanTarget::Characteristic(characteristic);
                if character.is_created() {
                    breakdown.push(blocked(target, Some(rank), AdvancementBlock::CreationFinalized));
                    valid = false;
                    break;
                }
                let Some(cost) = costs::characteristic_upgrade_cost(rank) else {
                    breakdown.push(blocked(
                        target,
                        Some(rank),
                        AdvancementBlock::CapReached {
                            max: MAX_CHARACTERISTIC,
                        },
                    ));
                    valid = false;
                    break;
                };
                breakdown.push(purchase(target, rank, cost));
                total_cost = total_cost.saturating_add(cost);
                rank += 1;
            }
        }

        // Differently spelled keys naming the same skill share one walk.
        let mut skills: BTreeMap<&str, (&CharacterSkill, u32)> = BTreeMap::new();
        for (skill_name, &count) in &plan.skills {
            if count == 0 {
                continue;
            }
            let Some((key, skill)) = character.skill_entry(skill_name) else {
                breakdown.push(blocked(
                    PlanTarget::Skill(skill_name.clone()),
                    None,
                    AdvancementBlock::UnknownSkill {
                        name: skill_name.clone(),
                    },
                ));
                valid = false;
                continue;
            };
            let entry = skills.entry(key).or_insert((skill, 0));
            entry.1 = entry.1.saturating_add(count);
        }

        for (name, (skill, count)) in skills {
            let mut rank = skill.rank();
            for _ in 0..count {
                let target = PlanTarget::Skill(name.to_string());
                let Some(cost) = costs::skill_upgrade_cost(rank, skill.is_career()) else {
                    breakdown.push(blocked(
                        target,
                        Some(rank),
                        AdvancementBlock::CapReached {
                            max: MAX_SKILL_RANK,
                        },
                    ));
                    valid = false;
                    break;
                };
                breakdown.push(purchase(target, rank, cost));
                total_cost = total_cost.saturating_add(cost);
                rank += 1;
            }
        }

        let remaining_xp = i64::from(character.ledger().available()) - i64::from(total_cost);
        if remaining_xp < 0 {
            valid = false;
        }

        SimulationResult {
            valid,
            total_cost,
            remaining_xp,
            breakdown,
        }
    }
}

fn purchase(target: PlanTarget, from: u8, cost: u32) -> SimulationStep {
    SimulationStep {
        target,
        outcome: StepOutcome::Purchase {
            from,
            to: from + 1,
            cost,
        },
    }
}

fn blocked(target: PlanTarget, rank: Option<u8>, reason: AdvancementBlock) -> SimulationStep {
    SimulationStep {
        target,
        outcome: StepOutcome::Blocked { rank, reason },
    }
}
