//! XP cost tables.
//!
//! Both tables are keyed by the *target* rank: the price of going from
//! rank `n` to `n + 1` is the entry for `n + 1`.

use crate::entities::MAX_SKILL_RANK;
use crate::value_objects::{MAX_CHARACTERISTIC, MIN_CHARACTERISTIC};

/// Characteristic cost by target value (10 x target).
pub const CHARACTERISTIC_COSTS: [(u8, u32); 5] = [(2, 20), (3, 30), (4, 40), (5, 50), (6, 60)];

/// Skill base cost by target rank (5 x target).
pub const SKILL_COSTS: [(u8, u32); 5] = [(1, 5), (2, 10), (3, 15), (4, 20), (5, 25)];

/// Flat surcharge per rank purchased in a non-career skill.
pub const NON_CAREER_SURCHARGE: u32 = 5;

fn lookup(table: &[(u8, u32)], target: u8) -> Option<u32> {
    table
        .iter()
        .find(|(rank, _)| *rank == target)
        .map(|(_, cost)| *cost)
}

/// Price of raising a characteristic to `target`.
pub fn characteristic_cost(target: u8) -> Option<u32> {
    lookup(&CHARACTERISTIC_COSTS, target)
}

/// Price of raising a characteristic that currently sits at `current`.
///
/// `None` at the ceiling.
pub fn characteristic_upgrade_cost(current: u8) -> Option<u32> {
    if current >= MAX_CHARACTERISTIC {
        return None;
    }
    characteristic_cost(current + 1)
}

/// Amount returned when lowering a characteristic from `current`.
///
/// Mirrors what was paid to reach `current`. `None` at the floor.
pub fn characteristic_refund(current: u8) -> Option<u32> {
    if current <= MIN_CHARACTERISTIC {
        return None;
    }
    characteristic_cost(current)
}

/// Price of raising a skill to `target`.
pub fn skill_cost(target: u8, career: bool) -> Option<u32> {
    let base = lookup(&SKILL_COSTS, target)?;
    Some(if career {
        base
    } else {
        base + NON_CAREER_SURCHARGE
    })
}

/// Price of raising a skill that currently sits at `current`.
pub fn skill_upgrade_cost(current: u8, career: bool) -> Option<u32> {
    if current >= MAX_SKILL_RANK {
        return None;
    }
    skill_cost(current + 1, career)
}

/// Amount returned when lowering a skill from `current`.
///
/// `current x 5`, plus one flat surcharge for non-career skills.
pub fn skill_refund(current: u8, career: bool) -> Option<u32> {
    if current == 0 {
        return None;
    }
    skill_cost(current, career)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn characteristic_table_is_ten_times_target() {
        for (target, cost) in CHARACTERISTIC_COSTS {
            assert_eq!(cost, 10 * u32::from(target));
        }
        assert_eq!(characteristic_cost(1), None);
        assert_eq!(characteristic_cost(7), None);
    }

    #[test]
    fn skill_table_is_five_times_target() {
        for (target, cost) in SKILL_COSTS {
            assert_eq!(cost, 5 * u32::from(target));
        }
        assert_eq!(skill_cost(0, true), None);
        assert_eq!(skill_cost(6, true), None);
    }

    #[test]
    fn characteristic_cost_curve_is_strictly_increasing() {
        for n in 2..MAX_CHARACTERISTIC {
            let lower = characteristic_cost(n).unwrap();
            let higher = characteristic_cost(n + 1).unwrap();
            assert!(higher > lower, "cost({}) must exceed cost({})", n + 1, n);
        }
    }

    #[test]
    fn non_career_surcharge_applies_to_every_rank() {
        for target in 1..=MAX_SKILL_RANK {
            assert_eq!(
                skill_cost(target, false).unwrap(),
                skill_cost(target, true).unwrap() + NON_CAREER_SURCHARGE
            );
        }
    }

    #[test]
    fn upgrade_costs_stop_at_ceilings() {
        assert_eq!(characteristic_upgrade_cost(2), Some(30));
        assert_eq!(characteristic_upgrade_cost(MAX_CHARACTERISTIC), None);
        assert_eq!(skill_upgrade_cost(0, true), Some(5));
        assert_eq!(skill_upgrade_cost(0, false), Some(10));
        assert_eq!(skill_upgrade_cost(MAX_SKILL_RANK, true), None);
    }

    #[test]
    fn refunds_match_cost_to_reach_current() {
        assert_eq!(characteristic_refund(3), Some(30));
        assert_eq!(characteristic_refund(MIN_CHARACTERISTIC), None);
        assert_eq!(skill_refund(2, true), Some(10));
        assert_eq!(skill_refund(2, false), Some(15));
        assert_eq!(skill_refund(0, false), None);
    }
}
