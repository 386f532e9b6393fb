//! XpLedger - the experience point balance of a character
//!
//! The three counters are private; the only way to move XP is through
//! [`XpLedger::award`], [`XpLedger::spend`] and [`XpLedger::refund`], each of
//! which keeps `total == available + spent`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::DomainError;

/// Reasons a ledger movement was refused. Nothing changes when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Insufficient XP: required {required}, available {available}")]
    InsufficientXp { required: u32, available: u32 },

    #[error("Refund of {amount} exceeds spent XP {spent}")]
    RefundExceedsSpent { amount: u32, spent: u32 },

    #[error("XP total would overflow")]
    Overflow,
}

/// Kind of movement recorded in the ledger history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XpTransactionKind {
    Award,
    Spend,
    Refund,
}

/// One entry in the ledger history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpTransaction {
    pub kind: XpTransactionKind,
    pub amount: u32,
    pub reason: String,
}

/// A character's XP balance.
///
/// # Invariants
///
/// - `total == available + spent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "XpLedgerRecord", into = "XpLedgerRecord")]
pub struct XpLedger {
    total: u32,
    available: u32,
    spent: u32,
    history: Vec<XpTransaction>,
}

impl XpLedger {
    /// Open a ledger with starting XP, all of it unspent.
    pub fn new(starting_xp: u32) -> Self {
        let mut history = Vec::new();
        if starting_xp > 0 {
            history.push(XpTransaction {
                kind: XpTransactionKind::Award,
                amount: starting_xp,
                reason: "Starting XP".to_string(),
            });
        }
        Self {
            total: starting_xp,
            available: starting_xp,
            spent: 0,
            history,
        }
    }

    /// Rebuild a ledger from stored counters, checking that they balance.
    pub fn from_parts(total: u32, available: u32, spent: u32) -> Result<Self, DomainError> {
        let balanced = available
            .checked_add(spent)
            .is_some_and(|sum| sum == total);
        if !balanced {
            return Err(DomainError::validation(format!(
                "XP ledger does not balance: total {} != available {} + spent {}",
                total, available, spent
            )));
        }
        Ok(Self {
            total,
            available,
            spent,
            history: Vec::new(),
        })
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[inline]
    pub fn available(&self) -> u32 {
        self.available
    }

    #[inline]
    pub fn spent(&self) -> u32 {
        self.spent
    }

    pub fn history(&self) -> &[XpTransaction] {
        &self.history
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.available >= cost
    }

    /// Grant XP: raises both total and available.
    pub fn award(&mut self, amount: u32, reason: impl Into<String>) -> Result<(), LedgerError> {
        let total = self.total.checked_add(amount).ok_or(LedgerError::Overflow)?;
        let available = self
            .available
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.total = total;
        self.available = available;
        self.record(XpTransactionKind::Award, amount, reason);
        Ok(())
    }

    /// Move XP from available to spent.
    pub fn spend(&mut self, amount: u32, reason: impl Into<String>) -> Result<(), LedgerError> {
        if self.available < amount {
            return Err(LedgerError::InsufficientXp {
                required: amount,
                available: self.available,
            });
        }
        self.available -= amount;
        self.spent += amount;
        self.record(XpTransactionKind::Spend, amount, reason);
        Ok(())
    }

    /// Move XP from spent back to available.
    pub fn refund(&mut self, amount: u32, reason: impl Into<String>) -> Result<(), LedgerError> {
        if self.spent < amount {
            return Err(LedgerError::RefundExceedsSpent {
                amount,
                spent: self.spent,
            });
        }
        self.spent -= amount;
        self.available += amount;
        self.record(XpTransactionKind::Refund, amount, reason);
        Ok(())
    }

    fn record(&mut self, kind: XpTransactionKind, amount: u32, reason: impl Into<String>) {
        self.history.push(XpTransaction {
            kind,
            amount,
            reason: reason.into(),
        });
    }
}

impl Default for XpLedger {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Serialized shape of [`XpLedger`]; the invariant is checked on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct XpLedgerRecord {
    total_xp: u32,
    available_xp: u32,
    spent_xp: u32,
    #[serde(default)]
    history: Vec<XpTransaction>,
}

impl TryFrom<XpLedgerRecord> for XpLedger {
    type Error = DomainError;

    fn try_from(r: XpLedgerRecord) -> Result<Self, Self::Error> {
        let mut ledger = Self::from_parts(r.total_xp, r.available_xp, r.spent_xp)?;
        ledger.history = r.history;
        Ok(ledger)
    }
}

impl From<XpLedger> for XpLedgerRecord {
    fn from(l: XpLedger) -> Self {
        Self {
            total_xp: l.total,
            available_xp: l.available,
            spent_xp: l.spent,
            history: l.history,
        }
    }
}
