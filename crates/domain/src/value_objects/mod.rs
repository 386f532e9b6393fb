//! Value objects - Immutable objects defined by their attributes

mod characteristic;
mod names;
mod xp_ledger;

pub use characteristic::{
    Characteristic, Characteristics, MAX_CHARACTERISTIC, MIN_CHARACTERISTIC,
};
pub use names::CharacterName;
pub use xp_ledger::{LedgerError, XpLedger, XpTransaction, XpTransactionKind};
