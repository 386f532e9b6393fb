//! Use cases - user story orchestration over the character store.

pub mod advancement;
pub mod creation;
pub mod roster;

pub use advancement::{AdvancementError, AdvancementResult, AdvancementUseCases};
pub use creation::{CreationError, CreationUseCases};
pub use roster::{RosterError, RosterUseCases};
