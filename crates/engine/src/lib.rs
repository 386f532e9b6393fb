//! Holocron Engine library.
//!
//! Everything around the pure advancement rules in `holocron-domain`.
//!
//! ## Structure
//!
//! - `infrastructure/` - Ports, storage adapters, locks and configuration
//! - `use_cases/` - Load, apply and save orchestration over the character store
//! - `cli` - Command line surface
//! - `app` - Application composition

pub mod app;
pub mod cli;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
