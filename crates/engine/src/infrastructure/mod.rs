//! Infrastructure layer - ports and their adapters.

pub mod clock;
pub mod config;
pub mod locks;
pub mod persistence;
pub mod ports;
