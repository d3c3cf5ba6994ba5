//! Core building blocks: errors, RNG, configuration.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{DeterminizeConfig, SupplyConfig};
pub use error::{Error, Result};
pub use rng::{GameRng, GameRngState};
