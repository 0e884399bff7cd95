//! Region-aware name pools built from historical participation records.
//!
//! Raw text flows record -> pool -> sampler, and the engine ties them
//! together behind a fallback chain that always yields a name.

pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod pool;
pub mod record;
pub mod rng;
pub mod sampler;
pub mod shared;
pub mod types;

pub use config::NamePoolConfig;
pub use engine::NameEngine;
pub use error::{PoolError, PoolResult};
pub use rng::{daily_seed, SeededRandom, NATIVE_SEED};
pub use types::UsedNames;
