//! Process-wide engine for hosts that want a single shared instance.
//!
//! All access goes through one mutex. A rebuild assembles the new pool
//! set before swapping it in under the lock, so no caller ever sees a
//! half-built pool.

use crate::{
    config::NamePoolConfig,
    engine::NameEngine,
    types::{RegionKey, UsedNames},
};
use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENGINE: Lazy<Mutex<NameEngine>> =
    Lazy::new(|| Mutex::new(NameEngine::new(NamePoolConfig::default(), None)));

fn engine() -> MutexGuard<'static, NameEngine> {
    // A panic mid-draw leaves pools intact; keep serving.
    ENGINE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run `f` with exclusive access to the shared engine.
pub fn with_engine<T>(f: impl FnOnce(&mut NameEngine) -> T) -> T {
    let mut guard = engine();
    f(&mut *guard)
}

pub fn ingest(text: &str) -> bool {
    engine().ingest(text)
}

pub fn reseed(seed: i64) {
    engine().reseed(seed);
}

pub fn generate_for_region(key: RegionKey, used: &mut UsedNames) -> String {
    engine().generate_for_region(key, used)
}

pub fn generate_any(hint: RegionKey, used: &mut UsedNames) -> String {
    engine().generate_any(hint, used)
}
