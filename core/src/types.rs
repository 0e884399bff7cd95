//! Shared primitive types used across the name pool engine.

use std::collections::HashSet;

/// Identifier of one historical match (contest round).
pub type MatchId = i64;

/// Internal key of a region pool: an index into the canonical region list.
/// Signed so that external one-based keys and negative hints pass through.
pub type RegionKey = i64;

/// Names already handed out during one generation session. Owned by the caller.
pub type UsedNames = HashSet<String>;
