//! The name engine: owns the pools and the random source.
//!
//! FALLBACK CHAIN (fixed, never reordered):
//!   1. Region pool for `key`, or for `key - 1` when `key` has none
//!   2. Global pool
//!   3. Synthetic placeholder
//!
//! RULES:
//!   - Generation never fails; every call returns a non-empty name.
//!   - Ingestion swaps in a complete pool set or leaves the old one alone.
//!   - The used-name set belongs to the caller and is never stored here.

use crate::{
    config::NamePoolConfig,
    error::{PoolError, PoolResult},
    pool::{PoolBuilder, PoolSet, PoolSummary, WeightedPool},
    record::RecordParser,
    rng::SeededRandom,
    sampler::WeightedSampler,
    types::{RegionKey, UsedNames},
};

/// Upper bound of the random suffix on synthetic names.
const SYNTHETIC_SUFFIX_MAX: i64 = 999_999;

pub struct NameEngine {
    config:  NamePoolConfig,
    parser:  RecordParser,
    builder: PoolBuilder,
    pools:   PoolSet,
    rng:     SeededRandom,
}

impl NameEngine {
    /// `seed` of `None` derives one from the clock; `Some(NATIVE_SEED)`
    /// selects the non-reproducible source.
    pub fn new(config: NamePoolConfig, seed: Option<i64>) -> Self {
        Self {
            parser:  RecordParser::new(&config),
            builder: PoolBuilder::new(&config),
            pools:   PoolSet::default(),
            rng:     SeededRandom::from_optional(seed),
            config,
        }
    }

    /// Validate the config first, then build.
    pub fn build(config: NamePoolConfig, seed: Option<i64>) -> PoolResult<Self> {
        config.validate()?;
        Ok(Self::new(config, seed))
    }

    /// Default config with a fixed seed. Used by tests and tooling.
    pub fn with_seed(seed: i64) -> Self {
        Self::new(NamePoolConfig::default(), Some(seed))
    }

    pub fn config(&self) -> &NamePoolConfig {
        &self.config
    }

    pub fn pools(&self) -> &PoolSet {
        &self.pools
    }

    pub fn rng(&mut self) -> &mut SeededRandom {
        &mut self.rng
    }

    /// Replace the random source. Pools are untouched.
    pub fn reseed(&mut self, seed: i64) {
        log::debug!("resolver: reseed seed={seed}");
        self.rng = SeededRandom::new(seed);
    }

    /// Rebuild every pool from `text`. On error the previous pools stay.
    pub fn try_ingest(&mut self, text: &str) -> PoolResult<PoolSummary> {
        let rows = self.parser.parse_text(text);
        if rows.is_empty() {
            return Err(PoolError::NoRecords);
        }
        let pools = self.builder.build(&rows);
        if pools.global().is_empty() {
            return Err(PoolError::EmptyBuild { rows: rows.len() });
        }
        self.pools = pools;
        Ok(self.pools.summary())
    }

    /// Like `try_ingest`, but reports failure as `false` instead of an error.
    pub fn ingest(&mut self, text: &str) -> bool {
        match self.try_ingest(text) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("ingest: build failed, keeping previous pools: {e}");
                false
            }
        }
    }

    /// A name for region `key`. Always returns, and records the name in `used`.
    pub fn generate_for_region(&mut self, key: RegionKey, used: &mut UsedNames) -> String {
        self.resolve(Some(key), used)
    }

    /// A name for a region given by display name. Unknown names draw globally.
    pub fn generate_for_region_name(&mut self, name: &str, used: &mut UsedNames) -> String {
        let key = self.region_key(name);
        if key.is_none() {
            log::debug!("resolver: unknown region '{name}', using global pool");
        }
        self.resolve(key, used)
    }

    /// A name for a region hint: negative picks any region that has a pool,
    /// otherwise the hint indexes the external region table.
    pub fn generate_any(&mut self, hint: RegionKey, used: &mut UsedNames) -> String {
        if !self.pools.has_regions() {
            return self.synthetic_name(used);
        }
        let key = if hint < 0 {
            let keys = self.pools.region_keys();
            let pick = self.rng.uniform_int(0, keys.len() as i64 - 1) as usize;
            keys[pick] as RegionKey
        } else {
            self.display_key(hint)
        };
        self.generate_for_region(key, used)
    }

    /// Canonical key for an external display name.
    pub fn region_key(&self, name: &str) -> Option<RegionKey> {
        self.config.region_index(name).map(|i| i as RegionKey)
    }

    /// Map an index into the external table onto the canonical list.
    /// Hints outside the table, or naming no canonical region, pass through.
    fn display_key(&self, hint: RegionKey) -> RegionKey {
        usize::try_from(hint)
            .ok()
            .and_then(|i| self.config.display_table().get(i))
            .and_then(|name| self.region_key(name))
            .unwrap_or(hint)
    }

    fn resolve(&mut self, key: Option<RegionKey>, used: &mut UsedNames) -> String {
        let pools = &self.pools;
        let seen: &UsedNames = used;
        let chain = [key.and_then(|k| region_pool(pools, k)), Some(pools.global())];
        let drawn = chain
            .into_iter()
            .flatten()
            .find_map(|pool| WeightedSampler::draw(pool, seen, &mut self.rng))
            .map(str::to_owned);

        match drawn {
            Some(name) => {
                used.insert(name.clone());
                name
            }
            None => self.synthetic_name(used),
        }
    }

    /// Placeholder name not yet in `used`; it is registered there.
    fn synthetic_name(&mut self, used: &mut UsedNames) -> String {
        loop {
            let suffix = self.rng.uniform_int(0, SYNTHETIC_SUFFIX_MAX);
            let name = format!("{}{suffix}", self.config.placeholder_marker);
            if used.insert(name.clone()) {
                log::debug!("resolver: no pooled name left, using {name}");
                return name;
            }
        }
    }
}

/// Pool for `key`, else for `key - 1` (one-based keys).
fn region_pool(pools: &PoolSet, key: RegionKey) -> Option<&WeightedPool> {
    pools
        .region(key)
        .or_else(|| key.checked_sub(1).and_then(|k| pools.region(k)))
}
