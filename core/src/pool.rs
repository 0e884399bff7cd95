//! Weighted name pools and the builder that aggregates parsed rows into them.
//!
//! BUILD ORDER (two passes over one ingestion):
//!   1. Find the newest match id; threshold = max(newest - window, 0).
//!   2. Keep rows with any fact at or above the threshold, a name and a score.
//!   3. Every kept row goes to the global pool, no dedupe, no cap.
//!   4. Each distinct valid region of the row gets the name too, unless that
//!      region is full or already holds the name (first occurrence wins).
//!   5. Weight sums are computed once, after all rows are placed.

use crate::{
    config::NamePoolConfig,
    record::CandidateRow,
    types::{MatchId, RegionKey},
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameRecord {
    pub name:   String,
    pub weight: f64,
}

/// An ordered, immutable sequence of weighted names with a cached weight sum.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeightedPool {
    records:    Vec<NameRecord>,
    weight_sum: f64,
}

impl WeightedPool {
    pub fn from_records(records: Vec<NameRecord>) -> Self {
        let weight_sum = records.iter().map(|r| r.weight).sum();
        Self { records, weight_sum }
    }

    pub fn records(&self) -> &[NameRecord] {
        &self.records
    }

    pub fn weight_sum(&self) -> f64 {
        self.weight_sum
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.name == name)
    }
}

/// The full result of one ingestion: every region pool plus the global pool.
#[derive(Debug, Clone, Default)]
pub struct PoolSet {
    regions:   BTreeMap<usize, WeightedPool>,
    global:    WeightedPool,
    threshold: MatchId,
}

impl PoolSet {
    /// Pool for a region key. Negative or unknown keys have no pool.
    pub fn region(&self, key: RegionKey) -> Option<&WeightedPool> {
        usize::try_from(key).ok().and_then(|k| self.regions.get(&k))
    }

    /// Keys of every region that received at least one name.
    pub fn region_keys(&self) -> Vec<usize> {
        self.regions.keys().copied().collect()
    }

    pub fn has_regions(&self) -> bool {
        !self.regions.is_empty()
    }

    pub fn global(&self) -> &WeightedPool {
        &self.global
    }

    pub fn threshold(&self) -> MatchId {
        self.threshold
    }

    pub fn summary(&self) -> PoolSummary {
        PoolSummary {
            threshold:         self.threshold,
            global_size:       self.global.len(),
            global_weight_sum: self.global.weight_sum(),
            regions: self
                .regions
                .iter()
                .map(|(&key, pool)| RegionSummary {
                    key,
                    size: pool.len(),
                    weight_sum: pool.weight_sum(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PoolSummary {
    pub threshold:         MatchId,
    pub global_size:       usize,
    pub global_weight_sum: f64,
    pub regions:           Vec<RegionSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionSummary {
    pub key:        usize,
    pub size:       usize,
    pub weight_sum: f64,
}

#[derive(Default)]
struct RegionBucket {
    records: Vec<NameRecord>,
    names:   HashSet<String>,
}

pub struct PoolBuilder {
    region_capacity: usize,
    recency_window:  MatchId,
    weight_exponent: f64,
    region_count:    usize,
}

impl PoolBuilder {
    pub fn new(config: &NamePoolConfig) -> Self {
        Self {
            region_capacity: config.region_capacity,
            recency_window:  config.recency_window,
            weight_exponent: config.weight_exponent,
            region_count:    config.regions.len(),
        }
    }

    pub fn weight(&self, score: f64) -> f64 {
        score.max(0.0).powf(self.weight_exponent)
    }

    /// threshold = max(newest match id - window, 0); newest is 0 with no facts.
    pub fn threshold(&self, rows: &[CandidateRow]) -> MatchId {
        let newest = rows
            .iter()
            .filter_map(CandidateRow::max_match_id)
            .max()
            .unwrap_or(0);
        newest.saturating_sub(self.recency_window).max(0)
    }

    /// Build a fresh pool set from scratch.
    pub fn build(&self, rows: &[CandidateRow]) -> PoolSet {
        let threshold = self.threshold(rows);
        let mut buckets: BTreeMap<usize, RegionBucket> = BTreeMap::new();
        let mut global = Vec::new();
        let mut stale = 0usize;
        let mut incomplete = 0usize;

        for row in rows {
            if !row.facts.iter().any(|f| f.match_id >= threshold) {
                stale += 1;
                continue;
            }
            let score = match row.score {
                Some(score) if !row.name.is_empty() => score,
                _ => {
                    incomplete += 1;
                    continue;
                }
            };
            let record = NameRecord {
                name:   row.name.clone(),
                weight: self.weight(score),
            };

            for region in self.regions_of(row) {
                let bucket = buckets.entry(region).or_default();
                if bucket.records.len() >= self.region_capacity
                    || bucket.names.contains(&record.name)
                {
                    continue;
                }
                bucket.names.insert(record.name.clone());
                bucket.records.push(record.clone());
            }
            global.push(record);
        }

        let regions: BTreeMap<usize, WeightedPool> = buckets
            .into_iter()
            .filter(|(_, bucket)| !bucket.records.is_empty())
            .map(|(key, bucket)| (key, WeightedPool::from_records(bucket.records)))
            .collect();

        log::info!(
            "ingest: rows={} threshold={threshold} stale={stale} incomplete={incomplete} \
             global={} regions={}",
            rows.len(),
            global.len(),
            regions.len(),
        );
        for (key, pool) in &regions {
            log::debug!(
                "ingest: region={key} size={} weight_sum={:.2}",
                pool.len(),
                pool.weight_sum()
            );
        }

        PoolSet {
            regions,
            global: WeightedPool::from_records(global),
            threshold,
        }
    }

    /// Distinct region ids of a row that index into the canonical list.
    fn regions_of(&self, row: &CandidateRow) -> BTreeSet<usize> {
        row.facts
            .iter()
            .filter_map(|f| f.region_id)
            .filter_map(|id| usize::try_from(id).ok())
            .filter(|&id| id < self.region_count)
            .collect()
    }
}
