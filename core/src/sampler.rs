//! Weighted draws of unused names from a pool.
//!
//! A draw degrades rather than fails:
//!   - weight sum <= 0: uniform choice among unused names
//!   - weighted hit on a used name: first unused name in pool order
//!   - nothing unused left: no candidate
//!
//! The sampler never records what it returns; callers add the name
//! to their used set before the next draw.

use crate::{pool::WeightedPool, rng::SeededRandom, types::UsedNames};

pub struct WeightedSampler;

impl WeightedSampler {
    /// Draw one name not in `used`, or `None` if the pool has none left.
    pub fn draw<'a>(
        pool: &'a WeightedPool,
        used: &UsedNames,
        rng: &mut SeededRandom,
    ) -> Option<&'a str> {
        if pool.is_empty() {
            return None;
        }
        if pool.weight_sum() <= 0.0 {
            return Self::draw_uniform(pool, used, rng);
        }

        let candidate = Self::weighted_hit(pool, rng);
        if used.contains(candidate) {
            return Self::first_unused(pool, used);
        }
        Some(candidate)
    }

    fn weighted_hit<'a>(pool: &'a WeightedPool, rng: &mut SeededRandom) -> &'a str {
        let r = rng.uniform(0.0, pool.weight_sum());
        let mut cumulative = 0.0;
        for record in pool.records() {
            cumulative += record.weight;
            if cumulative >= r {
                return &record.name;
            }
        }
        // Rounding can leave r just above the running total.
        pool.records()
            .last()
            .map(|last| last.name.as_str())
            .unwrap_or_default()
    }

    fn draw_uniform<'a>(
        pool: &'a WeightedPool,
        used: &UsedNames,
        rng: &mut SeededRandom,
    ) -> Option<&'a str> {
        let unused: Vec<&str> = pool
            .records()
            .iter()
            .map(|r| r.name.as_str())
            .filter(|name| !used.contains(*name))
            .collect();
        if unused.is_empty() {
            return None;
        }
        let index = rng.uniform_int(0, unused.len() as i64 - 1) as usize;
        Some(unused[index])
    }

    fn first_unused<'a>(pool: &'a WeightedPool, used: &UsedNames) -> Option<&'a str> {
        pool.records()
            .iter()
            .map(|r| r.name.as_str())
            .find(|name| !used.contains(*name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::NameRecord;

    fn pool(entries: &[(&str, f64)]) -> WeightedPool {
        WeightedPool::from_records(
            entries
                .iter()
                .map(|(name, weight)| NameRecord { name: name.to_string(), weight: *weight })
                .collect(),
        )
    }

    fn used(names: &[&str]) -> UsedNames {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn empty_pool_has_no_candidate() {
        let mut rng = SeededRandom::new(1);
        assert_eq!(WeightedSampler::draw(&pool(&[]), &used(&[]), &mut rng), None);
    }

    #[test]
    fn used_hit_redirects_to_first_unused() {
        let p = pool(&[("A", 5.0), ("B", 5.0)]);
        let u = used(&["A"]);
        for seed in 0..200 {
            let mut rng = SeededRandom::new(seed);
            assert_eq!(WeightedSampler::draw(&p, &u, &mut rng), Some("B"), "seed {seed}");
        }
    }

    #[test]
    fn exhausted_pool_has_no_candidate() {
        let p = pool(&[("A", 5.0), ("B", 0.0)]);
        let mut rng = SeededRandom::new(3);
        assert_eq!(WeightedSampler::draw(&p, &used(&["A", "B"]), &mut rng), None);
    }

    #[test]
    fn zero_weight_pool_draws_uniformly_among_unused() {
        let p = pool(&[("A", 0.0), ("B", 0.0), ("C", 0.0)]);
        let u = used(&["B"]);
        let mut rng = SeededRandom::new(11);
        let mut seen_a = false;
        let mut seen_c = false;
        for _ in 0..200 {
            match WeightedSampler::draw(&p, &u, &mut rng) {
                Some("A") => seen_a = true,
                Some("C") => seen_c = true,
                other => panic!("unexpected draw {other:?}"),
            }
        }
        assert!(seen_a && seen_c);
    }

    #[test]
    fn heavier_names_are_drawn_more_often() {
        let p = pool(&[("Light", 1.0), ("Heavy", 99.0)]);
        let u = used(&[]);
        let mut rng = SeededRandom::new(2024);
        let heavy = (0..2_000)
            .filter(|_| WeightedSampler::draw(&p, &u, &mut rng) == Some("Heavy"))
            .count();
        assert!(heavy > 1_800, "Heavy drawn only {heavy} of 2000 times");
    }

    #[test]
    fn zero_weight_entries_never_win_weighted_draw() {
        let p = pool(&[("Zero", 0.0), ("One", 1.0)]);
        let u = used(&[]);
        let mut rng = SeededRandom::new(8);
        for _ in 0..500 {
            assert_eq!(WeightedSampler::draw(&p, &u, &mut rng), Some("One"));
        }
    }
}
