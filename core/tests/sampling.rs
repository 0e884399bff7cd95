//! Weighted draws against hand-built pools.

use namepool_core::{
    pool::{NameRecord, WeightedPool},
    sampler::WeightedSampler,
    SeededRandom, UsedNames,
};

fn pool(entries: &[(&str, f64)]) -> WeightedPool {
    WeightedPool::from_records(
        entries
            .iter()
            .map(|(name, weight)| NameRecord { name: name.to_string(), weight: *weight })
            .collect(),
    )
}

#[test]
fn used_weighted_hit_always_yields_the_other_name() {
    let p = pool(&[("A", 5.0), ("B", 5.0)]);
    let used: UsedNames = ["A".to_string()].into_iter().collect();
    let mut rng = SeededRandom::new(99);
    for _ in 0..1_000 {
        assert_eq!(WeightedSampler::draw(&p, &used, &mut rng), Some("B"));
    }
}

#[test]
fn draws_until_exhausted_then_none() {
    let p = pool(&[("A", 3.0), ("B", 1.0), ("C", 0.5), ("D", 0.0)]);
    let mut used = UsedNames::new();
    let mut rng = SeededRandom::new(5);
    for _ in 0..4 {
        let name = WeightedSampler::draw(&p, &used, &mut rng).expect("unused name remains");
        assert!(used.insert(name.to_string()), "{name} returned twice");
    }
    assert_eq!(WeightedSampler::draw(&p, &used, &mut rng), None);
}

#[test]
fn frequencies_follow_weights() {
    let p = pool(&[("A", 1.0), ("B", 3.0)]);
    let used = UsedNames::new();
    let mut rng = SeededRandom::new(123);
    let n = 20_000;
    let b = (0..n)
        .filter(|_| WeightedSampler::draw(&p, &used, &mut rng) == Some("B"))
        .count();
    let share = b as f64 / n as f64;
    assert!((share - 0.75).abs() < 0.02, "B share {share:.3}, expected ~0.75");
}
