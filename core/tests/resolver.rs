//! The fallback chain: region, region - 1, global, synthetic.

use namepool_core::{NameEngine, UsedNames};

const RECORDS: &str = "\
m1,S1,Zhang,2021,90,88.5,1:1:88.5:1:0
m2,S2,Li,2021,80,70,1:2:70:2:0
m3,S3,Wang,2021,85,60,1:3:60:3:4";

fn engine() -> NameEngine {
    let mut engine = NameEngine::with_seed(2024);
    assert!(engine.ingest(RECORDS));
    engine
}

#[test]
fn one_based_key_falls_back_to_previous_region() {
    let mut engine = engine();
    let mut used = UsedNames::new();
    assert_eq!(engine.generate_for_region(5, &mut used), "Wang");
}

#[test]
fn unknown_region_uses_global_pool() {
    let mut engine = engine();
    let mut used = UsedNames::new();
    let name = engine.generate_for_region(20, &mut used);
    assert!(["Zhang", "Li", "Wang"].contains(&name.as_str()), "got {name}");
}

#[test]
fn exhausting_everything_yields_synthetic_names() {
    let mut engine = engine();
    let mut used = UsedNames::new();
    let names: Vec<String> = (0..6).map(|_| engine.generate_for_region(0, &mut used)).collect();

    assert!(names[..3].iter().all(|n| !n.starts_with("Player#")));
    assert!(names[3..].iter().all(|n| n.starts_with("Player#")));
    assert_eq!(used.len(), 6, "every name must be registered and distinct");
}

#[test]
fn no_pools_means_synthetic_from_generate_any() {
    let mut engine = NameEngine::with_seed(9);
    let mut used = UsedNames::new();
    let name = engine.generate_any(-1, &mut used);
    assert!(name.starts_with("Player#"), "got {name}");
    assert!(used.contains(&name));
}

#[test]
fn empty_ingest_still_generates() {
    let mut engine = NameEngine::with_seed(10);
    assert!(!engine.ingest(""));
    let mut used = UsedNames::new();
    let name = engine.generate_for_region(0, &mut used);
    assert!(name.starts_with("Player#"));
}

#[test]
fn generation_never_returns_empty() {
    let mut engine = engine();
    let mut used = UsedNames::new();
    for hint in -3..40 {
        assert!(!engine.generate_any(hint, &mut used).is_empty());
        assert!(!engine.generate_for_region(hint, &mut used).is_empty());
    }
}
