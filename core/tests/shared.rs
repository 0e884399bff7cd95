//! The process-wide engine.

use namepool_core::{shared, UsedNames};

#[test]
fn shared_engine_ingests_and_generates() {
    shared::reseed(11);
    assert!(shared::ingest("m1,S1,Zhang,2021,90,88.5,1:1:88.5:1:0"));

    let mut used = UsedNames::new();
    assert_eq!(shared::generate_for_region(0, &mut used), "Zhang");
    assert!(!shared::generate_any(0, &mut used).is_empty());

    let global = shared::with_engine(|engine| engine.pools().global().len());
    assert_eq!(global, 1);
}
