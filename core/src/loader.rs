//! Hands raw record text from files and readers to the engine.
//!
//! RULE: Loaders only acquire text. Parsing and pool building stay in
//! the engine, so a failed read never disturbs the current pools.

use crate::{engine::NameEngine, error::PoolResult, pool::PoolSummary};
use std::{io::Read, path::Path};

/// Read `path` and rebuild the engine's pools from it.
pub fn load_path(engine: &mut NameEngine, path: impl AsRef<Path>) -> PoolResult<PoolSummary> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    log::info!("ingest: loaded {} bytes from {}", text.len(), path.display());
    engine.try_ingest(strip_bom(&text))
}

/// Read everything from `reader` and rebuild the engine's pools from it.
pub fn load_reader<R: Read>(engine: &mut NameEngine, mut reader: R) -> PoolResult<PoolSummary> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    engine.try_ingest(strip_bom(&text))
}

/// `load_path` for callers that only care whether pools were rebuilt.
pub fn ingest_path(engine: &mut NameEngine, path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    match load_path(engine, path) {
        Ok(_) => true,
        Err(e) => {
            log::warn!("ingest: {} not loaded, keeping previous pools: {e}", path.display());
            false
        }
    }
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PoolError;

    #[test]
    fn reader_text_is_ingested() {
        let mut engine = NameEngine::with_seed(1);
        let text = "\u{feff}m1,School1,Zhang,2021,90,88.5,1:1:88.5:1:0:0\n";
        let summary = load_reader(&mut engine, text.as_bytes()).unwrap();
        assert_eq!(summary.global_size, 1);
        assert!(engine.pools().region(0).unwrap().contains("Zhang"));
    }

    #[test]
    fn missing_file_leaves_pools_alone() {
        let mut engine = NameEngine::with_seed(1);
        engine.ingest("m1,School1,Zhang,2021,90,88.5,1:1:88.5:1:0:0");
        let err = load_path(&mut engine, "/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, PoolError::Io(_)));
        assert!(!ingest_path(&mut engine, "/definitely/not/here.csv"));
        assert_eq!(engine.pools().global().len(), 1);
    }
}
