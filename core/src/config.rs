use crate::error::{PoolError, PoolResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How numeric fields are read from a record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoreParsing {
    /// Read the leading numeric prefix and ignore trailing garbage.
    #[default]
    Lenient,
    /// The whole trimmed field must be a number.
    Strict,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamePoolConfig {
    /// Maximum distinct names per region pool.
    pub region_capacity: usize,
    /// Rows are kept only if they touch a match within this many of the newest.
    pub recency_window: i64,
    /// weight = max(score, 0) ^ weight_exponent
    pub weight_exponent: f64,
    /// Field indices probed for a score, first parseable wins.
    pub score_columns: Vec<usize>,
    /// Field indices probed for a name, first non-empty wins.
    pub name_columns: Vec<usize>,
    pub placeholder_marker: String,
    pub score_parsing: ScoreParsing,
    /// Canonical ordered region list. A region id is an index into it.
    pub regions: Vec<String>,
    /// External region table used by `generate_any`. Empty means `regions`.
    pub display_regions: Vec<String>,
}

impl Default for NamePoolConfig {
    fn default() -> Self {
        Self {
            region_capacity:    30,
            recency_window:     5,
            weight_exponent:    0.9,
            score_columns:      vec![5, 4, 6, 3],
            name_columns:       vec![2, 1],
            placeholder_marker: "Player#".into(),
            score_parsing:      ScoreParsing::Lenient,
            regions:            CANONICAL_REGIONS.iter().map(|r| r.to_string()).collect(),
            display_regions:    Vec::new(),
        }
    }
}

impl NamePoolConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Ok(Self::from_json(&content)?)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(content: &str) -> PoolResult<Self> {
        let config: NamePoolConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PoolResult<()> {
        if self.regions.is_empty() {
            return Err(PoolError::InvalidConfig {
                reason: "region list is empty".into(),
            });
        }
        if self.score_columns.is_empty() || self.name_columns.is_empty() {
            return Err(PoolError::InvalidConfig {
                reason: "score and name column lists must not be empty".into(),
            });
        }
        let mut seen = HashSet::new();
        for name in self.display_table() {
            if !seen.insert(name.as_str()) {
                return Err(PoolError::InvalidConfig {
                    reason: format!("region '{name}' listed twice"),
                });
            }
        }
        Ok(())
    }

    /// The external region table, falling back to the canonical list.
    pub fn display_table(&self) -> &[String] {
        if self.display_regions.is_empty() {
            &self.regions
        } else {
            &self.display_regions
        }
    }

    /// Canonical index of a region name, if known.
    pub fn region_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.regions.iter().position(|r| r == name)
    }
}

/// Built-in canonical region list (provincial-level divisions).
/// NEVER reorder: region ids in the data are indices into this list.
pub const CANONICAL_REGIONS: &[&str] = &[
    "Beijing", "Tianjin", "Hebei", "Shanxi", "Inner Mongolia",
    "Liaoning", "Jilin", "Heilongjiang", "Shanghai", "Jiangsu",
    "Zhejiang", "Anhui", "Fujian", "Jiangxi", "Shandong",
    "Henan", "Hubei", "Hunan", "Guangdong", "Guangxi",
    "Hainan", "Chongqing", "Sichuan", "Guizhou", "Yunnan",
    "Tibet", "Shaanxi", "Gansu", "Qinghai", "Ningxia",
    "Xinjiang", "Hong Kong", "Macau", "Taiwan",
];
