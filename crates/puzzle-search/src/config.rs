//! Search budgets passed explicitly to each A* run.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Expansion and wall-clock budgets for one search.
///
/// Both limits are strictly positive; construct through [`SearchConfig::new`]
/// or deserialize, which runs the same validation.
///
/// ```
/// use puzzle_search::SearchConfig;
/// use std::time::Duration;
///
/// let json = r#"{"max_expansions": 500, "timeout_ms": 250}"#;
/// let config = SearchConfig::from_json_str(json).unwrap();
/// assert_eq!(config.max_expansions(), 500);
/// assert_eq!(config.timeout(), Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSearchConfig", into = "RawSearchConfig")]
pub struct SearchConfig {
    max_expansions: u64,
    timeout: Duration,
}

impl SearchConfig {
    pub fn new(max_expansions: u64, timeout: Duration) -> Result<Self, ConfigError> {
        if max_expansions == 0 {
            return Err(ConfigError::ZeroExpansions);
        }
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self {
            max_expansions,
            timeout,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Hard cap on expanded nodes.
    pub fn max_expansions(&self) -> u64 {
        self.max_expansions
    }

    /// Wall-clock deadline measured from the start of the search.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn with_max_expansions(self, max_expansions: u64) -> Result<Self, ConfigError> {
        Self::new(max_expansions, self.timeout)
    }

    pub fn with_timeout(self, timeout: Duration) -> Result<Self, ConfigError> {
        Self::new(self.max_expansions, timeout)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_expansions: 10_000,
            timeout: Duration::from_secs(120),
        }
    }
}

/// On-disk shape of [`SearchConfig`]; missing fields take the defaults.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSearchConfig {
    #[serde(default = "default_max_expansions")]
    max_expansions: u64,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

fn default_max_expansions() -> u64 {
    SearchConfig::default().max_expansions
}

fn default_timeout_ms() -> u64 {
    SearchConfig::default().timeout.as_millis() as u64
}

impl TryFrom<RawSearchConfig> for SearchConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSearchConfig) -> Result<Self, Self::Error> {
        SearchConfig::new(raw.max_expansions, Duration::from_millis(raw.timeout_ms))
    }
}

impl From<SearchConfig> for RawSearchConfig {
    fn from(config: SearchConfig) -> Self {
        Self {
            max_expansions: config.max_expansions,
            timeout_ms: config.timeout.as_millis() as u64,
        }
    }
}
