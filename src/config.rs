//! Runtime configuration from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BLOCKFALL_GRAVITY_MS` | 500 |
//! | `BLOCKFALL_SEED` | derived from the clock |
//! | `BLOCKFALL_EVENT_LOG` | unset (no journal) |

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};

use crate::core::SessionConfig;
use crate::types::DEFAULT_GRAVITY_MS;

pub const GRAVITY_MS_VAR: &str = "BLOCKFALL_GRAVITY_MS";
pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const EVENT_LOG_VAR: &str = "BLOCKFALL_EVENT_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub gravity_ms: u32,
    pub seed: u32,
    pub event_log: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gravity_ms: DEFAULT_GRAVITY_MS,
            seed: clock_seed(),
            event_log: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let gravity_ms = match get(GRAVITY_MS_VAR) {
            Some(raw) => {
                let ms: u32 = raw
                    .parse()
                    .with_context(|| format!("{GRAVITY_MS_VAR}={raw:?} is not a whole number of milliseconds"))?;
                if ms == 0 {
                    bail!("{GRAVITY_MS_VAR} must be greater than zero");
                }
                ms
            }
            None => DEFAULT_GRAVITY_MS,
        };

        let seed = match get(SEED_VAR) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("{SEED_VAR}={raw:?} is not a u32"))?,
            None => clock_seed(),
        };

        let event_log = get(EVENT_LOG_VAR).map(PathBuf::from);

        Ok(Self {
            gravity_ms,
            seed,
            event_log,
        })
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            gravity_ms: self.gravity_ms,
            seed: self.seed,
        }
    }
}

fn clock_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(1);
    let folded = (nanos as u64) ^ ((nanos >> 64) as u64);
    ((folded >> 32) as u32 ^ folded as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.gravity_ms, DEFAULT_GRAVITY_MS);
        assert_ne!(config.seed, 0);
        assert_eq!(config.event_log, None);
    }

    #[test]
    fn reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            (GRAVITY_MS_VAR, "250"),
            (SEED_VAR, " 42 "),
            (EVENT_LOG_VAR, "/tmp/blockfall.jsonl"),
        ]))
        .unwrap();
        assert_eq!(config.gravity_ms, 250);
        assert_eq!(config.seed, 42);
        assert_eq!(config.event_log, Some(PathBuf::from("/tmp/blockfall.jsonl")));
        assert_eq!(config.session_config(), SessionConfig { gravity_ms: 250, seed: 42 });
    }

    #[test]
    fn blank_values_are_unset() {
        let config = Config::from_lookup(lookup(&[(EVENT_LOG_VAR, "  "), (GRAVITY_MS_VAR, "")])).unwrap();
        assert_eq!(config.event_log, None);
        assert_eq!(config.gravity_ms, DEFAULT_GRAVITY_MS);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_lookup(lookup(&[(GRAVITY_MS_VAR, "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[(GRAVITY_MS_VAR, "fast")])).is_err());
        assert!(Config::from_lookup(lookup(&[(SEED_VAR, "-3")])).is_err());

        let err = Config::from_lookup(lookup(&[(SEED_VAR, "abc")])).unwrap_err();
        assert!(err.to_string().contains(SEED_VAR));
    }
}
