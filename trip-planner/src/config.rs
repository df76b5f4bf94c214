//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `TRIP_PLANNER_ADDR` | `127.0.0.1:3000` |
//! | `TRIP_PLANNER_NEAREST_K` | 3 |
//! | `TRIP_PLANNER_MAX_RESULTS` | 10 |
//! | `TRIP_PLANNER_CACHE_TTL_SECS` | 60 (at most one year) |

use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::planner::PlannerConfig;

pub const ADDR_VAR: &str = "TRIP_PLANNER_ADDR";
pub const NEAREST_K_VAR: &str = "TRIP_PLANNER_NEAREST_K";
pub const MAX_RESULTS_VAR: &str = "TRIP_PLANNER_MAX_RESULTS";
pub const CACHE_TTL_VAR: &str = "TRIP_PLANNER_CACHE_TTL_SECS";

/// Longest accepted cache TTL. moka panics on a TTL over a thousand years.
pub const MAX_CACHE_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub planner: PlannerConfig,
    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            planner: PlannerConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's
    /// value if it is set. Unset variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = parse_var(&lookup, ADDR_VAR)? {
            config.addr = addr;
        }
        if let Some(k) = parse_var(&lookup, NEAREST_K_VAR)? {
            config.planner.nearest_k = at_least_one(NEAREST_K_VAR, k)?;
        }
        if let Some(max) = parse_var(&lookup, MAX_RESULTS_VAR)? {
            config.planner.max_results = at_least_one(MAX_RESULTS_VAR, max)?;
        }
        if let Some(secs) = parse_var(&lookup, CACHE_TTL_VAR)? {
            let secs = at_most(CACHE_TTL_VAR, secs, MAX_CACHE_TTL_SECS)?;
            config.cache.ttl = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        })
}

fn at_least_one(var: &'static str, n: usize) -> Result<usize, ConfigError> {
    if n == 0 {
        return Err(ConfigError::Invalid {
            var,
            value: n.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(n)
}

fn at_most(var: &'static str, n: u64, max: u64) -> Result<u64, ConfigError> {
    if n > max {
        return Err(ConfigError::Invalid {
            var,
            value: n.to_string(),
            reason: format!("must be at most {max}"),
        });
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.planner, PlannerConfig::default());
        assert_eq!(config.cache.ttl, Duration::from_secs(60));
    }

    #[test]
    fn reads_every_variable() {
        let config = ServerConfig::from_lookup(lookup(&[
            (ADDR_VAR, "0.0.0.0:8080"),
            (NEAREST_K_VAR, "5"),
            (MAX_RESULTS_VAR, " 20 "),
            (CACHE_TTL_VAR, "300"),
        ]))
        .unwrap();

        assert_eq!(config.addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.planner.nearest_k, 5);
        assert_eq!(config.planner.max_results, 20);
        assert_eq!(config.cache.ttl, Duration::from_secs(300));
    }

    #[test]
    fn rejects_malformed_values() {
        let err = ServerConfig::from_lookup(lookup(&[(NEAREST_K_VAR, "three")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { var: NEAREST_K_VAR, ref value, .. } if value == "three"
        ));

        assert!(ServerConfig::from_lookup(lookup(&[(ADDR_VAR, "localhost")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[(CACHE_TTL_VAR, "-1")])).is_err());
    }

    #[test]
    fn rejects_zero_counts() {
        let err = ServerConfig::from_lookup(lookup(&[(MAX_RESULTS_VAR, "0")])).unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid value \"0\" for TRIP_PLANNER_MAX_RESULTS: must be at least 1"
        );
    }

    #[test]
    fn rejects_oversized_ttl() {
        let err =
            ServerConfig::from_lookup(lookup(&[(CACHE_TTL_VAR, "99999999999")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value \"99999999999\" for TRIP_PLANNER_CACHE_TTL_SECS: must be at most 31536000"
        );

        let year = MAX_CACHE_TTL_SECS.to_string();
        let config = ServerConfig::from_lookup(lookup(&[(CACHE_TTL_VAR, &year)])).unwrap();
        assert_eq!(config.cache.ttl, Duration::from_secs(MAX_CACHE_TTL_SECS));
        crate::cache::PlanCache::new(&config.cache);
    }
}
