//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::TimeDelta;

use crate::planner::PlannerConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Error in a configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// JSON network snapshot to load at startup. `None` starts empty.
    pub network_file: Option<PathBuf>,

    /// Whether to reuse built graphs between path queries.
    pub graph_cache: bool,

    pub planner: PlannerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            network_file: None,
            graph_cache: false,
            planner: PlannerConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from `TRANSIT_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value. Unset or empty variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = parse(
            "TRANSIT_BIND_ADDR",
            &get("TRANSIT_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        let graph_cache = match get("TRANSIT_GRAPH_CACHE") {
            Some(v) => parse_bool("TRANSIT_GRAPH_CACHE", &v)?,
            None => false,
        };

        let max_hops = get("TRANSIT_MAX_HOPS")
            .map(|v| parse::<usize>("TRANSIT_MAX_HOPS", &v))
            .transpose()?;

        let stale_after_secs = get("TRANSIT_STALE_AFTER_SECS")
            .map(|v| parse::<i64>("TRANSIT_STALE_AFTER_SECS", &v))
            .transpose()?;
        if let Some(secs) = stale_after_secs {
            let reason = if secs <= 0 {
                Some("must be positive")
            } else if TimeDelta::try_seconds(secs).is_none() {
                Some("too large")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ConfigError {
                    var: "TRANSIT_STALE_AFTER_SECS",
                    value: secs.to_string(),
                    reason: reason.into(),
                });
            }
        }

        Ok(Self {
            bind_addr,
            network_file: get("TRANSIT_NETWORK_FILE").map(PathBuf::from),
            graph_cache,
            planner: PlannerConfig::new(max_hops, stale_after_secs),
        })
    }
}

fn parse<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError {
            var,
            value: value.to_string(),
            reason: "expected true or false".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

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
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn reads_every_variable() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("TRANSIT_BIND_ADDR", "0.0.0.0:8080"),
            ("TRANSIT_NETWORK_FILE", "/srv/network.json"),
            ("TRANSIT_GRAPH_CACHE", "TRUE"),
            ("TRANSIT_MAX_HOPS", "6"),
            ("TRANSIT_STALE_AFTER_SECS", "300"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.network_file, Some(PathBuf::from("/srv/network.json")));
        assert!(config.graph_cache);
        assert_eq!(config.planner, PlannerConfig::new(Some(6), Some(300)));
    }

    #[test]
    fn empty_values_keep_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("TRANSIT_NETWORK_FILE", ""),
            ("TRANSIT_MAX_HOPS", "  "),
        ]))
        .unwrap();
        assert_eq!(config.network_file, None);
        assert_eq!(config.planner.max_hops, None);
    }

    #[test]
    fn invalid_values_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[("TRANSIT_MAX_HOPS", "many")])).unwrap_err();
        assert_eq!(err.var, "TRANSIT_MAX_HOPS");

        let err = ServerConfig::from_lookup(lookup(&[("TRANSIT_BIND_ADDR", "localhost")]))
            .unwrap_err();
        assert_eq!(err.var, "TRANSIT_BIND_ADDR");

        let err =
            ServerConfig::from_lookup(lookup(&[("TRANSIT_GRAPH_CACHE", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("expected true or false"));

        let err = ServerConfig::from_lookup(lookup(&[("TRANSIT_STALE_AFTER_SECS", "0")]))
            .unwrap_err();
        assert_eq!(err.reason, "must be positive");
    }

    #[test]
    fn stale_threshold_must_fit_a_duration() {
        let err = ServerConfig::from_lookup(lookup(&[(
            "TRANSIT_STALE_AFTER_SECS",
            "10000000000000000",
        )]))
        .unwrap_err();
        assert_eq!(err.var, "TRANSIT_STALE_AFTER_SECS");
        assert_eq!(err.reason, "too large");

        let config = ServerConfig::from_lookup(lookup(&[(
            "TRANSIT_STALE_AFTER_SECS",
            "9000000000000000",
        )]))
        .unwrap();
        assert!(config.planner.stale_after().is_some());
    }
}
