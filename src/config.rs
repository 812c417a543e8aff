use std::net::{Ipv4Addr, SocketAddr};
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://spirit11.db";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HASH_COST: u32 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not in the correct format: {value}")]
    Invalid { var: &'static str, value: String },
    #[error("BCRYPT_COST must be between 4 and 31, got {0}")]
    HashCostOutOfRange(u32),
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: Ipv4Addr,
    pub port: u16,
    pub hash_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset variables fall back to defaults; set but malformed ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let host = parse_var(&lookup, "HOST", Ipv4Addr::UNSPECIFIED)?;
        let port = parse_var(&lookup, "PORT", DEFAULT_PORT)?;
        let hash_cost = parse_var(&lookup, "BCRYPT_COST", DEFAULT_HASH_COST)?;

        if !(4..=31).contains(&hash_cost) {
            return Err(ConfigError::HashCostOutOfRange(hash_cost));
        }

        Ok(Self {
            database_url,
            host,
            port,
            hash_cost,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.port, 5000);
        assert_eq!(config.hash_cost, 10);
        assert_eq!(config.addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("BCRYPT_COST", "12"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.hash_cost, 12);
    }

    #[test]
    fn malformed_port_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "five thousand")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
    }

    #[test]
    fn hash_cost_must_be_in_bcrypt_range() {
        let err = Config::from_lookup(lookup_from(&[("BCRYPT_COST", "3")])).unwrap_err();
        assert!(matches!(err, ConfigError::HashCostOutOfRange(3)));
    }
}
