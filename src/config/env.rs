//! Server configuration from environment variables.

use crate::error::ConfigError;
use crate::migration::validate_schema_name;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_BIND: ([u8; 4], u16) = ([0, 0, 0, 0], 3000);
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/coursehub";
pub const DEFAULT_SCHEMA: &str = "coursehub";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Which document store backs the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL at `DATABASE_URL`.
    Postgres,
    /// Process-local store; contents are lost on exit.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub backend: StoreBackend,
    pub database_url: String,
    /// Schema holding the collection tables. Must be a plain SQL identifier.
    pub schema: String,
    pub max_connections: u32,
    pub body_limit: usize,
}

impl ServerConfig {
    /// Read from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or empty keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = parse_or(get("COURSEHUB_BIND"), "COURSEHUB_BIND", SocketAddr::from(DEFAULT_BIND))?;
        let backend = match get("COURSEHUB_STORE") {
            Some(v) => v.parse()?,
            None => StoreBackend::Postgres,
        };
        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let schema = get("COURSEHUB_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
        validate_schema_name(&schema)?;
        let max_connections = parse_or(
            get("DATABASE_MAX_CONNECTIONS"),
            "DATABASE_MAX_CONNECTIONS",
            DEFAULT_MAX_CONNECTIONS,
        )?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DATABASE_MAX_CONNECTIONS",
                message: "must be at least 1".into(),
            });
        }
        let body_limit = parse_or(get("COURSEHUB_BODY_LIMIT"), "COURSEHUB_BODY_LIMIT", DEFAULT_BODY_LIMIT)?;

        Ok(ServerConfig {
            bind,
            backend,
            database_url,
            schema,
            max_connections,
            body_limit,
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            message: format!("'{}': {}", raw, e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset_or_blank() {
        let config = ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(config.bind, SocketAddr::from(DEFAULT_BIND));
        assert_eq!(config.backend, StoreBackend::Postgres);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.schema, DEFAULT_SCHEMA);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.body_limit, DEFAULT_BODY_LIMIT);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("COURSEHUB_BIND", "127.0.0.1:8080"),
            ("COURSEHUB_STORE", "memory"),
            ("COURSEHUB_SCHEMA", "school"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("COURSEHUB_BODY_LIMIT", "1024"),
        ]))
        .unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.backend, StoreBackend::Memory);
        assert_eq!(config.schema, "school");
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.body_limit, 1024);
    }

    #[rstest]
    #[case("COURSEHUB_BIND", "nowhere")]
    #[case("COURSEHUB_STORE", "mongo")]
    #[case("COURSEHUB_SCHEMA", "bad-name")]
    #[case("DATABASE_MAX_CONNECTIONS", "0")]
    #[case("DATABASE_MAX_CONNECTIONS", "many")]
    #[case("COURSEHUB_BODY_LIMIT", "-1")]
    fn invalid_values_are_rejected(#[case] key: &str, #[case] value: &str) {
        assert!(ServerConfig::from_lookup(lookup(&[(key, value)])).is_err());
    }

    #[rstest]
    #[case("postgres", StoreBackend::Postgres)]
    #[case("PostgreSQL", StoreBackend::Postgres)]
    #[case(" memory ", StoreBackend::Memory)]
    fn backend_names(#[case] raw: &str, #[case] expected: StoreBackend) {
        assert_eq!(raw.parse::<StoreBackend>().unwrap(), expected);
    }
}
