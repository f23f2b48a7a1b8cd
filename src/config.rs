//! Service configuration: built-in defaults, optionally overridden from the environment.
//!
//! With no environment set the service listens on `0.0.0.0:8080` and connects
//! to the built-in database constants.

use sqlx::postgres::PgConnectOptions;
use std::str::FromStr;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_DB_PASSWORD: &str = "postgres";
pub const DEFAULT_DB_NAME: &str = "neftdobycha";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq)]
pub struct DatabaseConfig {
    /// Full connection URL; takes precedence over the discrete fields when set.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            url: None,
            host: DEFAULT_DB_HOST.into(),
            port: DEFAULT_DB_PORT,
            user: DEFAULT_DB_USER.into(),
            password: DEFAULT_DB_PASSWORD.into(),
            name: DEFAULT_DB_NAME.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url);
        }
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServiceConfig {
    pub listen_addr: String,
    pub database: DatabaseConfig,
    pub max_body_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            listen_addr: DEFAULT_LISTEN_ADDR.into(),
            database: DatabaseConfig::default(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServiceConfig {
    /// Load `.env` if present, then apply overrides from the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; unparsable numbers fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = ServiceConfig::default();
        let db = defaults.database;
        ServiceConfig {
            listen_addr: lookup("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
                host: lookup("DB_HOST").unwrap_or(db.host),
                port: lookup("DB_PORT").and_then(|s| s.parse().ok()).unwrap_or(db.port),
                user: lookup("DB_USER").unwrap_or(db.user),
                password: lookup("DB_PASSWORD").unwrap_or(db.password),
                name: lookup("DB_NAME").unwrap_or(db.name),
                max_connections: lookup("DB_MAX_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(db.max_connections),
            },
            max_body_bytes: lookup("MAX_BODY_BYTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_environment_yields_constants() {
        let config = ServiceConfig::from_lookup(|_| None);
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.database.port, 5432);
    }

    #[test]
    fn overrides_apply_and_bad_numbers_fall_back() {
        let env: HashMap<&str, &str> = [
            ("LISTEN_ADDR", "127.0.0.1:9000"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "not-a-port"),
            ("DB_MAX_CONNECTIONS", "12"),
        ]
        .into_iter()
        .collect();
        let config = ServiceConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, DEFAULT_DB_PORT);
        assert_eq!(config.database.max_connections, 12);
        assert_eq!(config.database.url, None);
    }

    #[test]
    fn database_url_takes_precedence() {
        let config = DatabaseConfig {
            url: Some("postgres://u:p@example.org:6543/wells".into()),
            ..DatabaseConfig::default()
        };
        let opts = config.connect_options().unwrap();
        assert_eq!(opts.get_host(), "example.org");
        assert_eq!(opts.get_port(), 6543);
        assert_eq!(opts.get_database(), Some("wells"));
    }

    #[test]
    fn discrete_fields_build_options() {
        let opts = DatabaseConfig::default().connect_options().unwrap();
        assert_eq!(opts.get_host(), "localhost");
        assert_eq!(opts.get_username(), "postgres");
        assert_eq!(opts.get_database(), Some("neftdobycha"));
    }
}
