//! Application configuration loaded from the environment.
//!
//! | Variable                      | Default     |
//! |-------------------------------|-------------|
//! | `BIOLOG_DB_HOST`              | `localhost` |
//! | `BIOLOG_DB_PORT`              | `5432`      |
//! | `BIOLOG_DB_USER`              | required    |
//! | `BIOLOG_DB_PASSWORD`          | unset       |
//! | `BIOLOG_DB_NAME`              | required    |
//! | `BIOLOG_DB_SSLMODE`           | `disable`   |
//! | `BIOLOG_DB_POOL_SIZE`         | `16`        |
//! | `BIOLOG_GOOGLE_CLIENT_ID`     | unset       |
//! | `BIOLOG_GOOGLE_CLIENT_SECRET` | required with client id |
//! | `BIOLOG_REDIRECT_URL`         | required with client id |
//! | `BIOLOG_JWT_KEY`              | required with client id |

use std::str::FromStr;

use tokio_postgres::config::SslMode;

use crate::error::ConfigError;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;
const DEFAULT_POOL_SIZE: usize = 16;

/// Postgres connection settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub dbname: String,
    pub ssl_mode: SslMode,
    pub pool_size: usize,
}

impl DatabaseConfig {
    /// Build a `tokio_postgres::Config` from these settings.
    pub fn to_pg_config(&self) -> tokio_postgres::Config {
        let mut cfg = tokio_postgres::Config::new();
        cfg.host(&self.host)
            .port(self.port)
            .user(&self.user)
            .dbname(&self.dbname)
            .ssl_mode(self.ssl_mode);
        if let Some(password) = &self.password {
            cfg.password(password);
        }
        cfg
    }
}

/// Credentials for the external login flow.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthConfig {
    pub google_client_id: String,
    pub google_client_secret: String,
    pub redirect_url: String,
    pub jwt_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    /// `None` when no Google client id is configured.
    pub auth: Option<AuthConfig>,
}

impl AppConfig {
    /// Load from the process environment, reading `.env` first if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is fine; real environment variables still apply.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let database = DatabaseConfig {
            host: env.get("BIOLOG_DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: env.parse_or("BIOLOG_DB_PORT", DEFAULT_PORT)?,
            user: env.require("BIOLOG_DB_USER")?,
            password: env.get("BIOLOG_DB_PASSWORD"),
            dbname: env.require("BIOLOG_DB_NAME")?,
            ssl_mode: match env.get("BIOLOG_DB_SSLMODE") {
                Some(mode) => parse_ssl_mode(&mode)?,
                None => SslMode::Disable,
            },
            pool_size: env.parse_or("BIOLOG_DB_POOL_SIZE", DEFAULT_POOL_SIZE)?,
        };
        if database.pool_size == 0 {
            return Err(ConfigError::Invalid {
                key: "BIOLOG_DB_POOL_SIZE".into(),
                message: "must be at least 1".into(),
            });
        }

        let auth = match env.get("BIOLOG_GOOGLE_CLIENT_ID") {
            Some(google_client_id) => Some(AuthConfig {
                google_client_id,
                google_client_secret: env.require("BIOLOG_GOOGLE_CLIENT_SECRET")?,
                redirect_url: env.require("BIOLOG_REDIRECT_URL")?,
                jwt_key: env.require("BIOLOG_JWT_KEY")?,
            }),
            None => None,
        };

        Ok(Self { database, auth })
    }
}

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn require(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key: key.to_string(),
                message: e.to_string(),
            }),
            None => Ok(default),
        }
    }
}

fn parse_ssl_mode(raw: &str) -> Result<SslMode, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "disable" => Ok(SslMode::Disable),
        "prefer" => Ok(SslMode::Prefer),
        "require" => Ok(SslMode::Require),
        other => Err(ConfigError::Invalid {
            key: "BIOLOG_DB_SSLMODE".into(),
            message: format!("unsupported sslmode '{other}'"),
        }),
    }
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

    const MINIMAL: &[(&str, &str)] = &[("BIOLOG_DB_USER", "biolog"), ("BIOLOG_DB_NAME", "biolog")];

    #[test]
    fn defaults_apply() {
        let cfg = AppConfig::from_lookup(lookup(MINIMAL)).unwrap();
        assert_eq!(cfg.database.host, "localhost");
        assert_eq!(cfg.database.port, 5432);
        assert_eq!(cfg.database.ssl_mode, SslMode::Disable);
        assert_eq!(cfg.database.pool_size, 16);
        assert_eq!(cfg.database.password, None);
        assert!(cfg.auth.is_none());
    }

    #[test]
    fn missing_user_is_reported() {
        let err = AppConfig::from_lookup(lookup(&[("BIOLOG_DB_NAME", "biolog")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "BIOLOG_DB_USER"));
    }

    #[test]
    fn bad_port_is_invalid() {
        let mut pairs = MINIMAL.to_vec();
        pairs.push(("BIOLOG_DB_PORT", "not-a-port"));
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "BIOLOG_DB_PORT"));
    }

    #[test]
    fn zero_pool_size_is_invalid() {
        let mut pairs = MINIMAL.to_vec();
        pairs.push(("BIOLOG_DB_POOL_SIZE", "0"));
        assert!(AppConfig::from_lookup(lookup(&pairs)).is_err());
    }

    #[test]
    fn sslmode_parses() {
        let mut pairs = MINIMAL.to_vec();
        pairs.push(("BIOLOG_DB_SSLMODE", "Require"));
        let cfg = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(cfg.database.ssl_mode, SslMode::Require);

        let mut pairs = MINIMAL.to_vec();
        pairs.push(("BIOLOG_DB_SSLMODE", "verify-full"));
        assert!(AppConfig::from_lookup(lookup(&pairs)).is_err());
    }

    #[test]
    fn auth_requires_all_keys_once_enabled() {
        let mut pairs = MINIMAL.to_vec();
        pairs.push(("BIOLOG_GOOGLE_CLIENT_ID", "client"));
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(
            matches!(err, ConfigError::MissingEnvVar(ref k) if k == "BIOLOG_GOOGLE_CLIENT_SECRET")
        );

        pairs.extend([
            ("BIOLOG_GOOGLE_CLIENT_SECRET", "secret"),
            ("BIOLOG_REDIRECT_URL", "http://localhost:8080/auth/callback"),
            ("BIOLOG_JWT_KEY", "signing-key"),
        ]);
        let auth = AppConfig::from_lookup(lookup(&pairs)).unwrap().auth.unwrap();
        assert_eq!(auth.google_client_id, "client");
        assert_eq!(auth.jwt_key, "signing-key");
    }

    #[test]
    fn pg_config_carries_settings() {
        let mut pairs = MINIMAL.to_vec();
        pairs.extend([("BIOLOG_DB_PASSWORD", "pw"), ("BIOLOG_DB_PORT", "6543")]);
        let cfg = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        let pg = cfg.database.to_pg_config();
        assert_eq!(pg.get_user(), Some("biolog"));
        assert_eq!(pg.get_dbname(), Some("biolog"));
        assert_eq!(pg.get_ports(), &[6543]);
        assert_eq!(pg.get_password(), Some(&b"pw"[..]));
    }
}
