//! Process configuration, read from the environment at startup.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `PORT` | `3001` | listen port |
//! | `BIND_ADDR` | `0.0.0.0` | listen address |
//! | `DATABASE_URL` | unset | Postgres connection string; unset means in-memory store |

use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    pub port: u16,
    pub bind_addr: String,
    #[serde(default)]
    pub database_url: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::from_env(config::Environment::default())
    }

    /// Build from an explicit environment source (tests pass a fixed map).
    pub fn from_env(env: config::Environment) -> Result<Self, config::ConfigError> {
        let cfg: Self = config::Config::builder()
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("bind_addr", DEFAULT_BIND_ADDR)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            database_url: cfg.database_url.filter(|url| !url.trim().is_empty()),
            ..cfg
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::default().source(Some(map))
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let cfg = AppConfig::from_env(env(&[])).unwrap();
        assert_eq!(cfg.port, 3001);
        assert_eq!(cfg.bind_addr, "0.0.0.0");
        assert_eq!(cfg.database_url, None);
        assert_eq!(cfg.listen_addr(), "0.0.0.0:3001");
    }

    #[test]
    fn reads_port_and_database_url() {
        let cfg = AppConfig::from_env(env(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/stockroom"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(
            cfg.database_url.as_deref(),
            Some("postgres://localhost/stockroom")
        );
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        let cfg = AppConfig::from_env(env(&[("DATABASE_URL", "")])).unwrap();
        assert_eq!(cfg.database_url, None);
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(AppConfig::from_env(env(&[("PORT", "http")])).is_err());
    }
}
