use std::fmt;
use std::str::FromStr;

use anyhow::Context;

/// Run mode of the process, mirrored by which env file gets loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "development" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" => Ok(Environment::Production),
            other => anyhow::bail!("unknown environment {other:?}"),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which database driver `DATABASE_URL` points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseClient {
    Sqlite,
    Pg,
}

impl FromStr for DatabaseClient {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "sqlite" => Ok(DatabaseClient::Sqlite),
            "pg" => Ok(DatabaseClient::Pg),
            other => anyhow::bail!("unknown database client {other:?}"),
        }
    }
}

impl fmt::Display for DatabaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DatabaseClient::Sqlite => "sqlite",
            DatabaseClient::Pg => "pg",
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub database_client: DatabaseClient,
    pub database_url: String,
    pub port: u16,
}

impl AppConfig {
    /// Reads the configuration from the process environment, failing fast on
    /// anything missing or malformed.
    ///
    /// `APP_ENV` is consulted first so the matching env file can be loaded:
    /// `.env.test` in test mode, `.env` otherwise. The load is best-effort and
    /// never overrides variables already present in the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let env = match std::env::var("APP_ENV") {
            Ok(raw) => raw
                .parse()
                .context("APP_ENV must be one of development, test, production")?,
            Err(_) => Environment::Production,
        };

        match env {
            Environment::Test => {
                dotenvy::from_filename(".env.test").ok();
            }
            _ => {
                dotenvy::dotenv().ok();
            }
        }

        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_client = match std::env::var("DATABASE_CLIENT") {
            Ok(raw) => raw
                .parse()
                .context("DATABASE_CLIENT must be one of sqlite, pg")?,
            Err(_) => DatabaseClient::Sqlite,
        };

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be an integer, got {raw:?}"))?,
            Err(_) => 3333,
        };

        Ok(Self {
            env,
            database_client,
            database_url,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_known_values() {
        assert_eq!(
            "development".parse::<Environment>().unwrap(),
            Environment::Development
        );
        assert_eq!("test".parse::<Environment>().unwrap(), Environment::Test);
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::Production
        );
    }

    #[test]
    fn environment_rejects_unknown_values() {
        assert!("staging".parse::<Environment>().is_err());
        assert!("".parse::<Environment>().is_err());
    }

    #[test]
    fn database_client_parses_known_values() {
        assert_eq!(
            "sqlite".parse::<DatabaseClient>().unwrap(),
            DatabaseClient::Sqlite
        );
        assert_eq!("pg".parse::<DatabaseClient>().unwrap(), DatabaseClient::Pg);
    }

    #[test]
    fn database_client_rejects_unknown_values() {
        assert!("postgres".parse::<DatabaseClient>().is_err());
        assert!("mysql".parse::<DatabaseClient>().is_err());
    }
}
