use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use adboard_db::DbRuntimeSettings;

/// Startup configuration, read from `ADBOARD_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub db: DbRuntimeSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unset keys take defaults;
    /// set-but-unparseable numbers and a zero pool size are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DbRuntimeSettings::default();

        let pool_max_size = parse_or(&lookup, "ADBOARD_DB_POOL_SIZE", defaults.pool_max_size)?;
        ensure!(pool_max_size > 0, "ADBOARD_DB_POOL_SIZE must be at least 1");

        Ok(Self {
            host: lookup("ADBOARD_HOST").unwrap_or_else(|| "127.0.0.1".into()),
            port: parse_or(&lookup, "ADBOARD_PORT", 5000)?,
            db_path: lookup("ADBOARD_DB_PATH")
                .unwrap_or_else(|| "adboard.db".into())
                .into(),
            db: DbRuntimeSettings {
                pool_max_size,
                busy_timeout_ms: parse_or(
                    &lookup,
                    "ADBOARD_DB_BUSY_TIMEOUT_MS",
                    defaults.busy_timeout_ms,
                )?,
            },
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        None => Ok(default),
    }
}
