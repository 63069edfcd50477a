//! Process configuration read once from the environment (`.env` honoured by the binary).

use crate::error::ConfigError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_SECRET_KEY: &str = "defaultsecret";
pub const DEFAULT_PORT: u16 = 5000;
/// SQLite file, relative to the working directory.
pub const DATABASE_PATH: &str = "database.db";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Signs flash notices carried in redirect URLs. From `SECRET_KEY`.
    pub secret_key: String,
    pub host: IpAddr,
    /// From `PORT`.
    pub port: u16,
    pub database_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.into());
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };
        Ok(AppConfig {
            secret_key,
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port,
            database_path: PathBuf::from(DATABASE_PATH),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}
