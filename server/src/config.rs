// server/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use dotenvy::dotenv;
use sqlx::postgres::PgConnectOptions;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
  Postgres,
  Memory,
}

impl StorageBackend {
  pub fn as_str(self) -> &'static str {
    match self {
      StorageBackend::Postgres => "postgres",
      StorageBackend::Memory => "memory",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

/// Where the Postgres pool connects: a full URL, or the `DB_*` parts.
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseSettings {
  Url(String),
  Parts {
    user: String,
    password: Option<String>,
    host: String,
    port: u16,
    name: String,
  },
  // memory backend without any database configured
  Unset,
}

// Passwords never reach logs or panic messages.
impl std::fmt::Debug for DatabaseSettings {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      DatabaseSettings::Url(_) => f.write_str("Url([REDACTED])"),
      DatabaseSettings::Parts { user, host, port, name, .. } => f
        .debug_struct("Parts")
        .field("user", user)
        .field("host", host)
        .field("port", port)
        .field("name", name)
        .finish_non_exhaustive(),
      DatabaseSettings::Unset => f.write_str("Unset"),
    }
  }
}

impl DatabaseSettings {
  pub fn connect_options(&self) -> Result<PgConnectOptions> {
    match self {
      DatabaseSettings::Url(url) => {
        PgConnectOptions::from_str(url).map_err(|e| AppError::Config(format!("Invalid DATABASE_URL: {}", e)))
      }
      DatabaseSettings::Parts {
        user,
        password,
        host,
        port,
        name,
      } => {
        let options = PgConnectOptions::new()
          .host(host)
          .port(*port)
          .username(user)
          .database(name);
        Ok(match password {
          Some(password) => options.password(password),
          None => options,
        })
      }
      DatabaseSettings::Unset => Err(AppError::Config(
        "DATABASE_URL or DB_USER/DB_NAME must be set for the postgres backend".to_string(),
      )),
    }
  }
}

#[derive(Clone)] // Clone is useful if parts of config are passed around
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database: DatabaseSettings,
  pub db_max_connections: u32,
  pub db_acquire_timeout: Duration,
  pub storage_backend: StorageBackend,
  pub log_format: LogFormat,
}

impl std::fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("database", &self.database)
      .field("db_max_connections", &self.db_max_connections)
      .field("db_acquire_timeout", &self.db_acquire_timeout)
      .field("storage_backend", &self.storage_backend)
      .field("log_format", &self.log_format)
      .finish()
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source; `from_env` passes the process environment.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let server_host = get("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = get("PORT")
      .or_else(|| get("SERVER_PORT"))
      .unwrap_or_else(|| "3000".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid PORT: {}", e)))?;

    let storage_backend = match get("STORAGE_BACKEND").as_deref().map(str::to_ascii_lowercase).as_deref() {
      None | Some("postgres") => StorageBackend::Postgres,
      Some("memory") => StorageBackend::Memory,
      Some(other) => {
        return Err(AppError::Config(format!(
          "Invalid STORAGE_BACKEND '{}': expected 'postgres' or 'memory'",
          other
        )))
      }
    };

    let database = match get("DATABASE_URL") {
      Some(url) => DatabaseSettings::Url(url),
      None if storage_backend == StorageBackend::Memory && get("DB_USER").is_none() => DatabaseSettings::Unset,
      None => {
        let require = |name: &str| {
          get(name).ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", name)))
        };
        DatabaseSettings::Parts {
          user: require("DB_USER")?,
          password: get("DB_PASSWORD"),
          host: get("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
          port: get("DB_PORT")
            .unwrap_or_else(|| "5432".to_string())
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("Invalid DB_PORT: {}", e)))?,
          name: require("DB_NAME")?,
        }
      }
    };

    let db_max_connections = get("DB_MAX_CONNECTIONS")
      .unwrap_or_else(|| "10".to_string())
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DB_MAX_CONNECTIONS: {}", e)))?;
    let db_acquire_timeout = get("DB_ACQUIRE_TIMEOUT_SECS")
      .unwrap_or_else(|| "5".to_string())
      .parse::<u64>()
      .map(Duration::from_secs)
      .map_err(|e| AppError::Config(format!("Invalid DB_ACQUIRE_TIMEOUT_SECS: {}", e)))?;

    let log_format = match get("LOG_FORMAT").as_deref().map(str::to_ascii_lowercase).as_deref() {
      None | Some("pretty") => LogFormat::Pretty,
      Some("json") => LogFormat::Json,
      Some(other) => {
        return Err(AppError::Config(format!(
          "Invalid LOG_FORMAT '{}': expected 'pretty' or 'json'",
          other
        )))
      }
    };

    Ok(Self {
      server_host,
      server_port,
      database,
      db_max_connections,
      db_acquire_timeout,
      storage_backend,
      log_format,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
