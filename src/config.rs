use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Failure raised while reading settings from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
  #[error("{0} environment variable must be set")]
  Missing(&'static str),
  #[error("{name} has an invalid value {value:?}: {reason}")]
  Invalid {
    name: &'static str,
    value: String,
    reason: String,
  },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppEnv {
  Production,
  #[default]
  Development,
}

impl AppEnv {
  /// Anything other than `production` runs as development.
  pub fn parse(value: &str) -> Self {
    if value.eq_ignore_ascii_case("production") {
      AppEnv::Production
    } else {
      AppEnv::Development
    }
  }

  /// Development builds check the SMTP connection as soon as it is opened.
  pub fn verifies_transport(self) -> bool {
    self != AppEnv::Production
  }
}

/// Server settings read once at startup. Mail settings are read lazily by the transport provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub bind_address: SocketAddr,
  pub app_env: AppEnv,
  pub cors_allowed_origin: Option<String>,
}

impl Settings {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|name| std::env::var(name).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let host = match lookup("BIND_HOST") {
      None => IpAddr::from([0, 0, 0, 0]),
      Some(value) => value.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
        name: "BIND_HOST",
        value: value.clone(),
        reason: e.to_string(),
      })?,
    };

    let port = match lookup("PORT") {
      None => 8000,
      Some(value) => value.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
        name: "PORT",
        value: value.clone(),
        reason: e.to_string(),
      })?,
    };

    Ok(Settings {
      bind_address: SocketAddr::new(host, port),
      app_env: lookup("APP_ENV").map(|value| AppEnv::parse(&value)).unwrap_or_default(),
      cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN").filter(|value| !value.is_empty()),
    })
  }
}
