use std::fmt;

use lettre::message::Mailbox;
use serde::Serialize;

use crate::config::ConfigError;

const DEFAULT_PORT: u16 = 587;
const DEFAULT_FROM_NAME: &str = "JIDI Institute";

/// SMTP settings, read from the environment the first time a transport is needed.
#[derive(Clone, PartialEq, Eq)]
pub struct TransportConfig {
  pub host: String,
  pub port: u16,
  /// Implicit TLS (usually port 465) instead of STARTTLS.
  pub secure: bool,
  pub user: String,
  pub pass: String,
  pub from_address: String,
  pub from_name: String,
  /// Inbox that receives contact and signup notifications.
  pub operator_address: String,
}

impl TransportConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|name| std::env::var(name).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let required = |name: &'static str| {
      lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(name))
    };
    let optional = |name: &str| lookup(name).filter(|value| !value.is_empty());

    let host = required("EMAIL_HOST")?;
    let user = required("EMAIL_USER")?;
    let pass = required("EMAIL_PASS")?;

    let port = match lookup("EMAIL_PORT").filter(|value| !value.trim().is_empty()) {
      None => DEFAULT_PORT,
      Some(value) => value.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
        name: "EMAIL_PORT",
        value: value.clone(),
        reason: e.to_string(),
      })?,
    };

    let secure = match lookup("EMAIL_SECURE").as_deref() {
      None | Some("") | Some("false") => false,
      Some("true") => true,
      Some(other) => {
        return Err(ConfigError::Invalid {
          name: "EMAIL_SECURE",
          value: other.to_string(),
          reason: "expected \"true\" or \"false\"".to_string(),
        })
      }
    };

    Ok(TransportConfig {
      host,
      port,
      secure,
      from_address: optional("EMAIL_FROM").unwrap_or_else(|| user.clone()),
      from_name: optional("EMAIL_FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
      operator_address: optional("EMAIL_TO").unwrap_or_else(|| user.clone()),
      user,
      pass,
    })
  }

  /// The identity used on mail the site sends in its own name.
  pub fn sender(&self) -> EmailAddress {
    EmailAddress::named(&self.from_name, &self.from_address)
  }

  pub fn operator(&self) -> EmailAddress {
    EmailAddress::bare(&self.operator_address)
  }
}

impl fmt::Debug for TransportConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TransportConfig")
      .field("host", &self.host)
      .field("port", &self.port)
      .field("secure", &self.secure)
      .field("user", &self.user)
      .field("pass", &"<redacted>")
      .field("from_address", &self.from_address)
      .field("from_name", &self.from_name)
      .field("operator_address", &self.operator_address)
      .finish()
  }
}

/// Form data handed from a domain service to a send operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailRequest {
  pub email: String,
  pub message: Option<String>,
  pub full_name: Option<String>,
  pub subject: Option<String>,
}

/// Display name and address, kept unparsed until the message is handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailAddress {
  pub name: Option<String>,
  pub address: String,
}

impl EmailAddress {
  pub fn named(name: &str, address: &str) -> Self {
    EmailAddress {
      name: Some(name.to_string()),
      address: address.to_string(),
    }
  }

  pub fn bare(address: &str) -> Self {
    EmailAddress {
      name: None,
      address: address.to_string(),
    }
  }

  pub fn to_mailbox(&self) -> Result<Mailbox, lettre::address::AddressError> {
    Ok(Mailbox::new(self.name.clone(), self.address.parse()?))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedMessage {
  pub from: EmailAddress,
  pub to: EmailAddress,
  pub reply_to: Option<EmailAddress>,
  pub subject: String,
  pub html: String,
}
