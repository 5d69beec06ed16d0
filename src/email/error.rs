use thiserror::Error;

use crate::config::ConfigError;

/// Failure raised by a [`MailTransport`](super::MailTransport) while handing a message over.
#[derive(Debug, Error)]
pub enum TransportError {
  #[error("invalid mailbox: {0}")]
  Address(#[from] lettre::address::AddressError),
  #[error("could not build message: {0}")]
  Message(#[from] lettre::error::Error),
  #[error("smtp error: {0}")]
  Smtp(#[from] lettre::transport::smtp::Error),
  #[error("transport rejected message: {0}")]
  Rejected(String),
}

#[derive(Debug, Error)]
pub enum EmailError {
  #[error("configuration error: {0}")]
  Configuration(#[from] ConfigError),
  #[error("template error: {0}")]
  Template(#[from] minijinja::Error),
  #[error("failed to send email: {0}")]
  SendFailure(#[from] TransportError),
}
