//! Outgoing mail for the contact and signup forms
//!
//! Messages are rendered from HTML templates and delivered over SMTP with lettre.
//! A single transport is opened lazily and shared by every send.

mod composer;
mod error;
mod service;
mod transport;
mod types;

pub use composer::MessageComposer;
pub use error::{EmailError, TransportError};
pub use service::EmailService;
pub use transport::{MailTransport, SmtpMailTransport, TransportHandle, TransportProvider};
pub use types::{ComposedMessage, EmailAddress, EmailRequest, TransportConfig};
