use super::{
  composer::MessageComposer,
  error::EmailError,
  transport::{TransportHandle, TransportProvider},
  types::{ComposedMessage, EmailRequest},
};

/// The three outgoing emails of the site. Every operation makes exactly one delivery attempt.
pub struct EmailService {
  provider: TransportProvider,
  composer: MessageComposer,
}

impl EmailService {
  pub fn new(provider: TransportProvider) -> Result<Self, EmailError> {
    Ok(EmailService {
      provider,
      composer: MessageComposer::new()?,
    })
  }

  /// Tells the operator that someone signed up for updates.
  pub async fn send_signup_notification(&self, request: &EmailRequest) -> Result<(), EmailError> {
    let transport = self.provider.get_transport().await?;
    let message = self.composer.compose_signup_notification(transport.config(), request)?;

    self.deliver(&transport, &message, "signup notification").await
  }

  /// Forwards a contact form submission to the operator.
  pub async fn send_contact_notification(&self, request: &EmailRequest) -> Result<(), EmailError> {
    let transport = self.provider.get_transport().await?;
    let message = self.composer.compose_contact_notification(transport.config(), request)?;

    self.deliver(&transport, &message, "contact notification").await
  }

  /// Welcomes a new subscriber.
  pub async fn send_signup_confirmation(&self, email: &str) -> Result<(), EmailError> {
    let transport = self.provider.get_transport().await?;
    let message = self.composer.compose_signup_confirmation(transport.config(), email)?;

    self.deliver(&transport, &message, "signup confirmation").await
  }

  async fn deliver(
    &self,
    transport: &TransportHandle,
    message: &ComposedMessage,
    kind: &str,
  ) -> Result<(), EmailError> {
    match transport.send(message).await {
      Ok(()) => {
        tracing::info!(to = %message.to.address, from = %message.from.address, "Sent {}", kind);
        Ok(())
      }
      Err(e) => {
        tracing::error!(to = %message.to.address, "Error sending {}: {}", kind, e);
        Err(e.into())
      }
    }
  }
}
