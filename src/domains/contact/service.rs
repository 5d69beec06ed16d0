use async_trait::async_trait;
use std::{error::Error, sync::Arc};
use validator::Validate;

use super::model::{ContactRequest, CONTACT_FIELD_ORDER};
use crate::{
  email::{EmailError, EmailRequest, EmailService},
  utils::first_validation_message,
};

#[derive(Debug)]
pub enum ContactServiceError {
  ValidationError(String),
  Email(EmailError),
}

impl Error for ContactServiceError {}

impl std::fmt::Display for ContactServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ContactServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      ContactServiceError::Email(e) => write!(f, "Email Error: {}", e),
    }
  }
}

impl From<EmailError> for ContactServiceError {
  fn from(err: EmailError) -> Self {
    ContactServiceError::Email(err)
  }
}

#[async_trait]
pub trait ContactService: Send + Sync {
  async fn submit(&self, req: ContactRequest) -> Result<(), ContactServiceError>;
}

pub struct ContactServiceImpl {
  email_service: Arc<EmailService>,
}

impl ContactServiceImpl {
  pub fn new(email_service: Arc<EmailService>) -> Self {
    Self { email_service }
  }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
  async fn submit(&self, req: ContactRequest) -> Result<(), ContactServiceError> {
    req.validate().map_err(|e| {
      ContactServiceError::ValidationError(
        first_validation_message(&e, &CONTACT_FIELD_ORDER)
          .unwrap_or_else(|| "Full name, email, and message are all required".to_string()),
      )
    })?;

    let request = EmailRequest::from(req);
    self.email_service.send_contact_notification(&request).await?;

    tracing::info!("Contact form message received from {}", request.email);

    Ok(())
  }
}
