use async_trait::async_trait;
use std::{error::Error, sync::Arc};
use validator::Validate;

use super::model::{SignupRequest, SIGNUP_FIELD_ORDER};
use crate::{
  email::{EmailError, EmailRequest, EmailService},
  utils::first_validation_message,
};

#[derive(Debug)]
pub enum SignupServiceError {
  ValidationError(String),
  Email(EmailError),
}

impl Error for SignupServiceError {}

impl std::fmt::Display for SignupServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SignupServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      SignupServiceError::Email(e) => write!(f, "Email Error: {}", e),
    }
  }
}

impl From<EmailError> for SignupServiceError {
  fn from(err: EmailError) -> Self {
    SignupServiceError::Email(err)
  }
}

/// A signup that got past the mandatory operator notification.
///
/// The welcome email is best effort, so its result is carried here instead of failing the signup.
#[derive(Debug)]
pub struct SignupOutcome {
  pub confirmation: Result<(), EmailError>,
}

impl SignupOutcome {
  pub fn confirmation_sent(&self) -> bool {
    self.confirmation.is_ok()
  }
}

#[async_trait]
pub trait SignupService: Send + Sync {
  async fn sign_up(&self, req: SignupRequest) -> Result<SignupOutcome, SignupServiceError>;
}

pub struct SignupServiceImpl {
  email_service: Arc<EmailService>,
}

impl SignupServiceImpl {
  pub fn new(email_service: Arc<EmailService>) -> Self {
    Self { email_service }
  }
}

#[async_trait]
impl SignupService for SignupServiceImpl {
  async fn sign_up(&self, req: SignupRequest) -> Result<SignupOutcome, SignupServiceError> {
    req.validate().map_err(|e| {
      SignupServiceError::ValidationError(
        first_validation_message(&e, &SIGNUP_FIELD_ORDER)
          .unwrap_or_else(|| "Valid email address is required".to_string()),
      )
    })?;

    let request = EmailRequest::from(req);
    self.email_service.send_signup_notification(&request).await?;

    let confirmation = self.email_service.send_signup_confirmation(&request.email).await;
    match &confirmation {
      Ok(()) => tracing::info!("Signup completed for {}", request.email),
      Err(e) => tracing::warn!("Confirmation email failed, but signup was successful: {}", e),
    }

    Ok(SignupOutcome { confirmation })
  }
}
