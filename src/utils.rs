use validator::ValidationErrors;

use crate::{
  config::AppEnv,
  email::{EmailService, TransportProvider},
};

pub mod error;

/// Validator codes reporting an absent or empty value. They take precedence over format checks
/// on the same field.
const PRESENCE_CODES: [&str; 2] = ["required", "length"];

/// Returns the message of the first failing field, checking fields in the given order.
pub fn first_validation_message(errors: &ValidationErrors, field_order: &[&str]) -> Option<String> {
  let field_errors = errors.field_errors();

  field_order
    .iter()
    .filter_map(|field| field_errors.get(*field))
    .find_map(|errors| {
      let mut errors: Vec<_> = errors.iter().filter(|error| error.message.is_some()).collect();
      errors.sort_by_key(|error| !PRESENCE_CODES.contains(&error.code.as_ref()));
      errors.first().and_then(|error| error.message.as_ref()).map(|message| message.to_string())
    })
}

/// Email service backed by SMTP settings that are read on the first send.
pub fn init_email_service(app_env: AppEnv) -> anyhow::Result<EmailService> {
  let provider = TransportProvider::from_env(app_env.verifies_transport());
  let email_service = EmailService::new(provider)?;
  Ok(email_service)
}

#[cfg(test)]
mod tests {
  use super::*;
  use validator::ValidationError;

  fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
  }

  #[test]
  fn test_first_validation_message_follows_field_order() {
    let mut errors = ValidationErrors::new();
    errors.add("message", error_with_message("length", "Message is required"));
    errors.add("full_name", error_with_message("required", "Full name is required"));

    let message = first_validation_message(&errors, &["full_name", "email", "message"]);
    assert_eq!(message.as_deref(), Some("Full name is required"));
  }

  #[test]
  fn test_first_validation_message_prefers_presence_errors() {
    let mut errors = ValidationErrors::new();
    errors.add("email", error_with_message("contains", "Valid email address is required"));
    errors.add("email", error_with_message("length", "Email is required"));

    let message = first_validation_message(&errors, &["email"]);
    assert_eq!(message.as_deref(), Some("Email is required"));
  }

  #[test]
  fn test_first_validation_message_skips_unlisted_fields() {
    let mut errors = ValidationErrors::new();
    errors.add("subject", error_with_message("length", "Subject is too long"));

    assert_eq!(first_validation_message(&errors, &["email"]), None);
  }

  #[test]
  fn test_first_validation_message_without_message() {
    let mut errors = ValidationErrors::new();
    errors.add("email", ValidationError::new("contains"));

    assert_eq!(first_validation_message(&errors, &["email"]), None);
  }
}
