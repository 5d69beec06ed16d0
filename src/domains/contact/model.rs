use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::email::EmailRequest;

/// Validation keys in the order their messages are reported. Both the Rust and the serde name of
/// `full_name` are listed since either may key its errors.
pub const CONTACT_FIELD_ORDER: [&str; 4] = ["full_name", "fullName", "email", "message"];

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
  #[validate(
    required(message = "Full name is required"),
    length(min = 1, message = "Full name is required")
  )]
  pub full_name: Option<String>,
  #[validate(
    required(message = "Email is required"),
    length(min = 1, message = "Email is required"),
    contains(pattern = "@", message = "Valid email address is required")
  )]
  pub email: Option<String>,
  #[validate(
    required(message = "Message is required"),
    length(min = 1, message = "Message is required")
  )]
  pub message: Option<String>,
}

impl From<ContactRequest> for EmailRequest {
  fn from(req: ContactRequest) -> Self {
    EmailRequest {
      email: req.email.unwrap_or_default(),
      message: req.message,
      full_name: req.full_name,
      subject: None,
    }
  }
}
