use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::email::EmailRequest;

pub const SIGNUP_FIELD_ORDER: [&str; 1] = ["email"];

/// Stored with the operator notification when the subscriber leaves no note.
pub const DEFAULT_SIGNUP_MESSAGE: &str = "User signed up for updates";

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct SignupRequest {
  #[validate(
    required(message = "Valid email address is required"),
    contains(pattern = "@", message = "Valid email address is required")
  )]
  pub email: Option<String>,
  pub message: Option<String>,
}

impl From<SignupRequest> for EmailRequest {
  fn from(req: SignupRequest) -> Self {
    EmailRequest {
      email: req.email.unwrap_or_default(),
      message: Some(
        req
          .message
          .filter(|message| !message.is_empty())
          .unwrap_or_else(|| DEFAULT_SIGNUP_MESSAGE.to_string()),
      ),
      full_name: None,
      subject: None,
    }
  }
}
