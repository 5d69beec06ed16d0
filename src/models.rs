use serde::{Deserialize, Serialize};

/// Body returned by both form endpoints when the submission went through.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SuccessResponse {
  pub success: bool,
  pub message: String,
}

impl SuccessResponse {
  pub fn new(message: impl Into<String>) -> Self {
    SuccessResponse {
      success: true,
      message: message.into(),
    }
  }
}
