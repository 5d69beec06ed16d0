use axum::{
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
  pub status_code: StatusCode,
  pub message: String,
}

impl AppError {
  pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status_code,
      message: message.into(),
    }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn internal_server_error(message: impl Into<String>) -> Self {
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let body = Json(json!({
      "error": self.message,
    }));

    (self.status_code, body).into_response()
  }
}

impl From<AppError> for StatusCode {
  fn from(err: AppError) -> Self {
    err.status_code
  }
}

impl From<JsonRejection> for AppError {
  fn from(rejection: JsonRejection) -> Self {
    tracing::warn!("Rejected request body: {}", rejection.body_text());
    AppError::bad_request("Invalid JSON format")
  }
}

impl From<crate::domains::contact::service::ContactServiceError> for AppError {
  fn from(error: crate::domains::contact::service::ContactServiceError) -> Self {
    use crate::domains::contact::service::ContactServiceError;
    match error {
      ContactServiceError::ValidationError(msg) => AppError::bad_request(msg),
      ContactServiceError::Email(e) => {
        tracing::error!("Contact form error: {}", e);
        AppError::internal_server_error("Failed to send message. Please try again later.")
      }
    }
  }
}

impl From<crate::domains::signup::service::SignupServiceError> for AppError {
  fn from(error: crate::domains::signup::service::SignupServiceError) -> Self {
    use crate::domains::signup::service::SignupServiceError;
    match error {
      SignupServiceError::ValidationError(msg) => AppError::bad_request(msg),
      SignupServiceError::Email(e) => {
        tracing::error!("Email signup error: {}", e);
        AppError::internal_server_error("Failed to process signup. Please try again later.")
      }
    }
  }
}
