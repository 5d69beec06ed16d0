use axum::{
  extract::{rejection::JsonRejection, Json, State},
  response::Json as JsonResponse,
  routing::{post, Router},
};

use super::model::SignupRequest;
use crate::{
  models::SuccessResponse,
  state::{AppState, SharedAppState},
  AppError,
};

pub fn signup_routes() -> Router<SharedAppState> {
  Router::new().route("/email-signup", post(email_signup_handler))
}

pub async fn email_signup_handler(
  State(state): State<SharedAppState>,
  payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<JsonResponse<SuccessResponse>, AppError> {
  let Json(payload) = payload?;

  // The confirmation result is already logged; it never changes the response.
  state.sign_up(payload).await?;

  Ok(JsonResponse(SuccessResponse::new(
    "Successfully signed up! Check your email for confirmation.",
  )))
}
