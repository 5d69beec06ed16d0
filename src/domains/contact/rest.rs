use axum::{
  extract::{rejection::JsonRejection, Json, State},
  response::Json as JsonResponse,
  routing::{post, Router},
};

use super::model::ContactRequest;
use crate::{
  models::SuccessResponse,
  state::{AppState, SharedAppState},
  AppError,
};

pub fn contact_routes() -> Router<SharedAppState> {
  Router::new().route("/contact", post(contact_handler))
}

pub async fn contact_handler(
  State(state): State<SharedAppState>,
  payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<JsonResponse<SuccessResponse>, AppError> {
  let Json(payload) = payload?;

  state.submit_contact(payload).await?;

  Ok(JsonResponse(SuccessResponse::new(
    "Thank you for your message! We'll get back to you soon.",
  )))
}
