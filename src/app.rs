use anyhow::Context;
use axum::{
  http::{header, HeaderValue, Method},
  routing::get,
  Router,
};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::{
  domains::{contact::rest::contact_routes, signup::rest::signup_routes},
  state::SharedAppState,
};

pub fn create_app(state: SharedAppState, cors: CorsLayer) -> Router {
  Router::new()
    .route("/", get(health_handler))
    .merge(contact_routes())
    .merge(signup_routes())
    .layer(cors)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// CORS for the site's form. Without a configured origin any origin may post.
pub fn cors_layer(allowed_origin: Option<&str>) -> anyhow::Result<CorsLayer> {
  let layer = CorsLayer::new()
    .allow_methods([Method::POST])
    .allow_headers([header::CONTENT_TYPE]);

  match allowed_origin {
    Some(origin) => {
      let origin = HeaderValue::from_str(origin).with_context(|| format!("Invalid CORS origin {:?}", origin))?;
      Ok(layer.allow_origin(origin))
    }
    None => Ok(layer.allow_origin(Any)),
  }
}

pub async fn health_handler() -> &'static str {
  "OK"
}
