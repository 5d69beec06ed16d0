use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc, Mutex,
};

use async_trait::async_trait;
use axum::{
  body::{Body, Bytes},
  http::{Request, StatusCode},
  Router,
};
use serde::Serialize;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use crate::{
  app::create_app,
  email::{ComposedMessage, EmailService, MailTransport, TransportConfig, TransportError, TransportProvider},
  state::SharedAppState,
};

/// In-memory transport that records deliveries and fails for chosen recipients.
#[derive(Default)]
pub struct RecordingTransport {
  sent: Mutex<Vec<ComposedMessage>>,
  attempts: AtomicUsize,
  verify_calls: AtomicUsize,
  failing_recipients: Vec<String>,
  fail_verify: bool,
}

impl RecordingTransport {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn failing_for(mut self, address: &str) -> Self {
    self.failing_recipients.push(address.to_string());
    self
  }

  pub fn failing_verify(mut self) -> Self {
    self.fail_verify = true;
    self
  }

  pub fn sent(&self) -> Vec<ComposedMessage> {
    self.sent.lock().expect("sent lock").clone()
  }

  pub fn attempts(&self) -> usize {
    self.attempts.load(Ordering::SeqCst)
  }

  pub fn verify_calls(&self) -> usize {
    self.verify_calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl MailTransport for RecordingTransport {
  async fn send(&self, message: &ComposedMessage) -> Result<(), TransportError> {
    self.attempts.fetch_add(1, Ordering::SeqCst);

    if self.failing_recipients.contains(&message.to.address) {
      return Err(TransportError::Rejected(format!(
        "550 mailbox unavailable: {}",
        message.to.address
      )));
    }

    self.sent.lock().expect("sent lock").push(message.clone());
    Ok(())
  }

  async fn verify(&self) -> Result<bool, TransportError> {
    self.verify_calls.fetch_add(1, Ordering::SeqCst);

    if self.fail_verify {
      Err(TransportError::Rejected("connection refused".to_string()))
    } else {
      Ok(true)
    }
  }
}

pub fn test_config() -> TransportConfig {
  TransportConfig {
    host: "localhost".to_string(),
    port: 1025,
    secure: false,
    user: "hello@jidi.example".to_string(),
    pass: "test_password".to_string(),
    from_address: "hello@jidi.example".to_string(),
    from_name: "JIDI Institute".to_string(),
    operator_address: "team@jidi.example".to_string(),
  }
}

pub fn email_service_with(transport: Arc<RecordingTransport>) -> Arc<EmailService> {
  let provider = TransportProvider::new(
    || Ok(test_config()),
    move |_| Ok(Arc::clone(&transport) as Arc<dyn MailTransport>),
    false,
  );
  Arc::new(EmailService::new(provider).expect("create email service"))
}

pub fn app_with_transport(transport: Arc<RecordingTransport>) -> Router {
  let state = SharedAppState::new(email_service_with(transport));
  create_app(state, CorsLayer::permissive())
}

pub async fn post_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  let body = serde_json::to_vec(body).expect("serialize request body");
  send(app, uri, Body::from(body)).await
}

pub async fn post_raw(app: Router, uri: &str, body: &str) -> (StatusCode, Bytes) {
  send(app, uri, Body::from(body.to_string())).await
}

async fn send(app: Router, uri: &str, body: Body) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method("POST")
    .uri(uri)
    .header("content-type", "application/json")
    .body(body)
    .expect("build request");

  let response = app.oneshot(request).await.expect("handle request");
  let status = response.status();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  (status, body)
}
