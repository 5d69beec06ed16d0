use std::sync::Arc;

use crate::{
  domains::{
    contact::{
      model::ContactRequest,
      service::{ContactService, ContactServiceError, ContactServiceImpl},
    },
    signup::{
      model::SignupRequest,
      service::{SignupOutcome, SignupService, SignupServiceError, SignupServiceImpl},
    },
  },
  email::EmailService,
};

pub trait AppState: Clone + Send + Sync + 'static {
  fn submit_contact(
    &self,
    req: ContactRequest,
  ) -> impl std::future::Future<Output = Result<(), ContactServiceError>> + Send;
  fn sign_up(
    &self,
    req: SignupRequest,
  ) -> impl std::future::Future<Output = Result<SignupOutcome, SignupServiceError>> + Send;
}

#[derive(Clone)]
pub struct SharedAppState {
  pub contact_service: Arc<ContactServiceImpl>,
  pub signup_service: Arc<SignupServiceImpl>,
}

impl SharedAppState {
  pub fn new(email_service: Arc<EmailService>) -> Self {
    let contact_service = Arc::new(ContactServiceImpl::new(Arc::clone(&email_service)));
    let signup_service = Arc::new(SignupServiceImpl::new(email_service));

    Self {
      contact_service,
      signup_service,
    }
  }
}

impl AppState for SharedAppState {
  async fn submit_contact(&self, req: ContactRequest) -> Result<(), ContactServiceError> {
    self.contact_service.submit(req).await
  }

  async fn sign_up(&self, req: SignupRequest) -> Result<SignupOutcome, SignupServiceError> {
    self.signup_service.sign_up(req).await
  }
}
