use minijinja::{context, Environment};

use super::{
  error::EmailError,
  types::{ComposedMessage, EmailAddress, EmailRequest, TransportConfig},
};

const SIGNUP_NOTIFICATION: &str = "signup_notification.html";
const CONTACT_NOTIFICATION: &str = "contact_notification.html";
const SIGNUP_CONFIRMATION: &str = "signup_confirmation.html";

/// Renders the site's three HTML emails. Values are escaped; nothing is validated.
pub struct MessageComposer {
  env: Environment<'static>,
}

impl MessageComposer {
  pub fn new() -> Result<Self, EmailError> {
    let mut env = Environment::new();
    env.add_template(
      SIGNUP_NOTIFICATION,
      include_str!("../../templates/email/signup_notification.html"),
    )?;
    env.add_template(
      CONTACT_NOTIFICATION,
      include_str!("../../templates/email/contact_notification.html"),
    )?;
    env.add_template(
      SIGNUP_CONFIRMATION,
      include_str!("../../templates/email/signup_confirmation.html"),
    )?;

    Ok(MessageComposer { env })
  }

  pub fn compose_signup_notification(
    &self,
    config: &TransportConfig,
    request: &EmailRequest,
  ) -> Result<ComposedMessage, EmailError> {
    let html = self.env.get_template(SIGNUP_NOTIFICATION)?.render(context! {
      organization => &config.from_name,
      email => &request.email,
      message => &request.message,
    })?;

    Ok(ComposedMessage {
      from: config.sender(),
      to: config.operator(),
      reply_to: None,
      subject: subject_or(request, || format!("New Email Signup from {} Website", config.from_name)),
      html,
    })
  }

  pub fn compose_contact_notification(
    &self,
    config: &TransportConfig,
    request: &EmailRequest,
  ) -> Result<ComposedMessage, EmailError> {
    let full_name = request.full_name.as_deref().unwrap_or_default();
    let message = request.message.as_deref().unwrap_or_default();

    let html = self.env.get_template(CONTACT_NOTIFICATION)?.render(context! {
      organization => &config.from_name,
      full_name => full_name,
      email => &request.email,
      message => message,
    })?;

    let submitter = EmailAddress::named(full_name, &request.email);

    Ok(ComposedMessage {
      from: submitter.clone(),
      to: config.operator(),
      reply_to: Some(submitter),
      subject: subject_or(request, || format!("New Contact Form Message from {}", full_name)),
      html,
    })
  }

  pub fn compose_signup_confirmation(&self, config: &TransportConfig, email: &str) -> Result<ComposedMessage, EmailError> {
    let html = self.env.get_template(SIGNUP_CONFIRMATION)?.render(context! {
      organization => &config.from_name,
    })?;

    Ok(ComposedMessage {
      from: config.sender(),
      to: EmailAddress::bare(email),
      reply_to: None,
      subject: format!("Welcome to {} - Thank You for Signing Up!", config.from_name),
      html,
    })
  }
}

fn subject_or(request: &EmailRequest, default: impl FnOnce() -> String) -> String {
  request
    .subject
    .as_ref()
    .filter(|subject| !subject.is_empty())
    .cloned()
    .unwrap_or_else(default)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_support::test_config;

  fn contact_request(full_name: &str, email: &str, message: &str) -> EmailRequest {
    EmailRequest {
      email: email.to_string(),
      message: Some(message.to_string()),
      full_name: Some(full_name.to_string()),
      subject: None,
    }
  }

  #[test]
  fn test_contact_notification_headers() {
    let composer = MessageComposer::new().unwrap();
    let message = composer
      .compose_contact_notification(&test_config(), &contact_request("Ada", "ada@x.com", "hello"))
      .unwrap();

    assert_eq!(message.subject, "New Contact Form Message from Ada");
    assert_eq!(message.to, EmailAddress::bare("team@jidi.example"));
    assert_eq!(message.from, EmailAddress::named("Ada", "ada@x.com"));
    assert_eq!(message.reply_to, Some(EmailAddress::named("Ada", "ada@x.com")));
  }

  #[test]
  fn test_contact_notification_body() {
    let composer = MessageComposer::new().unwrap();
    let message = composer
      .compose_contact_notification(&test_config(), &contact_request("Ada", "ada@x.com", "line one\nline two"))
      .unwrap();

    assert!(message.html.contains("href=\"mailto:ada@x.com\""));
    assert!(message.html.contains("white-space: pre-wrap;\">line one\nline two</div>"));
    assert!(message.html.contains("Reply to Ada"));
  }

  #[test]
  fn test_contact_notification_escapes_fields() {
    let composer = MessageComposer::new().unwrap();
    let message = composer
      .compose_contact_notification(&test_config(), &contact_request("<b>Eve</b>", "eve@x.com", "<script>"))
      .unwrap();

    assert!(!message.html.contains("<script>"));
    assert!(message.html.contains("&lt;script&gt;"));
    assert!(message.html.contains("&lt;b&gt;Eve"));
    assert_eq!(message.subject, "New Contact Form Message from <b>Eve</b>");
  }

  #[test]
  fn test_contact_notification_custom_subject() {
    let composer = MessageComposer::new().unwrap();
    let mut request = contact_request("Ada", "ada@x.com", "hello");
    request.subject = Some("Partnership".to_string());

    let message = composer.compose_contact_notification(&test_config(), &request).unwrap();
    assert_eq!(message.subject, "Partnership");
  }

  #[test]
  fn test_contact_notification_with_empty_fields() {
    let composer = MessageComposer::new().unwrap();
    let message = composer
      .compose_contact_notification(&test_config(), &contact_request("", "", ""))
      .unwrap();

    assert_eq!(message.subject, "New Contact Form Message from ");
    assert_eq!(message.from, EmailAddress::named("", ""));
  }

  #[test]
  fn test_signup_notification_goes_to_operator() {
    let composer = MessageComposer::new().unwrap();
    let request = EmailRequest {
      email: "reader@x.com".to_string(),
      message: Some("Keep me posted".to_string()),
      ..Default::default()
    };

    let message = composer.compose_signup_notification(&test_config(), &request).unwrap();

    assert_eq!(message.subject, "New Email Signup from JIDI Institute Website");
    assert_eq!(message.to, EmailAddress::bare("team@jidi.example"));
    assert_eq!(message.from, EmailAddress::named("JIDI Institute", "hello@jidi.example"));
    assert!(message.html.contains("<strong>Email:</strong> reader@x.com"));
    assert!(message.html.contains("<strong>Message:</strong> Keep me posted"));
  }

  #[test]
  fn test_signup_notification_omits_missing_message() {
    let composer = MessageComposer::new().unwrap();
    let request = EmailRequest {
      email: "reader@x.com".to_string(),
      ..Default::default()
    };

    let message = composer.compose_signup_notification(&test_config(), &request).unwrap();
    assert!(!message.html.contains("Message:"));
  }

  #[test]
  fn test_signup_confirmation_goes_to_submitter() {
    let composer = MessageComposer::new().unwrap();
    let message = composer
      .compose_signup_confirmation(&test_config(), "reader@x.com")
      .unwrap();

    assert_eq!(message.to, EmailAddress::bare("reader@x.com"));
    assert_eq!(message.subject, "Welcome to JIDI Institute - Thank You for Signing Up!");
    assert!(message.html.starts_with("<div"));
    assert!(message.html.contains("Welcome to JIDI Institute"));
  }
}
