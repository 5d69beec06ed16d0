use std::sync::Arc;

use async_trait::async_trait;
use lettre::{
  message::header::ContentType, transport::smtp::authentication::Credentials, AsyncSmtpTransport, AsyncTransport,
  Message, Tokio1Executor,
};
use tokio::sync::OnceCell;

use crate::config::ConfigError;

use super::{
  error::{EmailError, TransportError},
  types::{ComposedMessage, TransportConfig},
};

/// Hosts served by local mail catchers that speak plain SMTP.
const LOCAL_RELAYS: [&str; 3] = ["localhost", "127.0.0.1", "mailhog"];

/// Connection to a mail server able to deliver composed messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
  async fn send(&self, message: &ComposedMessage) -> Result<(), TransportError>;

  /// Checks that the server accepts a connection with the configured credentials.
  async fn verify(&self) -> Result<bool, TransportError>;
}

pub struct SmtpMailTransport {
  inner: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
  /// Builds the transport. No connection is opened until the first send or verify.
  pub fn connect(config: &TransportConfig) -> Result<Self, TransportError> {
    let creds = Credentials::new(config.user.clone(), config.pass.clone());

    let builder = if LOCAL_RELAYS.contains(&config.host.as_str()) {
      AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
    } else if config.secure {
      AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
    } else {
      AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
    };

    let inner = builder.credentials(creds).port(config.port).build();

    Ok(SmtpMailTransport { inner })
  }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
  async fn send(&self, message: &ComposedMessage) -> Result<(), TransportError> {
    let mut builder = Message::builder()
      .from(message.from.to_mailbox()?)
      .to(message.to.to_mailbox()?)
      .subject(message.subject.as_str())
      .header(ContentType::TEXT_HTML);

    if let Some(reply_to) = &message.reply_to {
      builder = builder.reply_to(reply_to.to_mailbox()?);
    }

    let email = builder.body(message.html.clone())?;
    self.inner.send(email).await?;

    Ok(())
  }

  async fn verify(&self) -> Result<bool, TransportError> {
    Ok(self.inner.test_connection().await?)
  }
}

/// An opened transport together with the settings it was built from.
pub struct TransportHandle {
  config: TransportConfig,
  transport: Arc<dyn MailTransport>,
}

impl TransportHandle {
  pub fn config(&self) -> &TransportConfig {
    &self.config
  }

  pub async fn send(&self, message: &ComposedMessage) -> Result<(), TransportError> {
    self.transport.send(message).await
  }
}

type ConfigLoader = Box<dyn Fn() -> Result<TransportConfig, ConfigError> + Send + Sync>;
type Connector = Box<dyn Fn(&TransportConfig) -> Result<Arc<dyn MailTransport>, TransportError> + Send + Sync>;

/// Lazily opens a single transport and hands out the same handle for the rest of the process.
///
/// Construction runs at most once even when several requests arrive on a cold start. A failed
/// construction caches nothing. There is no reconnect: a broken handle keeps failing sends
/// until restart.
pub struct TransportProvider {
  load_config: ConfigLoader,
  connect: Connector,
  verify_on_connect: bool,
  handle: OnceCell<Arc<TransportHandle>>,
}

impl TransportProvider {
  pub fn new<L, C>(load_config: L, connect: C, verify_on_connect: bool) -> Self
  where
    L: Fn() -> Result<TransportConfig, ConfigError> + Send + Sync + 'static,
    C: Fn(&TransportConfig) -> Result<Arc<dyn MailTransport>, TransportError> + Send + Sync + 'static,
  {
    TransportProvider {
      load_config: Box::new(load_config),
      connect: Box::new(connect),
      verify_on_connect,
      handle: OnceCell::new(),
    }
  }

  /// SMTP transport configured from `EMAIL_*` variables on first use.
  pub fn from_env(verify_on_connect: bool) -> Self {
    Self::new(
      TransportConfig::from_env,
      |config| Ok(Arc::new(SmtpMailTransport::connect(config)?) as Arc<dyn MailTransport>),
      verify_on_connect,
    )
  }

  pub async fn get_transport(&self) -> Result<Arc<TransportHandle>, EmailError> {
    self
      .handle
      .get_or_try_init(|| async { self.open() })
      .await
      .map(Arc::clone)
  }

  fn open(&self) -> Result<Arc<TransportHandle>, EmailError> {
    let config = (self.load_config)()?;

    let transport = (self.connect)(&config).map_err(|e| ConfigError::Invalid {
      name: "EMAIL_HOST",
      value: config.host.clone(),
      reason: e.to_string(),
    })?;

    tracing::info!(
      host = %config.host,
      port = config.port,
      secure = config.secure,
      "Mail transport created"
    );

    if self.verify_on_connect {
      let transport = Arc::clone(&transport);
      tokio::spawn(async move {
        match transport.verify().await {
          Ok(true) => tracing::info!("SMTP connection verified"),
          Ok(false) => tracing::warn!("SMTP connection failed: server did not accept the connection"),
          Err(e) => tracing::warn!("SMTP connection failed: {}", e),
        }
      });
    }

    Ok(Arc::new(TransportHandle { config, transport }))
  }
}
