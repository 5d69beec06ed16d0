use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use dotenvy::dotenv;

use contact_mailer::app::{cors_layer, create_app};
use contact_mailer::config::Settings;
use contact_mailer::state::SharedAppState;
use contact_mailer::utils::init_email_service;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")))
    .init();

  let settings = Settings::from_env()?;
  tracing::info!(app_env = ?settings.app_env, "Configuration loaded");

  let email_service = init_email_service(settings.app_env)?;
  let app_state = SharedAppState::new(Arc::new(email_service));
  let app = create_app(app_state, cors_layer(settings.cors_allowed_origin.as_deref())?);

  let listener = tokio::net::TcpListener::bind(settings.bind_address).await?;

  tracing::info!("Server running on http://{}", settings.bind_address);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
  };

  #[cfg(unix)]
  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .expect("Failed to install signal handler")
      .recv()
      .await;
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  tracing::info!("Received termination signal, shutting down gracefully...");
}
