pub mod config;
pub mod dto;
pub mod infrastructure;
pub mod runtime;

use std::sync::Arc;

use anyhow::Context;
use ruido_catalog::SeedCatalog;
use ruido_core::ports::CatalogSource;
use ruido_core::services::StorefrontSession;
use ruido_oracle::{GeminiModel, OracleConfig};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::SessionConfig;
use infrastructure::auth::LocalAuthProvider;
use infrastructure::clock::TokioClock;
use infrastructure::transport::HeadlessTransport;
pub use runtime::Storefront;

/// Type alias to simplify the generic signature of the runtime.
pub type ConcreteStorefront = Storefront<HeadlessTransport, TokioClock, GeminiModel, LocalAuthProvider>;

const DEFAULT_LOG_FILTER: &str = "ruido=info,ruido_lib=info,ruido_core=info,ruido_catalog=info,ruido_oracle=info";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
/// Calling it twice is harmless.
pub fn init_tracing() {
  let _ = tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
    .with(fmt::layer())
    .try_init();
}

/// Builds a live storefront from the on-disk configuration.
///
/// Must run inside a tokio runtime: the identity subscription is spawned
/// before returning.
pub fn bootstrap() -> anyhow::Result<ConcreteStorefront> {
  // --- Dependency Injection Phase ---

  // 1. Configuration
  // Loads both sections, writing defaults back on first run.
  let session_cfg = SessionConfig::load().context("loading [session] config")?;
  let oracle_cfg = OracleConfig::load().context("loading [oracle] config")?;

  // 2. Catalog Adapter (seed data)
  // Validated once; the session owns the only mutable copy afterwards.
  let catalog = SeedCatalog::new().load_catalog().context("loading catalog")?;

  // 3. Media Adapter
  // Single handle for the whole session.
  let transport = HeadlessTransport::new(session_cfg.autoplay);

  // 4. Model Adapter (Gemini)
  // Fails early when the API key variable is unset.
  let model = GeminiModel::from_env(&oracle_cfg).context("building recommendation model")?;

  // 5. Auth Adapter
  let auth = Arc::new(LocalAuthProvider::new());

  // 6. Service Wiring
  let session = StorefrontSession::with_notification_delay(
    catalog,
    transport,
    TokioClock,
    session_cfg.notification_delay(),
  );
  let session_id = session.id();
  let storefront = Storefront::new(session, model, auth);

  // 7. Subscriptions
  storefront.start();

  info!(%session_id, model = %oracle_cfg.model, "storefront ready");
  Ok(storefront)
}
