//! HTTP server setup and security header registration.
//!
//! # Responsibilities
//! - Build a policy from defaults plus an optional caller closure
//! - Insert the security header layer into an axum Router
//! - Run the demo server with tracing, timeouts and graceful shutdown
//! - Swap in reloaded policies while serving

use std::future::Future;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{validate_headers, AppConfig, ConfigError};
use crate::policy::{SecurityHeadersConfig, SourceError};
use crate::security::{SecurityHeadersLayer, SharedPolicy};

/// Build a policy from the defaults, customized by `configure`, and freeze it.
///
/// The closure may build nonce and hash sources with `?`; any error, and any
/// header that would not render to a legal value, fails here at startup
/// rather than on a request. Use [`SharedPolicy::default`] when no
/// customization is needed.
pub fn add_security_headers<F>(configure: F) -> Result<SharedPolicy, ConfigError>
where
    F: FnOnce(&mut SecurityHeadersConfig) -> Result<(), SourceError>,
{
    let mut config = SecurityHeadersConfig::default();
    configure(&mut config)?;
    validate_headers(&config).map_err(ConfigError::Validation)?;
    Ok(SharedPolicy::new(config))
}

/// Extension for inserting the security header stage into a Router.
pub trait SecurityHeadersRouterExt {
    fn use_security_headers(self, policy: SharedPolicy) -> Self;
}

impl<S> SecurityHeadersRouterExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn use_security_headers(self, policy: SharedPolicy) -> Self {
        self.layer(SecurityHeadersLayer::new(policy))
    }
}

/// Demo HTTP server answering `GET /` behind the security header layer.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    policy: SharedPolicy,
}

impl HttpServer {
    /// Create a new HTTP server with the given (already validated) configuration.
    pub fn new(config: AppConfig) -> Self {
        let policy = SharedPolicy::new(config.headers.clone());
        let router = Self::build_router(&config, policy.clone());
        Self {
            router,
            config,
            policy,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, policy: SharedPolicy) -> Router {
        Router::new()
            .route("/", get(hello))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .use_security_headers(policy)
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, e.g. for driving requests in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Handle to the live policy.
    pub fn policy(&self) -> SharedPolicy {
        self.policy.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run until Ctrl+C.
    pub async fn run(
        self,
        listener: TcpListener,
        config_updates: mpsc::UnboundedReceiver<AppConfig>,
    ) -> Result<(), std::io::Error> {
        self.run_until(listener, config_updates, shutdown_signal())
            .await
    }

    /// Run until `shutdown` resolves, applying policies received on
    /// `config_updates` to subsequent requests.
    pub async fn run_until<F>(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<AppConfig>,
        shutdown: F,
    ) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let policy = self.policy.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                policy.replace(config.headers);
                tracing::info!("Security header policy updated");
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn hello() -> &'static str {
    "Hello World!"
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
