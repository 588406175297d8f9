use crate::adapters::http;
use crate::app::AppServices;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

pub struct ComplianceServer {
    services: AppServices,
    request_timeout: Duration,
}

impl ComplianceServer {
    pub fn new(services: AppServices, request_timeout: Duration) -> Self {
        Self {
            services,
            request_timeout,
        }
    }

    pub fn from_config<C: ConfigProvider>(services: AppServices, config: &C) -> Self {
        Self::new(services, config.request_timeout())
    }

    pub fn router(&self) -> axum::Router {
        http::router(self.services.clone(), self.request_timeout)
    }

    pub async fn bind(addr: &str) -> Result<TcpListener> {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);
        Ok(listener)
    }

    /// Serves until Ctrl-C.
    pub async fn run(&self, listener: TcpListener) -> Result<()> {
        self.run_until(listener, shutdown_signal()).await
    }

    /// Serves until `shutdown` resolves, then lets in-flight requests finish.
    pub async fn run_until<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = listener.local_addr()?;
        tracing::info!(
            "Serving FuelEU compliance API on {} (request timeout {:?})",
            addr,
            self.request_timeout
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server on {} stopped", addr);
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // without a signal handler, keep serving until the process is killed
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
