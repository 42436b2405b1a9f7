//! Preview server
//!
//! Serves a built bundle over HTTP for local preview. Routing mirrors the
//! deployed layout: the bundle is mounted under the configured base path,
//! directory requests resolve to their `index.html`, and unknown paths get
//! the bundle's 404 page with a real 404 status.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum::handler::HandlerWithoutStateExt;
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::routing::get;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::services::ServeDir;
use tracing::{debug, info};

use crate::error::{CodewalkError, Result};

/// Body served when the bundle has no 404 page of its own.
const FALLBACK_NOT_FOUND: &str =
    "<!DOCTYPE html>\n<html><head><title>Not Found</title></head><body><h1>Page not found</h1></body></html>\n";

/// What the preview server serves.
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Bundle root directory.
    pub root: PathBuf,
    /// Path prefix the bundle is mounted under, empty for the root.
    ///
    /// Changing the base path or the output directory in the configuration
    /// requires a server restart; the watcher only rebuilds the bundle.
    pub base_path: String,
}

/// A bound preview server, ready to run.
pub struct PreviewServer {
    listener: TcpListener,
    router: Router,
    cancel: CancellationToken,
}

impl PreviewServer {
    /// Binds the preview server.
    ///
    /// Returns the server and the actual bound address (useful when binding
    /// to port 0 in tests).
    ///
    /// # Errors
    ///
    /// Returns [`CodewalkError::Server`] if the TCP listener cannot bind.
    pub async fn bind(
        host: &str,
        port: u16,
        options: PreviewOptions,
        cancel: CancellationToken,
    ) -> Result<(Self, SocketAddr)> {
        let listener = TcpListener::bind((host, port))
            .await
            .map_err(|e| CodewalkError::Server(format!("cannot bind {host}:{port}: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| CodewalkError::Server(format!("local_addr failed: {e}")))?;

        let router = build_router(&options);
        info!(%addr, base_path = %options.base_path, "preview server listening");

        Ok((
            Self {
                listener,
                router,
                cancel,
            },
            addr,
        ))
    }

    /// Serves requests until the cancellation token fires.
    ///
    /// # Errors
    ///
    /// Returns [`CodewalkError::Server`] if the accept loop fails.
    pub async fn run(self) -> Result<()> {
        let cancel = self.cancel;
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
            })
            .await
            .map_err(|e| CodewalkError::Server(e.to_string()))?;
        debug!("preview server shut down");
        Ok(())
    }
}

// ============================================================================
// Router
// ============================================================================

/// Builds the router serving the bundle.
///
/// A non-empty base path mounts the bundle under that prefix and redirects
/// `/` to it, matching how the deployed site is reached.
fn build_router(options: &PreviewOptions) -> Router {
    let root = options.root.clone();
    let not_found = move || {
        let root = root.clone();
        async move {
            // Read per request so a rebuilt 404 page takes effect without
            // a restart.
            let body = tokio::fs::read_to_string(root.join("404.html"))
                .await
                .unwrap_or_else(|_| FALLBACK_NOT_FOUND.to_string());
            (StatusCode::NOT_FOUND, Html(body))
        }
    };

    let serve_dir = ServeDir::new(&options.root).not_found_service(not_found.clone().into_service());

    if options.base_path.is_empty() {
        Router::new().fallback_service(serve_dir)
    } else {
        let target = format!("{}/", options.base_path);
        Router::new()
            .route("/", get(move || async move { Redirect::permanent(&target) }))
            .nest_service(&options.base_path, serve_dir)
            .fallback(not_found)
    }
}

// ============================================================================
// Tests
// ============================================================================
