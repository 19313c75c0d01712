//! HTTP JSON API for the Chamber of Echoes
//!
//! One [`EchoLog`] per server process, shared by all handlers through
//! [`AppState`]. Appends go through a mutex so concurrent requests cannot
//! interleave or lose echoes.

pub mod error;
pub mod routes;

use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::handler::HandlerWithoutStateExt;
use axum::routing::{get, post};
use colored::Colorize;
use eyre::{Context, Result};
use seqpredict::EchoLog;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;

pub use error::ApiError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    echoes: Arc<Mutex<EchoLog>>,
    started: Instant,
    max_count: i64,
}

impl AppState {
    pub fn new(max_count: i64) -> Self {
        Self {
            echoes: Arc::new(Mutex::new(EchoLog::new())),
            started: Instant::now(),
            max_count,
        }
    }

    /// Number of echoes recorded by this process
    pub async fn echo_count(&self) -> usize {
        self.echoes.lock().await.count()
    }
}

/// Build the API router
///
/// Unknown paths, and known paths with an unsupported method, get the JSON
/// 404. With `static_dir`, files under it are served for unmatched GETs first.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let app = Router::new()
        .route("/api/predict", post(routes::predict))
        .route("/api/predict-multiple", post(routes::predict_many))
        .route("/api/validate", post(routes::validate))
        .route("/api/parse", post(routes::parse))
        .route("/api/memory", get(routes::memory).delete(routes::clear_memory))
        .route("/api/status", get(routes::status))
        .method_not_allowed_fallback(routes::not_found);

    let app = match static_dir {
        Some(dir) => app.fallback_service(
            ServeDir::new(dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(routes::not_found.into_service()),
        ),
        None => app.fallback(routes::not_found),
    };

    with_layers(app).with_state(state)
}

/// Middleware shared by every route: panics become JSON 500s, requests are
/// traced, and any origin may call the API
pub fn with_layers<S>(app: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    app.layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bind according to `config` and serve until Ctrl-C
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let addr = config.addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind {}", addr))?;
    let local = listener.local_addr().context("Failed to read bound address")?;

    let state = AppState::new(config.max_count);
    print_banner(local);
    info!("echochamber v{} listening on {}", env!("CARGO_PKG_VERSION"), local);

    serve_on(listener, state.clone(), config.static_dir.as_deref(), shutdown_signal()).await?;

    let count = state.echo_count().await;
    info!(echoes = count, "Server stopped");
    println!();
    println!("{}", "Closing the Chamber of Echoes...".bright_cyan());
    println!("Session Summary: {} echoes recorded", count);
    Ok(())
}

/// Serve `state` on an already bound listener until `shutdown` resolves
pub async fn serve_on<F>(listener: TcpListener, state: AppState, static_dir: Option<&Path>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state, static_dir);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C; serving until killed");
        std::future::pending::<()>().await;
    }
}

fn print_banner(addr: SocketAddr) {
    let base = format!("http://{}", addr);
    println!("{}", "CHAMBER OF ECHOES - WEB SERVER".bright_cyan().bold());
    println!();
    println!("Server is running at {}", base.green());
    println!();
    println!("{}", "API Endpoints:".bright_cyan());
    for (method, path) in [
        ("POST", "/api/predict"),
        ("POST", "/api/predict-multiple"),
        ("POST", "/api/validate"),
        ("POST", "/api/parse"),
        ("GET", "/api/memory"),
        ("DELETE", "/api/memory"),
        ("GET", "/api/status"),
    ] {
        println!("   {:6} {}{}", method.yellow(), base, path);
    }
    println!();
    println!("To stop the server, press Ctrl+C");
    println!();
}
