//! HTTP layer exposing trial arm safety data as JSON and rendered HTML.

pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::{config::Settings, safety::TrialArm};

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub arms: Arc<Vec<TrialArm>>,
}

impl AppState {
    pub fn new(settings: Settings, arms: Vec<TrialArm>) -> Self {
        Self {
            settings,
            arms: Arc::new(arms),
        }
    }
}

/// Build the application router; the static stylesheet is the fallback.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::dashboard))
        .route("/trial-arms", get(routes::list_arms))
        .route("/trial-arms/:arm_code", get(routes::get_arm))
        .route("/trial-arms/:arm_code/safety-metrics", get(routes::safety_metrics))
        .route("/trial-arms/:arm_code/card", get(routes::arm_card))
        .route("/badge", get(routes::badge))
        .fallback_service(ServeDir::new("static"))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState, host: String, port: u16) -> Result<()> {
    let arms = state.arms.len();
    let app = router(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, arms, "serving trial-safety-view");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
