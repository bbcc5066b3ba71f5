mod config;
mod errors;
mod models;
mod profile;
mod routes;
mod state;
mod timeline;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::profile::InMemoryProfileStore;
use crate::routes::build_router;
use crate::state::AppState;
use crate::timeline::{EngineSettings, LabelStyles, MetricTableMeasurer, TimelineEngine};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Careersheet API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the timeline engine with static font metrics
    let settings = EngineSettings {
        label_styles: LabelStyles::new(
            config.label_font,
            config.org_font_px,
            config.period_font_px,
        ),
        right_margin_px: config.right_margin_px,
        mobile_breakpoint_px: config.mobile_breakpoint_px,
    };
    info!(
        "Timeline labels: {:?} {}px/{}px, right margin {}px, mobile ≤ {}px",
        config.label_font,
        config.org_font_px,
        config.period_font_px,
        config.right_margin_px,
        config.mobile_breakpoint_px
    );
    let timeline = TimelineEngine::new(Arc::new(MetricTableMeasurer), settings);

    // Build app state
    let state = AppState {
        store: Arc::new(InMemoryProfileStore::new()),
        timeline,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
