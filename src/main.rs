//! Feedback Forms API Server
//!
//! Serves form authoring and filling endpoints on top of the upstream
//! forms API. Filling sessions are held in memory and swept once idle.

use std::error::Error;
use std::sync::Arc;

use feedback_forms::adapters::{
    api_router, FillingAppState, FormsAppState, InMemoryFillingSessionStore, RestFormApi,
};
use feedback_forms::application::{EvictIdleSessionsCommand, EvictIdleSessionsHandler};
use feedback_forms::config::{AppConfig, SessionConfig};
use feedback_forms::domain::foundation::Timestamp;
use feedback_forms::ports::FillingSessionStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let upstream = Arc::new(RestFormApi::new(config.upstream.rest_api_config())?);
    let sessions = Arc::new(InMemoryFillingSessionStore::new());
    spawn_session_sweeper(sessions.clone(), config.sessions.clone());

    let app = api_router(
        FillingAppState::new(upstream.clone(), sessions, upstream.clone()),
        FormsAppState::new(upstream),
        &config.server,
    );

    let addr = config.server.socket_addr()?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        upstream = %config.upstream.base_url,
        "Starting Feedback Forms API"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drops sessions that outlived the configured lifetime.
fn spawn_session_sweeper(store: Arc<dyn FillingSessionStore>, sessions: SessionConfig) {
    let handler = EvictIdleSessionsHandler::new(store);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sessions.sweep_interval());
        loop {
            ticker.tick().await;
            let cmd = EvictIdleSessionsCommand {
                now: Timestamp::now(),
                idle_ttl_mins: sessions.idle_ttl_mins,
            };
            if let Err(err) = handler.handle(cmd).await {
                tracing::warn!(error = %err, "Session eviction failed");
            }
        }
    });
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
