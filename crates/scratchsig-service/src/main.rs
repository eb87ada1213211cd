//! Scratch signature service
//!
//! Resolves Scratch usernames to user IDs and avatar URLs for wiki
//! signatures, caching confirmed IDs in memory.

mod config;
mod error;
mod server;
mod types;

use crate::config::ServiceConfig;
use crate::error::{Result, ServiceError};
use crate::server::{start_server, ServerState, SharedState};
use scratch_user_resolver::{AvatarUrlTemplate, MokaIdCache, ScratchApiClient, UserIdResolver};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env()
        .add_directive("scratchsig_service=info".parse()?)
        .add_directive("scratch_user_resolver=info".parse()?);

    // Use JSON format for Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting scratchsig service...");

    let config = ServiceConfig::from_env();
    info!("Port: {}", config.port);
    info!("Scratch API: {}", config.scratch_api_url);
    info!("Avatar size: {}px", config.avatar_size);
    match config.cache_ttl_secs {
        Some(ttl) => info!("Cache: {} entries, TTL {} seconds", config.cache_max_entries, ttl),
        None => info!("Cache: {} entries, no expiry", config.cache_max_entries),
    }

    let client = ScratchApiClient::with_base_url_and_timeout(
        &config.scratch_api_url,
        Duration::from_secs(config.http_timeout_secs),
    )?;
    let cache = MokaIdCache::with_ttl(
        config.cache_max_entries,
        config.cache_ttl_secs.map(Duration::from_secs),
    );
    let resolver = UserIdResolver::with_avatar_template(
        Arc::new(client),
        Arc::new(cache),
        AvatarUrlTemplate::new(&config.avatar_base_url, config.avatar_size),
    );

    let state: SharedState = Arc::new(ServerState::new(resolver));

    // Start HTTP server (blocking)
    start_server(state, config.port)
        .await
        .map_err(ServiceError::server(config.port))?;

    Ok(())
}
