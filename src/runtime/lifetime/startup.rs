use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::StaticConfig;
use crate::services::{LinkService, LinkServiceOptions};
use crate::storage::{LinkStore, PersisterFactory};

pub struct StartupContext {
    pub link_service: Arc<LinkService>,
}

/// Open the store and build the link service.
///
/// Used by the server and by offline CLI commands alike.
pub async fn prepare_link_service(config: &StaticConfig) -> Result<Arc<LinkService>> {
    let persister =
        PersisterFactory::create(&config.storage).context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}{}",
        persister.backend_name(),
        persister
            .location()
            .map(|l| format!(" ({})", l))
            .unwrap_or_default()
    );

    let store = Arc::new(LinkStore::open(persister).await);
    Ok(Arc::new(LinkService::new(
        store,
        LinkServiceOptions::from_config(config),
    )))
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let link_service = prepare_link_service(config).await?;

    info!("Base URL: {}", link_service.options().base_url);
    info!("Total URLs: {}", link_service.count().await);
    debug!("Pre-startup processing completed in {:?}", start_time.elapsed());

    Ok(StartupContext { link_service })
}
