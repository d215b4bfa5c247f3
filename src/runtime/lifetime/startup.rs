use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::services::{BackupSettings, SharedFactory, SharedStore};
use crate::config::{StaticConfig, StoreConfig};
use crate::keygen::{HashIdGenerator, KeyFactory};
use crate::store::{KeyValueStore, UrlStore};

/// Everything a run mode needs, constructed once and passed explicitly.
pub struct StartupContext {
    pub store: SharedStore,
    pub factory: SharedFactory,
    pub backup: BackupSettings,
}

impl StartupContext {
    /// Drop the factory's store reference, then close the store.
    pub fn shutdown(self) {
        drop(self.factory);
        super::shutdown::close_store(self.store);
    }
}

/// 打开存储文件；失败属于启动错误
pub fn open_store(config: &StoreConfig) -> Result<UrlStore> {
    UrlStore::open(&config.path)
        .with_context(|| format!("Failed to open store at '{}'", config.path))
}

/// 准备运行上下文：存储、短码工厂和备份设置
pub fn prepare_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let store = Arc::new(open_store(&config.store)?);
    let entries = store.size().context("Failed to read store size")?;
    info!("Store ready with {} entries", entries);

    let generator = HashIdGenerator::new(config.keygen.length);
    let factory = Arc::new(KeyFactory::with_options(
        generator,
        store.clone(),
        config.keygen.factory_options(),
    ));
    debug!(
        "Key factory ready (length {}, max attempts {})",
        config.keygen.length, config.keygen.max_attempts
    );

    info!("Pre-startup completed in {:?}", start_time.elapsed());

    Ok(StartupContext {
        store,
        factory,
        backup: BackupSettings {
            filename: config.store.backup_filename.clone(),
        },
    })
}
