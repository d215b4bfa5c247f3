use std::sync::Arc;

use tracing::{info, warn};

use crate::store::UrlStore;

/// 关闭存储；若仍有其他引用，文件在最后一个引用释放时关闭
pub fn close_store(store: Arc<UrlStore>) {
    match Arc::try_unwrap(store) {
        Ok(store) => {
            store.close();
            info!("Store closed");
        }
        Err(shared) => {
            warn!(
                "Store still has {} references at shutdown; it closes when the last one drops",
                Arc::strong_count(&shared)
            );
        }
    }
}
