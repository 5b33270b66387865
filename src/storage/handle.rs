use std::sync::Arc;

use tokio::sync::RwLock;

use super::Storage;

/// 当前存储句柄
///
/// 重置数据库会整体替换句柄，读请求只持有读锁到克隆出 `Arc` 为止。
pub struct StoreHandle {
    inner: RwLock<Arc<dyn Storage>>,
}

impl StoreHandle {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            inner: RwLock::new(storage),
        }
    }

    /// 获取当前存储
    pub async fn current(&self) -> Arc<dyn Storage> {
        self.inner.read().await.clone()
    }

    /// 替换存储，之后的请求都使用新句柄
    pub async fn replace(&self, storage: Arc<dyn Storage>) {
        *self.inner.write().await = storage;
    }
}
