use crate::errors::{AutogradeError, Result};
use crate::models::users::entities::Identity;
use crate::storage::StoreHandle;

pub struct SystemService;

impl SystemService {
    /// 重置课程数据，仅管理员可用
    ///
    /// 成功后替换全局存储句柄。
    pub async fn reset_db(handle: &StoreHandle, identity: Option<&Identity>) -> Result<bool> {
        let identity =
            identity.ok_or_else(|| AutogradeError::authentication("user not authenticated"))?;

        if !identity.is_admin() {
            tracing::info!("Denied database reset for {}", identity.email);
            return Err(AutogradeError::authorization(
                "you must be an admin to reset the database",
            ));
        }

        let fresh = handle.current().await.reset_store().await.inspect_err(|e| {
            tracing::error!("Database reset failed: {}", e);
        })?;
        handle.replace(fresh).await;

        tracing::warn!("Database reset by {}", identity.email);
        Ok(true)
    }
}
