use crate::errors::{AutogradeError, Result};
use crate::storage::Storage;
use crate::utils::password::verify_password;

use super::{AuthOutcome, AuthService};

pub async fn handle_login(
    service: &AuthService,
    storage: &dyn Storage,
    email: &str,
    password: &str,
) -> Result<AuthOutcome> {
    // 1. 根据邮箱获取用户信息
    let user = storage.get_user_by_email(email).await?.ok_or_else(|| {
        AutogradeError::authentication(format!("user with email: {email} does not exist"))
    })?;

    // 2. 验证密码
    if !verify_password(password, &user.password_hash) {
        tracing::info!("Rejected login for {}", email);
        return Err(AutogradeError::authentication(
            "incorrect username or password",
        ));
    }

    // 3. 生成令牌
    let outcome = service.issue(user)?;
    tracing::info!("User {} logged in successfully", outcome.user.email);
    Ok(outcome)
}
