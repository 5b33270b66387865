use crate::errors::{AutogradeError, Result};
use crate::models::users::{
    entities::{Identity, UserRole},
    requests::CreateUserRequest,
};
use crate::storage::Storage;
use crate::utils::hash_password;

use super::{AuthOutcome, AuthService};

pub async fn handle_register(
    service: &AuthService,
    storage: &dyn Storage,
    email: &str,
    password: &str,
    role: Option<UserRole>,
    caller: Option<&Identity>,
) -> Result<AuthOutcome> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AutogradeError::validation(
            "email or password must not be empty",
        ));
    }

    // 检查邮箱是否已存在
    if storage.get_user_by_email(email).await?.is_some() {
        return Err(AutogradeError::already_exists("user already exists"));
    }

    // 第一个账号默认为管理员；此后默认导师，创建管理员需要管理员身份
    let role = if storage.count_users().await? == 0 {
        role.unwrap_or(UserRole::Admin)
    } else {
        let role = role.unwrap_or(UserRole::Tutor);
        if role == UserRole::Admin && !caller.is_some_and(Identity::is_admin) {
            tracing::info!("Rejected admin registration for {}", email);
            return Err(AutogradeError::authorization(
                "you must be an admin to register an admin",
            ));
        }
        role
    };

    let password_hash = hash_password(password, &service.argon2)?;

    let user = storage
        .create_user(CreateUserRequest {
            email: email.to_string(),
            password_hash,
            role,
        })
        .await?;

    tracing::info!("User {} registered as {}", user.email, user.role);
    service.issue(user)
}
