pub mod login;
pub mod register;

use crate::config::{AppConfig, Argon2Config};
use crate::errors::{AutogradeError, Result};
use crate::models::users::entities::{Identity, User, UserRole};
use crate::storage::Storage;
use crate::utils::JwtUtils;

/// 登录/注册成功后返回的令牌
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub token: String,
    pub user: User,
}

pub struct AuthService {
    jwt: JwtUtils,
    argon2: Argon2Config,
}

impl AuthService {
    pub fn new(jwt: JwtUtils, argon2: Argon2Config) -> Self {
        Self { jwt, argon2 }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            JwtUtils::new(&config.jwt, config.is_production()),
            config.argon2.clone(),
        )
    }

    pub fn jwt(&self) -> &JwtUtils {
        &self.jwt
    }

    // 登录验证
    pub async fn login(
        &self,
        storage: &dyn Storage,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome> {
        login::handle_login(self, storage, email, password).await
    }

    // 用户注册，caller 为当前登录身份
    pub async fn register(
        &self,
        storage: &dyn Storage,
        email: &str,
        password: &str,
        role: Option<UserRole>,
        caller: Option<&Identity>,
    ) -> Result<AuthOutcome> {
        register::handle_register(self, storage, email, password, role, caller).await
    }

    /// 解析令牌并按 subject 查出当前用户
    ///
    /// 签名无效返回 Authentication 错误；subject 对应的用户不存在时返回 `None`。
    pub async fn identify(&self, storage: &dyn Storage, token: &str) -> Result<Option<Identity>> {
        let claims = self
            .jwt
            .verify_token(token)
            .map_err(|e| AutogradeError::authentication(format!("invalid token: {e}")))?;

        let user = storage.get_user_by_email(&claims.sub).await?;
        Ok(user.as_ref().map(Identity::from))
    }

    fn issue(&self, user: User) -> Result<AuthOutcome> {
        let token = self.jwt.generate_token(&user.email)?;
        Ok(AuthOutcome { token, user })
    }
}

#[cfg(test)]
pub(crate) fn test_auth_service() -> AuthService {
    use crate::config::JwtConfig;

    AuthService::new(
        JwtUtils::new(
            &JwtConfig {
                secret: "catjam".to_string(),
                token_expiry: 1,
                cookie_name: "token".to_string(),
            },
            false,
        ),
        Argon2Config {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::memory_storage;

    #[tokio::test]
    async fn test_register_then_login() {
        let storage = memory_storage().await;
        let auth = test_auth_service();

        let registered = auth
            .register(&storage, "admin@uni.edu", "hunter22", None, None)
            .await
            .unwrap();
        assert!(!registered.token.is_empty());
        assert_eq!(registered.user.role, UserRole::Admin);

        let logged_in = auth
            .login(&storage, "admin@uni.edu", "hunter22")
            .await
            .unwrap();
        assert!(!logged_in.token.is_empty());
        assert_eq!(
            auth.jwt().verify_token(&logged_in.token).unwrap().sub,
            "admin@uni.edu"
        );
    }

    #[tokio::test]
    async fn test_register_twice_fails() {
        let storage = memory_storage().await;
        let auth = test_auth_service();

        auth.register(&storage, "tutor@uni.edu", "pw", Some(UserRole::Tutor), None)
            .await
            .unwrap();
        let err = auth
            .register(&storage, "tutor@uni.edu", "pw", None, None)
            .await
            .unwrap_err();
        assert_eq!(err, AutogradeError::already_exists("user already exists"));
    }

    #[tokio::test]
    async fn test_register_requires_credentials() {
        let storage = memory_storage().await;
        let err = test_auth_service()
            .register(&storage, "", "pw", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.message(), "email or password must not be empty");
    }

    #[tokio::test]
    async fn test_login_failures() {
        let storage = memory_storage().await;
        let auth = test_auth_service();
        auth.register(&storage, "tutor@uni.edu", "right", None, None)
            .await
            .unwrap();

        let err = auth
            .login(&storage, "tutor@uni.edu", "wrong")
            .await
            .unwrap_err();
        assert_eq!(err.message(), "incorrect username or password");

        let err = auth
            .login(&storage, "nobody@uni.edu", "right")
            .await
            .unwrap_err();
        assert_eq!(err.message(), "user with email: nobody@uni.edu does not exist");
    }

    #[tokio::test]
    async fn test_identify_uses_stored_role() {
        let storage = memory_storage().await;
        let auth = test_auth_service();
        let outcome = auth
            .register(&storage, "tutor@uni.edu", "pw", Some(UserRole::Tutor), None)
            .await
            .unwrap();

        let identity = auth.identify(&storage, &outcome.token).await.unwrap();
        assert_eq!(identity.map(|i| i.role), Some(UserRole::Tutor));

        // subject 不存在时视为未登录
        let stray = auth.jwt().generate_token("ghost@uni.edu").unwrap();
        assert_eq!(auth.identify(&storage, &stray).await.unwrap(), None);

        let err = auth.identify(&storage, "garbage").await.unwrap_err();
        assert!(matches!(err, AutogradeError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_only_admins_register_admins() {
        let storage = memory_storage().await;
        let auth = test_auth_service();

        // 第一个账号默认为管理员
        let first = auth
            .register(&storage, "admin", "pw", None, None)
            .await
            .unwrap();
        assert_eq!(first.user.role, UserRole::Admin);

        // 之后未指定角色时为导师
        let tutor = auth
            .register(&storage, "tutor@uni.edu", "pw", None, None)
            .await
            .unwrap();
        assert_eq!(tutor.user.role, UserRole::Tutor);

        let err = auth
            .register(&storage, "mallory@uni.edu", "pw", Some(UserRole::Admin), None)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AutogradeError::authorization("you must be an admin to register an admin")
        );
        let as_tutor = Identity::from(&tutor.user);
        let err = auth
            .register(
                &storage,
                "mallory@uni.edu",
                "pw",
                Some(UserRole::Admin),
                Some(&as_tutor),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AutogradeError::Authorization(_)));
        assert_eq!(storage.count_users().await.unwrap(), 2);

        let as_admin = Identity::from(&first.user);
        let second = auth
            .register(
                &storage,
                "second@uni.edu",
                "pw",
                Some(UserRole::Admin),
                Some(&as_admin),
            )
            .await
            .unwrap();
        assert_eq!(second.user.role, UserRole::Admin);
    }
}
