use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 用户角色
#[derive(async_graphql::Enum, Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin, // 管理员
    Tutor, // 助教
}

impl UserRole {
    pub const ADMIN: &'static str = "admin";
    pub const TUTOR: &'static str = "tutor";
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
            UserRole::Tutor => write!(f, "{}", UserRole::TUTOR),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::ADMIN => Ok(UserRole::Admin),
            UserRole::TUTOR => Ok(UserRole::Tutor),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// 经过令牌校验的请求身份，由认证中间件写入请求扩展
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub email: String,
    pub role: UserRole,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}
