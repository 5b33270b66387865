use super::entities::UserRole;

// 用户创建请求（密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}
