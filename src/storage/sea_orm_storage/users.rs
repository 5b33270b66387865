use super::{SeaOrmStorage, map_insert_error};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{AutogradeError, Result};
use crate::models::users::{entities::User, requests::CreateUserRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let model = ActiveModel {
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            role: Set(req.role.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error(e, "user"))?;

        Ok(result.into_user())
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count)
    }
}
