//! 测试用例存储操作

use super::{SeaOrmStorage, map_insert_error};
use crate::entity::tests::{ActiveModel, Column, Entity as Tests};
use crate::errors::{AutogradeError, Result};
use crate::models::tests::{entities::Test, requests::CreateTestRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建测试用例
    pub async fn create_test_impl(&self, req: CreateTestRequest) -> Result<Test> {
        let model = ActiveModel {
            name: Set(req.name),
            storage_path: Set(req.storage_path),
            assignment_id: Set(req.assignment_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error(e, "test"))?;

        Ok(result.into_test())
    }

    /// 通过 ID 获取测试用例
    pub async fn get_test_by_id_impl(&self, id: i64) -> Result<Option<Test>> {
        let result = Tests::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("查询测试用例失败: {e}")))?;

        Ok(result.map(|m| m.into_test()))
    }

    /// 分页列出测试用例
    pub async fn get_all_tests_impl(&self, offset: i64) -> Result<Vec<Test>> {
        let rows = self.page_by_key::<Tests>(Column::Id, offset).await?;
        Ok(rows.into_iter().map(|m| m.into_test()).collect())
    }

    /// 列出作业下的测试用例
    pub async fn get_tests_for_assignment_impl(&self, assignment_id: i64) -> Result<Vec<Test>> {
        let rows = Tests::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                AutogradeError::database_operation(format!("查询测试用例列表失败: {e}"))
            })?;

        Ok(rows.into_iter().map(|m| m.into_test()).collect())
    }

    /// 批量获取测试用例
    pub async fn get_tests_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Test>> {
        let rows = Tests::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| {
                AutogradeError::database_operation(format!("批量查询测试用例失败: {e}"))
            })?;

        Ok(rows.into_iter().map(|m| m.into_test()).collect())
    }
}
