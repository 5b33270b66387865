//! 作业存储操作

use super::{SeaOrmStorage, map_insert_error};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{AutogradeError, Result};
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        let model = ActiveModel {
            name: Set(req.name),
            due_date: Set(req.due_date),
            class_id: Set(req.class_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error(e, "assignment"))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 分页列出作业
    pub async fn get_all_assignments_impl(&self, offset: i64) -> Result<Vec<Assignment>> {
        let rows = self.page_by_key::<Assignments>(Column::Id, offset).await?;
        Ok(rows.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 列出班级下的作业
    pub async fn get_assignments_for_class_impl(&self, class_id: i64) -> Result<Vec<Assignment>> {
        let rows = Assignments::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 批量获取作业
    pub async fn get_assignments_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Assignment>> {
        let rows = Assignments::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("批量查询作业失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_assignment()).collect())
    }
}
