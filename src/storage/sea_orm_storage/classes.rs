//! 班级存储操作

use super::{SeaOrmStorage, map_insert_error};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::errors::{AutogradeError, Result};
use crate::models::classes::{entities::Class, requests::CreateClassRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let model = ActiveModel {
            name: Set(req.name),
            unit_id: Set(req.unit_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error(e, "class"))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 分页列出班级
    pub async fn get_all_classes_impl(&self, offset: i64) -> Result<Vec<Class>> {
        let rows = self.page_by_key::<Classes>(Column::Id, offset).await?;
        Ok(rows.into_iter().map(|m| m.into_class()).collect())
    }

    /// 列出单元下的班级
    pub async fn get_classes_for_unit_impl(&self, unit_id: i64) -> Result<Vec<Class>> {
        let rows = Classes::find()
            .filter(Column::UnitId.eq(unit_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_class()).collect())
    }

    /// 批量获取班级
    pub async fn get_classes_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Class>> {
        let rows = Classes::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("批量查询班级失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_class()).collect())
    }
}
