//! 单元存储操作

use super::{SeaOrmStorage, map_insert_error};
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::units::{ActiveModel, Column, Entity as Units};
use crate::errors::{AutogradeError, Result};
use crate::models::units::{entities::Unit, requests::CreateUnitRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建单元
    pub async fn create_unit_impl(&self, req: CreateUnitRequest) -> Result<Unit> {
        let model = ActiveModel {
            name: Set(req.name),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error(e, "unit"))?;

        Ok(result.into_unit())
    }

    /// 通过 ID 获取单元
    pub async fn get_unit_by_id_impl(&self, id: i64, fetch_classes: bool) -> Result<Option<Unit>> {
        if !fetch_classes {
            let result = Units::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(|e| AutogradeError::database_operation(format!("查询单元失败: {e}")))?;
            return Ok(result.map(|m| m.into_unit()));
        }

        let mut rows = Units::find_by_id(id)
            .find_with_related(Classes)
            .order_by_asc(ClassColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("查询单元失败: {e}")))?;

        Ok(rows.pop().map(|(unit, classes)| {
            let mut unit = unit.into_unit();
            unit.classes = classes.into_iter().map(|c| c.into_class()).collect();
            unit
        }))
    }

    /// 通过名称获取单元
    pub async fn get_unit_by_name_impl(&self, name: &str) -> Result<Option<Unit>> {
        let result = Units::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("查询单元失败: {e}")))?;

        Ok(result.map(|m| m.into_unit()))
    }

    /// 分页列出单元
    pub async fn get_all_units_impl(&self, offset: i64) -> Result<Vec<Unit>> {
        let rows = self.page_by_key::<Units>(Column::Id, offset).await?;
        Ok(rows.into_iter().map(|m| m.into_unit()).collect())
    }

    /// 批量获取单元
    pub async fn get_units_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Unit>> {
        let rows = Units::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("批量查询单元失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_unit()).collect())
    }
}
