//! 成绩存储操作

use super::{SeaOrmStorage, map_insert_error};
use crate::entity::results::{ActiveModel, Column, Entity as Results};
use crate::errors::{AutogradeError, Result};
use crate::models::results::{entities::TestResult, requests::CreateResultRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建成绩，submission_id 唯一
    pub async fn create_result_impl(&self, req: CreateResultRequest) -> Result<TestResult> {
        let model = ActiveModel {
            score: Set(req.score),
            submission_id: Set(req.submission_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error(e, "result"))?;

        Ok(result.into_result())
    }

    /// 通过 ID 获取成绩
    pub async fn get_result_by_id_impl(&self, id: i64) -> Result<Option<TestResult>> {
        let result = Results::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_result()))
    }

    /// 分页列出成绩
    pub async fn get_all_results_impl(&self, offset: i64) -> Result<Vec<TestResult>> {
        let rows = self.page_by_key::<Results>(Column::Id, offset).await?;
        Ok(rows.into_iter().map(|m| m.into_result()).collect())
    }

    /// 获取提交对应的成绩
    pub async fn get_result_for_submission_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<TestResult>> {
        let result = Results::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .one(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_result()))
    }

    /// 批量获取成绩
    pub async fn get_results_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<TestResult>> {
        let rows = Results::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("批量查询成绩失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_result()).collect())
    }

    /// 按提交批量获取成绩
    pub async fn get_results_for_submissions_impl(
        &self,
        submission_ids: &[i64],
    ) -> Result<Vec<TestResult>> {
        let rows = Results::find()
            .filter(Column::SubmissionId.is_in(submission_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("批量查询成绩失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_result()).collect())
    }
}
