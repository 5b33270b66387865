//! 提交存储操作

use super::{SeaOrmStorage, map_insert_error};
use crate::entity::results::ActiveModel as ResultActiveModel;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{AutogradeError, Result};
use crate::models::{
    results::entities::TestResult,
    submissions::{entities::Submission, requests::CreateSubmissionRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建提交
    pub async fn create_submission_impl(&self, req: CreateSubmissionRequest) -> Result<Submission> {
        let model = ActiveModel {
            student_id: Set(req.student_id),
            assignment_id: Set(req.assignment_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error(e, "submission"))?;

        Ok(result.into_submission())
    }

    /// 在同一事务中创建提交与成绩，任一步失败则整体回滚
    pub async fn create_submission_with_result_impl(
        &self,
        req: CreateSubmissionRequest,
        score: f64,
    ) -> Result<(Submission, TestResult)> {
        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AutogradeError::database_operation(format!("开启事务失败: {e}")))?;

        let submission = ActiveModel {
            student_id: Set(req.student_id),
            assignment_id: Set(req.assignment_id),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| map_insert_error(e, "submission"))?;

        let result = ResultActiveModel {
            score: Set(score),
            submission_id: Set(submission.id),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| map_insert_error(e, "result"))?;

        txn.commit()
            .await
            .map_err(|e| AutogradeError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((submission.into_submission(), result.into_result()))
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 分页列出提交
    pub async fn get_all_submissions_impl(&self, offset: i64) -> Result<Vec<Submission>> {
        let rows = self.page_by_key::<Submissions>(Column::Id, offset).await?;
        Ok(rows.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 列出作业下的提交
    pub async fn get_submissions_for_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>> {
        let rows = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 批量获取提交
    pub async fn get_submissions_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Submission>> {
        let rows = Submissions::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("批量查询提交失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_submission()).collect())
    }
}
