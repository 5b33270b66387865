use async_graphql::{Context, Object, Result};

use crate::graphql::context::{require_identity, storage};
use crate::graphql::errors::GraphQLResultExt;
use crate::graphql::types::{NewSubmission, SubmissionNode, id_arg};
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::services::lookup;
use crate::utils::require_non_empty;

#[derive(Default)]
pub struct SubmissionMutation;

#[Object]
impl SubmissionMutation {
    /// 提供 score 时提交与成绩在同一事务中写入
    async fn create_submission(
        &self,
        ctx: &Context<'_>,
        input: NewSubmission,
    ) -> Result<SubmissionNode> {
        let identity = require_identity(ctx)?;
        require_non_empty("studentID", &input.student_id).gql()?;
        let assignment_id = id_arg("assignmentID", &input.assignment_id)?;
        let storage = storage(ctx)?;

        let assignment = lookup::assignment(storage, assignment_id).await.gql()?;
        let request = CreateSubmissionRequest {
            student_id: input.student_id,
            assignment_id: assignment.id,
        };

        let submission = match input.score {
            Some(score) => {
                let (submission, result) = storage
                    .create_submission_with_result(request, score)
                    .await
                    .gql()?;
                tracing::info!("Result {} recorded with score {}", result.id, result.score);
                submission
            }
            None => storage.create_submission(request).await.gql()?,
        };

        tracing::info!(
            "Submission {} by student {} created by {}",
            submission.id,
            submission.student_id,
            identity.email
        );
        Ok(submission.into())
    }
}
