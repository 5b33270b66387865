use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::errors::AutogradeError;
use crate::graphql::context::{require_identity, storage};
use crate::graphql::errors::GraphQLResultExt;
use crate::graphql::types::{NewResult, ResultNode, id_arg};
use crate::models::results::requests::CreateResultRequest;
use crate::services::lookup;

#[derive(Default)]
pub struct ResultMutation;

#[Object]
impl ResultMutation {
    /// 为提交记录成绩，每个提交只能有一条
    async fn create_result(&self, ctx: &Context<'_>, input: NewResult) -> Result<ResultNode> {
        let identity = require_identity(ctx)?;
        let submission_id = id_arg("submissionID", &input.submission_id)?;
        let storage = storage(ctx)?;

        let submission = lookup::submission(storage, submission_id).await.gql()?;
        if storage
            .get_result_for_submission(submission.id)
            .await
            .gql()?
            .is_some()
        {
            return Err(AutogradeError::already_exists("result already exists").extend());
        }

        let result = storage
            .create_result(CreateResultRequest {
                score: input.score,
                submission_id: submission.id,
            })
            .await
            .gql()?;

        tracing::info!(
            "Result {} for submission {} recorded by {}",
            result.id,
            submission.id,
            identity.email
        );
        Ok(result.into())
    }
}
