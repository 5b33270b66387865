use async_graphql::{ComplexObject, Context, ID, InputObject, Result, SimpleObject};

use super::SubmissionNode;
use crate::graphql::loaders::{load_result, load_submission};
use crate::models::results::entities::TestResult;

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "Result", complex)]
pub struct ResultNode {
    pub id: ID,
    pub score: f64,
    /// 记录日期，DD/MM/YYYY
    pub date: String,
    #[graphql(name = "submissionID")]
    pub submission_id: ID,
    #[graphql(skip)]
    pub key: i64,
}

impl From<TestResult> for ResultNode {
    fn from(result: TestResult) -> Self {
        Self {
            id: ID::from(result.id.to_string()),
            score: result.score,
            date: result.date(),
            submission_id: ID::from(result.submission_id.to_string()),
            key: result.id,
        }
    }
}

#[ComplexObject]
impl ResultNode {
    async fn submission(&self, ctx: &Context<'_>) -> Result<SubmissionNode> {
        let result = load_result(ctx, self.key).await?;
        Ok(load_submission(ctx, result.submission_id).await?.into())
    }
}

#[derive(InputObject, Debug)]
pub struct NewResult {
    pub score: f64,
    #[graphql(name = "submissionID")]
    pub submission_id: ID,
}
