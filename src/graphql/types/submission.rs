use async_graphql::{ComplexObject, Context, ID, InputObject, Result, SimpleObject};

use super::{AssignmentNode, ClassNode, ResultNode, UnitNode};
use crate::graphql::loaders::{
    load_assignment, load_class, load_result_for_submission, load_submission, load_unit,
};
use crate::models::submissions::entities::Submission;

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "Submission", complex)]
pub struct SubmissionNode {
    pub id: ID,
    #[graphql(name = "studentID")]
    pub student_id: String,
    #[graphql(skip)]
    pub key: i64,
}

impl From<Submission> for SubmissionNode {
    fn from(submission: Submission) -> Self {
        Self {
            id: ID::from(submission.id.to_string()),
            student_id: submission.student_id,
            key: submission.id,
        }
    }
}

#[ComplexObject]
impl SubmissionNode {
    async fn assignment(&self, ctx: &Context<'_>) -> Result<AssignmentNode> {
        let submission = load_submission(ctx, self.key).await?;
        Ok(load_assignment(ctx, submission.assignment_id).await?.into())
    }

    async fn class(&self, ctx: &Context<'_>) -> Result<ClassNode> {
        let submission = load_submission(ctx, self.key).await?;
        let assignment = load_assignment(ctx, submission.assignment_id).await?;
        Ok(load_class(ctx, assignment.class_id).await?.into())
    }

    async fn unit(&self, ctx: &Context<'_>) -> Result<UnitNode> {
        let submission = load_submission(ctx, self.key).await?;
        let assignment = load_assignment(ctx, submission.assignment_id).await?;
        let class = load_class(ctx, assignment.class_id).await?;
        Ok(load_unit(ctx, class.unit_id).await?.into())
    }

    /// 未评分时为 null
    async fn result(&self, ctx: &Context<'_>) -> Result<Option<ResultNode>> {
        Ok(load_result_for_submission(ctx, self.key)
            .await?
            .map(ResultNode::from))
    }
}

#[derive(InputObject, Debug)]
pub struct NewSubmission {
    #[graphql(name = "studentID")]
    pub student_id: String,
    #[graphql(name = "assignmentID")]
    pub assignment_id: ID,
    /// 同时记录成绩
    pub score: Option<f64>,
}
