use async_graphql::{ComplexObject, Context, ID, InputObject, Result, SimpleObject};

use super::{ClassNode, SubmissionNode, TestNode, UnitNode};
use crate::graphql::context::storage;
use crate::graphql::errors::GraphQLResultExt;
use crate::graphql::loaders::{load_assignment, load_class, load_unit};
use crate::models::assignments::entities::Assignment;

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "Assignment", complex)]
pub struct AssignmentNode {
    pub id: ID,
    pub name: String,
    /// Unix 时间戳（秒）
    pub due_date: i64,
    #[graphql(skip)]
    pub key: i64,
}

impl From<Assignment> for AssignmentNode {
    fn from(assignment: Assignment) -> Self {
        Self {
            id: ID::from(assignment.id.to_string()),
            name: assignment.name,
            due_date: assignment.due_date.timestamp(),
            key: assignment.id,
        }
    }
}

#[ComplexObject]
impl AssignmentNode {
    async fn class(&self, ctx: &Context<'_>) -> Result<ClassNode> {
        let assignment = load_assignment(ctx, self.key).await?;
        Ok(load_class(ctx, assignment.class_id).await?.into())
    }

    async fn unit(&self, ctx: &Context<'_>) -> Result<UnitNode> {
        let assignment = load_assignment(ctx, self.key).await?;
        let class = load_class(ctx, assignment.class_id).await?;
        Ok(load_unit(ctx, class.unit_id).await?.into())
    }

    async fn tests(&self, ctx: &Context<'_>) -> Result<Vec<TestNode>> {
        let tests = storage(ctx)?
            .get_tests_for_assignment(self.key)
            .await
            .gql()?;
        Ok(tests.into_iter().map(TestNode::from).collect())
    }

    async fn submissions(&self, ctx: &Context<'_>) -> Result<Vec<SubmissionNode>> {
        let submissions = storage(ctx)?
            .get_submissions_for_assignment(self.key)
            .await
            .gql()?;
        Ok(submissions.into_iter().map(SubmissionNode::from).collect())
    }
}

#[derive(InputObject, Debug)]
pub struct NewAssignment {
    pub name: String,
    pub due_date: i64,
    #[graphql(name = "classID")]
    pub class_id: ID,
}
