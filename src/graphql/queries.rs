use async_graphql::{Context, ID, Object, Result};

use super::context::{identity, storage};
use super::errors::GraphQLResultExt;
use super::loaders::{
    AssignmentKey, ClassKey, ResultKey, SubmissionKey, TestKey, UnitKey, find_one,
};
use super::types::{
    AssignmentNode, ClassNode, ResultNode, SubmissionNode, TestNode, UnitNode, UserNode, id_arg,
};
use crate::models::normalize_offset;
use crate::services::lookup::entity;

#[derive(Default)]
pub struct Query;

// 列表查询按主键区间分页：from 缺省或小于 1 时从 1 开始，每页 50 条
// 单条查询的记录不存在时该字段为 null，并附带 NOT_FOUND 错误
#[Object]
impl Query {
    async fn units(&self, ctx: &Context<'_>, from: Option<i32>) -> Result<Vec<UnitNode>> {
        let offset = normalize_offset(from.map(i64::from));
        let units = storage(ctx)?.get_all_units(offset).await.gql()?;
        Ok(units.into_iter().map(UnitNode::from).collect())
    }

    async fn unit(&self, ctx: &Context<'_>, id: ID) -> Result<Option<UnitNode>> {
        let id = id_arg("id", &id)?;
        let record = find_one(ctx, UnitKey(id), entity::UNIT).await?;
        Ok(record.map(UnitNode::from))
    }

    async fn classes(&self, ctx: &Context<'_>, from: Option<i32>) -> Result<Vec<ClassNode>> {
        let offset = normalize_offset(from.map(i64::from));
        let classes = storage(ctx)?.get_all_classes(offset).await.gql()?;
        Ok(classes.into_iter().map(ClassNode::from).collect())
    }

    async fn class(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ClassNode>> {
        let id = id_arg("id", &id)?;
        let record = find_one(ctx, ClassKey(id), entity::CLASS).await?;
        Ok(record.map(ClassNode::from))
    }

    async fn assignments(
        &self,
        ctx: &Context<'_>,
        from: Option<i32>,
    ) -> Result<Vec<AssignmentNode>> {
        let offset = normalize_offset(from.map(i64::from));
        let assignments = storage(ctx)?.get_all_assignments(offset).await.gql()?;
        Ok(assignments.into_iter().map(AssignmentNode::from).collect())
    }

    async fn assignment(&self, ctx: &Context<'_>, id: ID) -> Result<Option<AssignmentNode>> {
        let id = id_arg("id", &id)?;
        let record = find_one(ctx, AssignmentKey(id), entity::ASSIGNMENT).await?;
        Ok(record.map(AssignmentNode::from))
    }

    async fn tests(&self, ctx: &Context<'_>, from: Option<i32>) -> Result<Vec<TestNode>> {
        let offset = normalize_offset(from.map(i64::from));
        let tests = storage(ctx)?.get_all_tests(offset).await.gql()?;
        Ok(tests.into_iter().map(TestNode::from).collect())
    }

    async fn test(&self, ctx: &Context<'_>, id: ID) -> Result<Option<TestNode>> {
        let id = id_arg("id", &id)?;
        let record = find_one(ctx, TestKey(id), entity::TEST).await?;
        Ok(record.map(TestNode::from))
    }

    async fn submissions(
        &self,
        ctx: &Context<'_>,
        from: Option<i32>,
    ) -> Result<Vec<SubmissionNode>> {
        let offset = normalize_offset(from.map(i64::from));
        let submissions = storage(ctx)?.get_all_submissions(offset).await.gql()?;
        Ok(submissions.into_iter().map(SubmissionNode::from).collect())
    }

    async fn submission(&self, ctx: &Context<'_>, id: ID) -> Result<Option<SubmissionNode>> {
        let id = id_arg("id", &id)?;
        let record = find_one(ctx, SubmissionKey(id), entity::SUBMISSION).await?;
        Ok(record.map(SubmissionNode::from))
    }

    async fn results(&self, ctx: &Context<'_>, from: Option<i32>) -> Result<Vec<ResultNode>> {
        let offset = normalize_offset(from.map(i64::from));
        let results = storage(ctx)?.get_all_results(offset).await.gql()?;
        Ok(results.into_iter().map(ResultNode::from).collect())
    }

    async fn result(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ResultNode>> {
        let id = id_arg("id", &id)?;
        let record = find_one(ctx, ResultKey(id), entity::RESULT).await?;
        Ok(record.map(ResultNode::from))
    }

    /// 当前登录用户，未登录为 null
    async fn me(&self, ctx: &Context<'_>) -> Option<UserNode> {
        identity(ctx).map(UserNode::from)
    }
}
